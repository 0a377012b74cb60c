use crate::tui::action::Action;
use color_eyre::Result;
use ratatui::{Frame, layout::Rect};

/// Base trait for all TUI components
///
/// All interactive UI elements implement this trait to provide consistent
/// behavior for action handling, rendering, and component lifecycle.
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was handled and consumed.
    /// Returns Ok(false) if the action was not handled and should propagate.
    /// Returns Err if handling the action resulted in an error.
    fn handle_action(&mut self, action: Action) -> Result<bool>;

    /// Render the component to the terminal
    ///
    /// Components are responsible for rendering themselves within the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Get list of actions this component supports
    ///
    /// Used for generating context-sensitive help and validating action routing.
    fn supported_actions(&self) -> &[Action];

    /// Get component name for debugging/logging
    fn name(&self) -> &str;

    /// Update component state (called on every tick)
    ///
    /// Default implementation does nothing. Override if component needs
    /// to update state independently of user input, e.g. firing a debounce
    /// deadline.
    fn update(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Focusable component trait
///
/// Components that can receive keyboard focus implement this trait.
/// Focus determines which component receives keyboard input.
pub trait Focusable: Component {
    /// Check if component currently has focus
    fn is_focused(&self) -> bool;

    /// Set focus state
    fn set_focused(&mut self, focused: bool);
}
