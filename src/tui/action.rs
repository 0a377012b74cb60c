use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible actions in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Selection
    ToggleSelect,
    SelectAll,
    ClearSelection,

    // Pagination
    NextPage,
    PrevPage,

    // Columns (header mode)
    FocusHeader,
    ColumnLeft,
    ColumnRight,
    GrabColumn,
    DropColumn,
    WidenColumn,
    NarrowColumn,
    HideColumn,
    ShowAllColumns,

    // Data Operations
    Search,
    Filter,
    Export,
    Create,
    OpenActions,

    // View
    ToggleHelp,
    Refresh,

    // Application
    Quit,
    Confirm,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move cursor up",
            Action::MoveDown => "Move cursor down",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to first row",
            Action::GoToBottom => "Go to last row",
            Action::ToggleSelect => "Toggle row selection",
            Action::SelectAll => "Select all rows",
            Action::ClearSelection => "Clear selection",
            Action::NextPage => "Next page",
            Action::PrevPage => "Previous page",
            Action::FocusHeader => "Focus the header row",
            Action::ColumnLeft => "Previous column",
            Action::ColumnRight => "Next column",
            Action::GrabColumn => "Grab column for reorder",
            Action::DropColumn => "Drop grabbed column",
            Action::WidenColumn => "Widen column",
            Action::NarrowColumn => "Narrow column",
            Action::HideColumn => "Hide column",
            Action::ShowAllColumns => "Show all columns",
            Action::Search => "Focus search input",
            Action::Filter => "Open filter menu",
            Action::Export => "Export current view",
            Action::Create => "Create a new record",
            Action::OpenActions => "Open row action menu",
            Action::ToggleHelp => "Toggle help screen",
            Action::Refresh => "Refresh current view",
            Action::Quit => "Quit application",
            Action::Confirm => "Confirm action",
            Action::Cancel => "Cancel action",
        }
    }

    /// Get category for grouping in help screen
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToBottom => ActionCategory::Navigation,

            Action::ToggleSelect | Action::SelectAll | Action::ClearSelection => {
                ActionCategory::Selection
            }

            Action::NextPage | Action::PrevPage => ActionCategory::Pagination,

            Action::FocusHeader
            | Action::ColumnLeft
            | Action::ColumnRight
            | Action::GrabColumn
            | Action::DropColumn
            | Action::WidenColumn
            | Action::NarrowColumn
            | Action::HideColumn
            | Action::ShowAllColumns => ActionCategory::Columns,

            Action::Search
            | Action::Filter
            | Action::Export
            | Action::Create
            | Action::OpenActions => ActionCategory::DataOps,

            Action::ToggleHelp | Action::Refresh => ActionCategory::View,

            Action::Quit | Action::Confirm | Action::Cancel => ActionCategory::Application,
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::PageUp,
            Action::PageDown,
            Action::GoToTop,
            Action::GoToBottom,
            Action::ToggleSelect,
            Action::SelectAll,
            Action::ClearSelection,
            Action::NextPage,
            Action::PrevPage,
            Action::FocusHeader,
            Action::ColumnLeft,
            Action::ColumnRight,
            Action::GrabColumn,
            Action::DropColumn,
            Action::WidenColumn,
            Action::NarrowColumn,
            Action::HideColumn,
            Action::ShowAllColumns,
            Action::Search,
            Action::Filter,
            Action::Export,
            Action::Create,
            Action::OpenActions,
            Action::ToggleHelp,
            Action::Refresh,
            Action::Quit,
            Action::Confirm,
            Action::Cancel,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Selection,
    Pagination,
    Columns,
    DataOps,
    View,
    Application,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Navigation => write!(f, "Navigation"),
            ActionCategory::Selection => write!(f, "Selection"),
            ActionCategory::Pagination => write!(f, "Pagination"),
            ActionCategory::Columns => write!(f, "Columns"),
            ActionCategory::DataOps => write!(f, "Data Operations"),
            ActionCategory::View => write!(f, "View"),
            ActionCategory::Application => write!(f, "Application"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_actions_have_descriptions() {
        for action in Action::all() {
            assert!(!action.description().is_empty());
        }
    }

    #[test]
    fn test_all_actions_have_categories() {
        for action in Action::all() {
            let _ = action.category(); // Should not panic
        }
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::ToggleSelect;
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, "\"ToggleSelect\"");

        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, action);
    }
}
