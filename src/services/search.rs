//! Debounced search delegated to a caller-supplied callback.
//!
//! The controller owns nothing but the input text, the option list, and the
//! debounce deadline; what "search" means is entirely the caller's business.

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before the search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Caller's search function: (text, selected field option).
pub type SearchFn = Box<dyn FnMut(&str, Option<&str>)>;

/// Caller's reset, invoked when the input is cleared.
pub type ResetFn = Box<dyn FnMut()>;

/// Zero-argument option callback, e.g. opening a date picker.
pub type TriggerFn = Box<dyn FnMut()>;

/// How a named search option behaves when chosen.
pub enum SearchBinding {
    /// Scopes subsequent free-text searches to this field.
    Field,
    /// Fires immediately instead of accepting free text.
    Trigger(TriggerFn),
}

/// A named entry in the search-target dropdown.
pub struct SearchOption {
    pub name: String,
    pub binding: SearchBinding,
}

impl SearchOption {
    pub fn field(name: impl Into<String>) -> Self {
        Self { name: name.into(), binding: SearchBinding::Field }
    }

    pub fn trigger(name: impl Into<String>, run: TriggerFn) -> Self {
        Self { name: name.into(), binding: SearchBinding::Trigger(run) }
    }
}

/// Debounced search controller.
///
/// Keystrokes restart a 500 ms deadline; `poll_at` fires the caller's search
/// once the deadline passes, with whatever text is current by then. A burst
/// of edits therefore collapses into a single invocation carrying the final
/// text. In-flight searches are never cancelled when a new one fires.
pub struct SearchController {
    text: String,
    options: Vec<SearchOption>,
    selected_option: Option<usize>,
    search: SearchFn,
    reset: Option<ResetFn>,
    deadline: Option<Instant>,
}

impl SearchController {
    pub fn new(search: SearchFn) -> Self {
        Self {
            text: String::new(),
            options: Vec::new(),
            selected_option: None,
            search,
            reset: None,
            deadline: None,
        }
    }

    pub fn with_options(mut self, options: Vec<SearchOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_reset(mut self, reset: ResetFn) -> Self {
        self.reset = Some(reset);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Name of the currently selected field option, if any.
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.map(|i| self.options[i].name.as_str())
    }

    /// Replace the input text. Clearing it invokes the caller's reset and
    /// drops any pending search; anything else restarts the debounce window.
    pub fn input(&mut self, text: impl Into<String>) {
        self.input_at(text, Instant::now());
    }

    pub fn input_at(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        if self.text.is_empty() {
            self.deadline = None;
            if let Some(reset) = &mut self.reset {
                reset();
            }
        } else {
            self.deadline = Some(now + SEARCH_DEBOUNCE);
        }
    }

    /// Choose a search option. Trigger options fire immediately and leave
    /// the field selection alone; field options scope future searches.
    /// Returns true if the option fired as a trigger.
    pub fn select_option(&mut self, index: usize) -> bool {
        match self.options.get_mut(index).map(|o| &mut o.binding) {
            Some(SearchBinding::Trigger(run)) => {
                run();
                true
            }
            Some(SearchBinding::Field) => {
                self.selected_option = Some(index);
                false
            }
            None => false,
        }
    }

    /// Fire the pending search if the debounce window has elapsed.
    /// Returns true when a search was invoked.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let field = self
                    .selected_option
                    .and_then(|i| self.options.get(i))
                    .map(|o| o.name.clone());
                (self.search)(&self.text, field.as_deref());
                true
            }
            _ => false,
        }
    }
}
