//! Named boolean filter toggles. The active-filter list belongs to the
//! caller, as does all filtering logic; toggling only maintains the list and
//! reports the new state through the filter's callback.

/// Per-filter callback, invoked with the filter's new on/off state.
pub type FilterCallback = Box<dyn FnMut(bool)>;

pub struct FilterToggle {
    pub name: String,
    callback: FilterCallback,
}

#[derive(Default)]
pub struct FilterController {
    toggles: Vec<FilterToggle>,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_toggle(&mut self, name: impl Into<String>, callback: FilterCallback) -> &mut Self {
        self.toggles.push(FilterToggle { name: name.into(), callback });
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.toggles.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    /// Flip the named filter: add or remove it from the caller-owned
    /// `active` list and invoke its callback with the new state. Returns the
    /// new state, or `None` for an unknown name.
    pub fn toggle(&mut self, name: &str, active: &mut Vec<String>) -> Option<bool> {
        let toggle = self.toggles.iter_mut().find(|t| t.name == name)?;
        let now_on = if let Some(pos) = active.iter().position(|n| n == name) {
            active.remove(pos);
            false
        } else {
            active.push(name.to_string());
            true
        };
        (toggle.callback)(now_on);
        Some(now_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_toggle_maintains_active_list_and_reports_state() {
        let states = Rc::new(RefCell::new(Vec::new()));
        let log = states.clone();
        let mut controller = FilterController::new();
        controller.add_toggle("archived", Box::new(move |on| log.borrow_mut().push(on)));

        let mut active = Vec::new();
        assert_eq!(controller.toggle("archived", &mut active), Some(true));
        assert_eq!(active, vec!["archived"]);

        assert_eq!(controller.toggle("archived", &mut active), Some(false));
        assert!(active.is_empty());
        assert_eq!(*states.borrow(), vec![true, false]);
    }

    #[test]
    fn test_unknown_filter_is_ignored() {
        let mut controller = FilterController::new();
        controller.add_toggle("archived", Box::new(|_| {}));

        let mut active = Vec::new();
        assert_eq!(controller.toggle("published", &mut active), None);
        assert!(active.is_empty());
    }

    #[test]
    fn test_independent_filters() {
        let mut controller = FilterController::new();
        controller.add_toggle("archived", Box::new(|_| {}));
        controller.add_toggle("published", Box::new(|_| {}));

        let mut active = vec!["published".to_string()];
        controller.toggle("archived", &mut active);
        assert_eq!(active, vec!["published", "archived"]);

        controller.toggle("published", &mut active);
        assert_eq!(active, vec!["archived"]);
    }
}
