use crate::element::Element;
use crate::event::Event;

/// Tracks which element is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element key.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by key.
    /// Returns true if focus changed.
    pub fn focus(&mut self, key: &str) -> bool {
        if self.focused.as_deref() == Some(key) {
            return false;
        }
        self.focused = Some(key.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        if self.focused.is_some() {
            self.focused = None;
            true
        } else {
            false
        }
    }

    /// Move focus to `key`, producing the Blur/Focus pair the move implies.
    /// Empty when `key` is already focused.
    pub fn move_to(&mut self, key: &str) -> Vec<Event> {
        let old = self.focused.clone();
        if !self.focus(key) {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(old) = old {
            events.push(Event::Blur {
                target: old,
                new_target: Some(key.to_string()),
            });
        }
        events.push(Event::Focus {
            target: key.to_string(),
        });
        events
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element key if focus changed.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        let new_focus = self.next_target(root)?;
        self.focus(&new_focus).then_some(new_focus)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element key if focus changed.
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        let new_focus = self.prev_target(root)?;
        self.focus(&new_focus).then_some(new_focus)
    }

    /// Tab navigation, producing the Blur/Focus events of the move.
    pub fn move_next(&mut self, root: &Element) -> Vec<Event> {
        match self.next_target(root) {
            Some(key) => self.move_to(&key),
            None => Vec::new(),
        }
    }

    /// Shift+Tab navigation, producing the Blur/Focus events of the move.
    pub fn move_prev(&mut self, root: &Element) -> Vec<Event> {
        match self.prev_target(root) {
            Some(key) => self.move_to(&key),
            None => Vec::new(),
        }
    }

    fn next_target(&self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let first = focusable.first()?;

        Some(match &self.focused {
            None => first.clone(),
            Some(current) => match focusable.iter().position(|key| key == current) {
                Some(i) => focusable[(i + 1) % focusable.len()].clone(),
                None => first.clone(),
            },
        })
    }

    fn prev_target(&self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let last = focusable.last()?;

        Some(match &self.focused {
            None => last.clone(),
            Some(current) => match focusable.iter().position(|key| key == current) {
                Some(0) | None => last.clone(),
                Some(i) => focusable[i - 1].clone(),
            },
        })
    }
}

/// Keys of all focusable elements in tree order.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    if element.is_focusable() {
        result.push(element.key.clone());
    }
    for child in element.content.children() {
        collect_focusable_recursive(child, result);
    }
}
