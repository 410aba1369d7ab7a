//! `PresentationTree` for the in-memory `tuidom` document.

use tuidom::{Document, Event, EventKind, Key, ListenerId, MouseButton, Selector, SelectorError};

use crate::tree::{Interaction, KeyInput, PresentationTree, Trigger};

impl From<Trigger> for EventKind {
    fn from(trigger: Trigger) -> Self {
        match trigger {
            Trigger::Press => EventKind::Click,
            Trigger::Key => EventKind::Key,
            Trigger::Focus => EventKind::Focus,
        }
    }
}

impl PresentationTree for Document {
    type Node = String;
    type Subscription = ListenerId;
    type Event = Event;
    type SelectorError = SelectorError;

    fn document(&self) -> String {
        self.root_key().to_string()
    }

    fn query_selector(
        &self,
        scope: &String,
        selector: &str,
    ) -> Result<Option<String>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(Document::query_selector(self, scope, &selector).map(str::to_string))
    }

    fn query_selector_all(
        &self,
        scope: &String,
        selector: &str,
    ) -> Result<Vec<String>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(Document::query_selector_all(self, scope, &selector)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn attribute(&self, node: &String, name: &str) -> Option<String> {
        self.get(node)?.get_attr(name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: &String, name: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.set_attr(name, value);
        }
    }

    fn remove_attribute(&mut self, node: &String, name: &str) {
        if let Some(el) = self.get_mut(node) {
            el.remove_attr(name);
        }
    }

    fn has_class(&self, node: &String, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    fn add_class(&mut self, node: &String, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.add_class(class);
        }
    }

    fn remove_class(&mut self, node: &String, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.remove_class(class);
        }
    }

    fn contains(&self, ancestor: &String, node: &String) -> bool {
        Document::contains(self, ancestor, node)
    }

    fn subscribe(&mut self, node: &String, trigger: Trigger) -> ListenerId {
        Document::subscribe(self, node, trigger.into())
    }

    fn unsubscribe(&mut self, subscription: ListenerId) {
        Document::unsubscribe(self, subscription);
    }

    fn interaction(&self, event: &Event) -> Option<Interaction<String>> {
        let (trigger, key) = match event {
            Event::Click {
                button: MouseButton::Left,
                ..
            } => (Trigger::Press, KeyInput::Other),
            Event::Key { key, .. } => (
                Trigger::Key,
                match key {
                    Key::Enter => KeyInput::Enter,
                    Key::Char(' ') => KeyInput::Space,
                    _ => KeyInput::Other,
                },
            ),
            Event::Focus { .. } => (Trigger::Focus, KeyInput::Other),
            Event::Click { .. } | Event::Blur { .. } => return None,
        };

        Some(Interaction {
            trigger,
            target: event.target().map(str::to_string),
            key,
        })
    }

    fn subscribers(&self, event: &Event) -> Vec<ListenerId> {
        Document::subscribers(self, event)
    }
}

#[cfg(test)]
mod tests {
    use tuidom::{Element, Modifiers};

    use super::*;

    #[test]
    fn test_interaction_mapping() {
        let doc = Document::new(Element::col().key("doc"));

        let press = doc.interaction(&Event::click("a")).unwrap();
        assert_eq!(press.trigger, Trigger::Press);
        assert_eq!(press.target.as_deref(), Some("a"));

        let right = Event::Click {
            target: Some("a".to_string()),
            button: MouseButton::Right,
        };
        assert_eq!(doc.interaction(&right), None);

        let space = Event::Key {
            target: None,
            key: Key::Char(' '),
            modifiers: Modifiers::shift(),
        };
        let space = doc.interaction(&space).unwrap();
        assert_eq!(space.key, KeyInput::Space);
        assert_eq!(space.target, None);

        assert_eq!(
            doc.interaction(&Event::key("a", Key::Enter)).unwrap().key,
            KeyInput::Enter
        );
        assert_eq!(
            doc.interaction(&Event::key("a", Key::Tab)).unwrap().key,
            KeyInput::Other
        );

        let blur = Event::Blur {
            target: "a".to_string(),
            new_target: None,
        };
        assert_eq!(doc.interaction(&blur), None);
    }

    #[test]
    fn test_attribute_roundtrip_on_unknown_node_is_noop() {
        let mut doc = Document::new(Element::col().key("doc"));
        let missing = "missing".to_string();

        doc.set_attribute(&missing, "role", "region");
        doc.add_class(&missing, "x");
        assert_eq!(doc.attribute(&missing, "role"), None);
        assert!(!doc.has_class(&missing, "x"));
    }
}
