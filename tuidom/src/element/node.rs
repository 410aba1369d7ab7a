use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

fn generate_key(prefix: &str) -> String {
    let key = NEXT_KEY.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{key}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    /// Node identity within the tree. Always present, generated when not set.
    /// Distinct from the `id` attribute, which may be absent.
    pub key: String,

    // Content
    pub content: Content,

    // Presentation
    /// Class list in insertion order, without duplicates.
    pub classes: Vec<String>,
    /// Attributes, including `id`.
    pub attributes: BTreeMap<String, String>,

    // Interaction
    pub focusable: bool,
    /// Disabled elements are skipped by focus navigation.
    pub disabled: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            key: generate_key("el"),
            content: Content::None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            focusable: false,
            disabled: false,
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            key: generate_key("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            key: generate_key("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            key: generate_key("col"),
            ..Default::default()
        }
    }

    // Identity
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn get_id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    // Presentation
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class: String = class.into();
        self.add_class(&class);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Returns true if the attribute was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        self.attributes.remove(name).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns true if the class was added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Returns true if the class was removed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether focus navigation can land on this element.
    /// A non-negative `tabindex` makes any element focusable, a negative one
    /// removes it from the tab order.
    pub fn is_focusable(&self) -> bool {
        if self.disabled {
            return false;
        }
        match self.get_attr("tabindex").map(|v| v.trim().parse::<i32>()) {
            Some(Ok(index)) => index >= 0,
            _ => self.focusable,
        }
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Append a child, replacing text content if any.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_deduplicated() {
        let mut el = Element::box_().class("a").class("a");
        assert_eq!(el.classes, vec!["a"]);
        assert!(!el.add_class("a"));
        assert!(el.remove_class("a"));
        assert!(!el.remove_class("a"));
        assert!(!el.add_class(""));
    }

    #[test]
    fn test_tabindex_overrides_focusable() {
        assert!(Element::box_().attr("tabindex", "0").is_focusable());
        assert!(!Element::box_().focusable(true).attr("tabindex", "-1").is_focusable());
        assert!(Element::box_().focusable(true).attr("tabindex", "nope").is_focusable());
        assert!(!Element::box_().attr("tabindex", "0").disabled(true).is_focusable());
    }

    #[test]
    fn test_generated_keys_are_unique() {
        assert_ne!(Element::box_().key, Element::box_().key);
        assert!(Element::text("x").key.starts_with("text-"));
    }
}
