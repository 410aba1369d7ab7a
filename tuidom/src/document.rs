//! A mutable element tree with listener subscriptions and bubbling dispatch.

use std::collections::BTreeMap;

use crossterm::event::{Event as CrosstermEvent, KeyEventKind};

use crate::element::{element_path, find_element, find_element_mut, Element};
use crate::event::{Event, EventKind, Key};
use crate::focus::FocusState;
use crate::selector::{Selector, SelectorError};

/// Token for a listener subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Listener {
    node: String,
    kind: EventKind,
}

/// Owns the element tree, the focus state and the listener table.
///
/// Listeners are registered per (element key, event kind). Events bubble
/// from their target up to the root, so a listener on the root receives
/// every event of its kind.
#[derive(Debug)]
pub struct Document {
    root: Element,
    focus: FocusState,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener: u64,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            focus: FocusState::new(),
            listeners: BTreeMap::new(),
            next_listener: 0,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_key(&self) -> &str {
        &self.root.key
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        find_element(&self.root, key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, key)
    }

    /// Key of the first element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<&str> {
        fn walk<'a>(element: &'a Element, id: &str) -> Option<&'a str> {
            if element.get_id() == Some(id) {
                return Some(&element.key);
            }
            element.content.children().iter().find_map(|c| walk(c, id))
        }
        walk(&self.root, id)
    }

    /// Append `child` under `parent`. Returns false if `parent` is unknown.
    pub fn append_child(&mut self, parent: &str, child: Element) -> bool {
        match self.get_mut(parent) {
            Some(element) => {
                element.push_child(child);
                true
            }
            None => false,
        }
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: &str, node: &str) -> bool {
        element_path(&self.root, node)
            .is_some_and(|path| path.iter().any(|el| el.key == ancestor))
    }

    /// Parent key of `key`, None for the root or unknown keys.
    pub fn parent(&self, key: &str) -> Option<&str> {
        let path = element_path(&self.root, key)?;
        let len = path.len();
        if len < 2 {
            return None;
        }
        path.get(len - 2).map(|el| el.key.as_str())
    }

    // Queries

    /// First descendant of `scope` (excluding `scope` itself) matching the
    /// selector, in tree order. Ancestors of `scope` take part in
    /// combinator matching.
    pub fn query_selector(&self, scope: &str, selector: &Selector) -> Option<&str> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    /// All descendants of `scope` matching the selector, in tree order.
    pub fn query_selector_all(&self, scope: &str, selector: &Selector) -> Vec<&str> {
        let Some(mut path) = element_path(&self.root, scope) else {
            return Vec::new();
        };
        let Some(scope_el) = path.last().copied() else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for child in scope_el.content.children() {
            collect_matches(child, selector, &mut path, &mut found);
        }
        found
    }

    /// Parse and run a selector query.
    pub fn query(&self, scope: &str, selector: &str) -> Result<Option<&str>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector(scope, &selector))
    }

    // Listeners

    pub fn subscribe(&mut self, node: &str, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(
            id,
            Listener {
                node: node.to_string(),
                kind,
            },
        );
        log::trace!("[document] subscribe {id:?} {kind:?} on {node}");
        id
    }

    /// Returns true if the listener was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners an event reaches, target first, then each ancestor up to
    /// the root. Registration order within one element. Events without a
    /// target, or targeting an unknown key, reach only the root.
    pub fn subscribers(&self, event: &Event) -> Vec<ListenerId> {
        let kind = event.kind();
        let path: Vec<&str> = match event.target().and_then(|t| element_path(&self.root, t)) {
            Some(path) => path.iter().rev().map(|el| el.key.as_str()).collect(),
            None => vec![self.root.key.as_str()],
        };

        path.iter()
            .flat_map(|node| {
                self.listeners
                    .iter()
                    .filter(move |(_, l)| l.kind == kind && l.node == *node)
                    .map(|(id, _)| *id)
            })
            .collect()
    }

    // Focus

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// Focus `key`, returning the Blur/Focus events to dispatch.
    /// Unknown or unfocusable elements are ignored.
    pub fn focus(&mut self, key: &str) -> Vec<Event> {
        if !self.get(key).is_some_and(Element::is_focusable) {
            return Vec::new();
        }
        self.focus.move_to(key)
    }

    /// Tab navigation, returning the Blur/Focus events to dispatch.
    pub fn focus_next(&mut self) -> Vec<Event> {
        self.focus.move_next(&self.root)
    }

    /// Shift+Tab navigation, returning the Blur/Focus events to dispatch.
    pub fn focus_prev(&mut self) -> Vec<Event> {
        self.focus.move_prev(&self.root)
    }

    /// Translate a raw terminal event into high-level events.
    ///
    /// Tab and Shift+Tab move focus; other key presses target the focused
    /// element. Mouse events need a layout to find their target and are left
    /// to the embedder.
    pub fn translate(&mut self, raw: &CrosstermEvent) -> Vec<Event> {
        let CrosstermEvent::Key(key_event) = raw else {
            return Vec::new();
        };
        // Only process key press events (not release/repeat on some terminals)
        if key_event.kind != KeyEventKind::Press {
            return Vec::new();
        }

        let key: Key = key_event.code.into();
        match key {
            Key::Tab => self.focus_next(),
            Key::BackTab => self.focus_prev(),
            _ => vec![Event::Key {
                target: self.focused().map(str::to_string),
                key,
                modifiers: key_event.modifiers.into(),
            }],
        }
    }
}

fn collect_matches<'a>(
    element: &'a Element,
    selector: &Selector,
    path: &mut Vec<&'a Element>,
    found: &mut Vec<&'a str>,
) {
    path.push(element);
    if selector.matches_path(path) {
        found.push(&element.key);
    }
    for child in element.content.children() {
        collect_matches(child, selector, path, found);
    }
    path.pop();
}
