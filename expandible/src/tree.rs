//! The presentation tree an expandible is attached to.

use std::fmt::Debug;
use std::hash::Hash;

/// Kinds of interaction a controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Primary pointer button pressed.
    Press,
    /// Key pressed.
    Key,
    /// Element focused.
    Focus,
}

/// Keys an expandible reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Enter,
    Space,
    Other,
}

/// A host event reduced to what controllers care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction<N> {
    pub trigger: Trigger,
    /// None when the event hit no element.
    pub target: Option<N>,
    /// `KeyInput::Other` for non-key triggers.
    pub key: KeyInput,
}

/// Host tree operations used by controllers.
///
/// Nodes and subscriptions are cheap handles owned by the host. Controllers
/// never hold on to tree data beyond these handles.
pub trait PresentationTree {
    type Node: Clone + Eq + Hash + Debug;
    type Subscription: Copy + Eq + Hash + Debug;
    type Event;
    type SelectorError: std::error::Error + Send + Sync + 'static;

    /// The top-level node; delegated listeners are attached here.
    fn document(&self) -> Self::Node;

    /// First descendant of `scope` matching `selector`, in tree order.
    fn query_selector(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, Self::SelectorError>;

    /// All descendants of `scope` matching `selector`, in tree order.
    fn query_selector_all(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, Self::SelectorError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Listen for `trigger` on `node` and its descendants.
    fn subscribe(&mut self, node: &Self::Node, trigger: Trigger) -> Self::Subscription;
    fn unsubscribe(&mut self, subscription: Self::Subscription);

    /// Reduce a host event, or None if no controller cares about it.
    fn interaction(&self, event: &Self::Event) -> Option<Interaction<Self::Node>>;

    /// Subscriptions the event reaches, in delivery order.
    fn subscribers(&self, event: &Self::Event) -> Vec<Self::Subscription>;
}
