//! Registry owning every expandible created against one tree.

use std::collections::HashMap;
use std::fmt;

use crate::controller::Expandible;
use crate::error::{Error, Result};
use crate::settings::{Options, Settings};
use crate::tree::PresentationTree;

/// Default selector for [`Registry::init_all`].
pub const DEFAULT_ROOT_SELECTOR: &str = "[data-expandible]";

/// Prefix for ids assigned to roots that have none.
pub const FALLBACK_ID_PREFIX: &str = "expendible";

/// Position of a controller in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A state change caused by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub instance: InstanceId,
    pub expanded: bool,
}

/// What happened while handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// State changes, in the order they happened.
    pub transitions: Vec<Transition>,
    /// The host should skip its default action (e.g. scrolling on Space).
    pub default_prevented: bool,
}

/// Result of [`Registry::init_all`].
#[derive(Debug, Default)]
pub struct InitReport<N> {
    pub created: Vec<InstanceId>,
    pub failed: Vec<(N, Error)>,
}

type Controller<T> =
    Expandible<<T as PresentationTree>::Node, <T as PresentationTree>::Subscription>;

/// Owns controllers for one tree.
///
/// The registry is append-only: destroyed controllers keep their slot so
/// fallback ids stay unique and monotonic. Registries are independent of
/// each other; nothing here is global.
pub struct Registry<T: PresentationTree> {
    instances: Vec<Controller<T>>,
    /// Root and handle nodes of live controllers.
    by_element: HashMap<T::Node, InstanceId>,
}

impl<T: PresentationTree> Registry<T> {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            by_element: HashMap::new(),
        }
    }

    /// Turn `root` into an expandible region.
    ///
    /// Fails if the handle selector is invalid, matches nothing inside
    /// `root`, or if `root` or its handle is already managed here.
    pub fn create(
        &mut self,
        tree: &mut T,
        root: &T::Node,
        options: &Options,
    ) -> Result<InstanceId> {
        if self.by_element.contains_key(root) {
            return Err(Error::AlreadyInitialized {
                root: describe(&*tree, root),
            });
        }

        let settings = Settings::resolve(options, |name| tree.attribute(root, name));
        let handle = tree
            .query_selector(root, &settings.handle_selector)
            .map_err(|e| Error::InvalidSelector {
                selector: settings.handle_selector.clone(),
                source: Box::new(e),
            })?
            .ok_or_else(|| Error::HandleNotFound {
                selector: settings.handle_selector.clone(),
                root: describe(&*tree, root),
            })?;

        if let Some(owner) = self.by_element.get(&handle).and_then(|id| self.get(*id)) {
            return Err(Error::HandleInUse {
                handle: describe(&*tree, &handle),
                owner: owner.id().to_string(),
            });
        }

        let is_expanded = tree.has_class(root, &settings.expanded_class);

        let instance = InstanceId(self.instances.len());
        let id = match tree.attribute(root, "id").filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let id = self.fallback_id(tree);
                tree.set_attribute(root, "id", &id);
                id
            }
        };
        if tree.attribute(&handle, "id").is_none_or(|h| h.is_empty()) {
            tree.set_attribute(&handle, "id", &format!("{id}-handle"));
        }

        let mut controller =
            Expandible::new(id, root.clone(), handle.clone(), is_expanded, settings);
        controller.bind(tree);
        log::debug!(
            "[expandible] created {} {:?} handle={:?} expanded={}",
            controller.id(),
            root,
            handle,
            is_expanded
        );

        self.instances.push(controller);
        self.by_element.insert(root.clone(), instance);
        self.by_element.insert(handle, instance);
        Ok(instance)
    }

    /// Create controllers for every element under `scope` matching
    /// `selector` (or [`DEFAULT_ROOT_SELECTOR`]). Elements that fail are
    /// reported and skipped.
    pub fn init_all(
        &mut self,
        tree: &mut T,
        scope: &T::Node,
        selector: Option<&str>,
        options: &Options,
    ) -> Result<InitReport<T::Node>> {
        let selector = selector.unwrap_or(DEFAULT_ROOT_SELECTOR);
        let roots = tree
            .query_selector_all(scope, selector)
            .map_err(|e| Error::InvalidSelector {
                selector: selector.to_string(),
                source: Box::new(e),
            })?;

        let mut report = InitReport {
            created: Vec::new(),
            failed: Vec::new(),
        };
        for root in roots {
            match self.create(tree, &root, options) {
                Ok(id) => report.created.push(id),
                Err(e) => {
                    log::warn!("[expandible] skipping {root:?}: {e}");
                    report.failed.push((root, e));
                }
            }
        }
        Ok(report)
    }

    /// Unbind a controller and release its elements.
    pub fn destroy(&mut self, tree: &mut T, instance: InstanceId) -> Result<()> {
        let controller = self.live_mut(instance)?;
        controller.unbind(tree);
        log::debug!("[expandible] destroyed {}", controller.id());
        self.by_element.retain(|_, id| *id != instance);
        Ok(())
    }

    pub fn get(&self, instance: InstanceId) -> Option<&Controller<T>> {
        self.instances.get(instance.0)
    }

    /// Controller whose root or handle is `node`.
    pub fn find_by_element(&self, node: &T::Node) -> Option<InstanceId> {
        self.by_element.get(node).copied()
    }

    /// Controller by its string id.
    pub fn find_by_id(&self, id: &str) -> Option<InstanceId> {
        self.instances
            .iter()
            .position(|c| !c.is_destroyed() && c.id() == id)
            .map(InstanceId)
    }

    pub fn toggle(
        &mut self,
        tree: &mut T,
        instance: InstanceId,
        target: Option<bool>,
    ) -> Result<bool> {
        Ok(self.live_mut(instance)?.toggle(tree, target))
    }

    pub fn open(&mut self, tree: &mut T, instance: InstanceId) -> Result<bool> {
        Ok(self.live_mut(instance)?.open(tree))
    }

    pub fn close(&mut self, tree: &mut T, instance: InstanceId) -> Result<bool> {
        Ok(self.live_mut(instance)?.close(tree))
    }

    /// Route a host event to the controllers subscribed to it.
    pub fn handle_event(&mut self, tree: &mut T, event: &T::Event) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let Some(interaction) = tree.interaction(event) else {
            return outcome;
        };

        // Collected up front; subscriptions dropped by an earlier action in
        // this dispatch no longer resolve below and are skipped.
        for subscription in tree.subscribers(event) {
            let Some((index, action)) = self
                .instances
                .iter()
                .enumerate()
                .find_map(|(i, c)| c.action_for(subscription).map(|a| (i, a)))
            else {
                log::trace!("[expandible] skipping detached {subscription:?}");
                continue;
            };
            let Some(controller) = self.instances.get_mut(index) else {
                continue;
            };

            let effect = controller.run(tree, action, &interaction);
            outcome.default_prevented |= effect.prevent_default;
            if effect.changed {
                outcome.transitions.push(Transition {
                    instance: InstanceId(index),
                    expanded: controller.is_expanded(),
                });
            }
        }

        outcome
    }

    /// Number of controllers ever created, destroyed ones included.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Live controllers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &Controller<T>)> {
        self.instances
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_destroyed())
            .map(|(i, c)| (InstanceId(i), c))
    }

    /// `expendible-<n>` with `n` the registry length after registration,
    /// counting up past ids the tree or a live controller already uses.
    fn fallback_id(&self, tree: &T) -> String {
        let document = tree.document();
        let mut n = self.instances.len() + 1;
        loop {
            let id = format!("{FALLBACK_ID_PREFIX}-{n}");
            let selector = format!("[id=\"{id}\"]");
            let taken = self.find_by_id(&id).is_some()
                || tree.attribute(&document, "id").as_deref() == Some(id.as_str())
                || matches!(tree.query_selector(&document, &selector), Ok(Some(_)));
            if !taken {
                return id;
            }
            log::debug!("[expandible] fallback id {id} is taken");
            n += 1;
        }
    }

    fn live_mut(&mut self, instance: InstanceId) -> Result<&mut Controller<T>> {
        self.instances
            .get_mut(instance.0)
            .filter(|c| !c.is_destroyed())
            .ok_or(Error::UnknownController(instance))
    }
}

impl<T: PresentationTree> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PresentationTree> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("instances", &self.instances)
            .finish_non_exhaustive()
    }
}

fn describe<T: PresentationTree>(tree: &T, node: &T::Node) -> String {
    match tree.attribute(node, "id") {
        Some(id) if !id.is_empty() => format!("#{id}"),
        _ => format!("{node:?}"),
    }
}
