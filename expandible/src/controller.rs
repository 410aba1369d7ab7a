//! A single expandible region.

use crate::settings::Settings;
use crate::tree::{Interaction, KeyInput, PresentationTree, Trigger};

/// What a subscription does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Handle pressed: flip the state.
    Toggle,
    /// Key on the handle: flip on Enter or Space.
    ToggleOnKey,
    /// Handle focused: force open.
    Open,
    /// Delegated listener: close when the interaction lands outside.
    CloseIfOutside,
}

/// Result of running an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Effect {
    pub changed: bool,
    pub prevent_default: bool,
}

/// Controller for one root/handle pair.
///
/// `is_expanded` is the single source of truth; the expanded class and
/// `aria-expanded` on the root are only ever written from it.
#[derive(Debug)]
pub struct Expandible<N, S> {
    id: String,
    root: N,
    handle: N,
    is_expanded: bool,
    settings: Settings,
    bindings: Vec<(S, Action)>,
    /// Present iff expanded with `close_on_blur`.
    watcher: Option<Vec<S>>,
    destroyed: bool,
}

impl<N, S> Expandible<N, S>
where
    N: Clone + PartialEq,
    S: Copy + PartialEq,
{
    pub(crate) fn new(
        id: String,
        root: N,
        handle: N,
        is_expanded: bool,
        settings: Settings,
    ) -> Self {
        Self {
            id,
            root,
            handle,
            is_expanded,
            settings,
            bindings: Vec::new(),
            watcher: None,
            destroyed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn handle(&self) -> &N {
        &self.handle
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the outside-interaction watcher is attached.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of live subscriptions held, bindings and watcher together.
    pub fn subscription_count(&self) -> usize {
        self.bindings.len() + self.watcher.as_ref().map_or(0, Vec::len)
    }

    /// Wire up the ARIA contract and the handle listeners.
    pub(crate) fn bind<T>(&mut self, tree: &mut T)
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        let root_id = tree.attribute(&self.root, "id").unwrap_or_default();
        let handle_id = tree.attribute(&self.handle, "id").unwrap_or_default();

        tree.set_attribute(&self.handle, "tabindex", "0");
        tree.set_attribute(&self.root, "role", "region");
        tree.set_attribute(&self.root, "aria-labelledby", &handle_id);
        tree.set_attribute(&self.root, "aria-expanded", bool_str(self.is_expanded));
        tree.set_attribute(&self.handle, "role", "button");
        tree.set_attribute(&self.handle, "aria-controls", &root_id);

        let press = tree.subscribe(&self.handle, Trigger::Press);
        self.bindings.push((press, Action::Toggle));
        let key = tree.subscribe(&self.handle, Trigger::Key);
        self.bindings.push((key, Action::ToggleOnKey));
        if self.settings.open_on_focus {
            let focus = tree.subscribe(&self.handle, Trigger::Focus);
            self.bindings.push((focus, Action::Open));
        }

        tree.add_class(&self.root, &self.settings.enhanced_class);
        // Expanded at construction: the watcher follows the usual invariant.
        if self.is_expanded && self.settings.close_on_blur {
            self.attach_watcher(tree);
        }
    }

    /// Set the state, or flip it when `target` is None. Returns the new state.
    pub fn toggle<T>(&mut self, tree: &mut T, target: Option<bool>) -> bool
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        self.detach_watcher(tree);

        let expanded = target.unwrap_or(!self.is_expanded);
        if expanded {
            tree.add_class(&self.root, &self.settings.expanded_class);
        } else {
            tree.remove_class(&self.root, &self.settings.expanded_class);
        }
        tree.set_attribute(&self.root, "aria-expanded", bool_str(expanded));
        self.is_expanded = expanded;
        log::debug!("[expandible] {} expanded={}", self.id, expanded);

        if expanded && self.settings.close_on_blur {
            self.attach_watcher(tree);
        }
        expanded
    }

    pub fn open<T>(&mut self, tree: &mut T) -> bool
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        self.toggle(tree, Some(true))
    }

    pub fn close<T>(&mut self, tree: &mut T) -> bool
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        self.toggle(tree, Some(false))
    }

    /// The action bound to `subscription`, if this controller owns it.
    pub(crate) fn action_for(&self, subscription: S) -> Option<Action> {
        if let Some((_, action)) = self.bindings.iter().find(|(s, _)| *s == subscription) {
            return Some(*action);
        }
        self.watcher
            .as_ref()
            .filter(|subs| subs.contains(&subscription))
            .map(|_| Action::CloseIfOutside)
    }

    pub(crate) fn run<T>(
        &mut self,
        tree: &mut T,
        action: Action,
        interaction: &Interaction<N>,
    ) -> Effect
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        let before = self.is_expanded;
        let mut effect = Effect::default();

        match (action, interaction.trigger) {
            (Action::Toggle, Trigger::Press) => {
                self.toggle(tree, None);
            }
            (Action::ToggleOnKey, Trigger::Key) => match interaction.key {
                KeyInput::Enter => {
                    self.toggle(tree, None);
                }
                KeyInput::Space => {
                    // Space would otherwise scroll the page.
                    effect.prevent_default = true;
                    self.toggle(tree, None);
                }
                KeyInput::Other => {}
            },
            (Action::Open, Trigger::Focus) => {
                self.open(tree);
            }
            (Action::CloseIfOutside, Trigger::Press | Trigger::Focus) => {
                let inside = interaction.target.as_ref().is_some_and(|t| {
                    tree.contains(&self.root, t) || tree.contains(&self.handle, t)
                });
                if !inside {
                    log::debug!(
                        "[expandible] {} outside interaction {:?}",
                        self.id,
                        interaction.trigger
                    );
                    self.close(tree);
                }
            }
            _ => {}
        }

        effect.changed = before != self.is_expanded;
        effect
    }

    /// Drop every subscription and the markers added by `bind`.
    pub(crate) fn unbind<T>(&mut self, tree: &mut T)
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        self.detach_watcher(tree);
        for (subscription, _) in self.bindings.drain(..) {
            tree.unsubscribe(subscription);
        }

        tree.remove_class(&self.root, &self.settings.enhanced_class);
        for name in ["role", "aria-labelledby", "aria-expanded"] {
            tree.remove_attribute(&self.root, name);
        }
        for name in ["tabindex", "role", "aria-controls"] {
            tree.remove_attribute(&self.handle, name);
        }
        self.destroyed = true;
    }

    fn attach_watcher<T>(&mut self, tree: &mut T)
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        let document = tree.document();
        let subscriptions = vec![
            tree.subscribe(&document, Trigger::Press),
            tree.subscribe(&document, Trigger::Focus),
        ];
        log::debug!("[expandible] {} watching outside interaction", self.id);
        self.watcher = Some(subscriptions);
    }

    fn detach_watcher<T>(&mut self, tree: &mut T)
    where
        T: PresentationTree<Node = N, Subscription = S>,
    {
        if let Some(subscriptions) = self.watcher.take() {
            for subscription in subscriptions {
                tree.unsubscribe(subscription);
            }
            log::debug!("[expandible] {} stopped watching", self.id);
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
