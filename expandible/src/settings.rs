//! Option layering for expandible regions.
//!
//! Effective settings are resolved with this precedence, highest first:
//!
//! 1. [`Options`] supplied by the caller
//! 2. `data-expandible-*` attributes on the root element
//! 3. Built-in defaults
//!
//! Only `open_on_focus` and `close_on_blur` have an attribute layer.

use serde::Deserialize;

pub const DEFAULT_HANDLE_SELECTOR: &str = "[data-expandible-toggle]";
pub const DEFAULT_ENHANCED_CLASS: &str = "is-expandible";
pub const DEFAULT_EXPANDED_CLASS: &str = "is-expanded";

pub const OPEN_ON_FOCUS_ATTR: &str = "data-expandible-open-on-focus";
pub const CLOSE_ON_BLUR_ATTR: &str = "data-expandible-close-on-blur";

/// Caller-supplied options. Unset fields fall through to the lower layers.
///
/// Deserializes from camelCase keys (`handleSelector`, `openOnFocus`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    pub handle_selector: Option<String>,
    pub enhanced_class: Option<String>,
    pub expanded_class: Option<String>,
    pub open_on_focus: Option<bool>,
    pub close_on_blur: Option<bool>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_selector(mut self, selector: impl Into<String>) -> Self {
        self.handle_selector = Some(selector.into());
        self
    }

    pub fn enhanced_class(mut self, class: impl Into<String>) -> Self {
        self.enhanced_class = Some(class.into());
        self
    }

    pub fn expanded_class(mut self, class: impl Into<String>) -> Self {
        self.expanded_class = Some(class.into());
        self
    }

    pub fn open_on_focus(mut self, enabled: bool) -> Self {
        self.open_on_focus = Some(enabled);
        self
    }

    pub fn close_on_blur(mut self, enabled: bool) -> Self {
        self.close_on_blur = Some(enabled);
        self
    }
}

/// Resolved settings, fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub handle_selector: String,
    pub enhanced_class: String,
    pub expanded_class: String,
    pub open_on_focus: bool,
    pub close_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            handle_selector: DEFAULT_HANDLE_SELECTOR.to_string(),
            enhanced_class: DEFAULT_ENHANCED_CLASS.to_string(),
            expanded_class: DEFAULT_EXPANDED_CLASS.to_string(),
            open_on_focus: false,
            close_on_blur: false,
        }
    }
}

impl Settings {
    /// Layer `options` over the root's attributes over the defaults.
    ///
    /// `attribute` reads an attribute of the root element by name.
    pub fn resolve<F>(options: &Options, attribute: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            handle_selector: options
                .handle_selector
                .clone()
                .unwrap_or(defaults.handle_selector),
            enhanced_class: options
                .enhanced_class
                .clone()
                .unwrap_or(defaults.enhanced_class),
            expanded_class: options
                .expanded_class
                .clone()
                .unwrap_or(defaults.expanded_class),
            open_on_focus: options
                .open_on_focus
                .or_else(|| attribute(OPEN_ON_FOCUS_ATTR).map(|v| parse_flag(&v)))
                .unwrap_or(defaults.open_on_focus),
            close_on_blur: options
                .close_on_blur
                .or_else(|| attribute(CLOSE_ON_BLUR_ATTR).map(|v| parse_flag(&v)))
                .unwrap_or(defaults.close_on_blur),
        }
    }
}

/// Interpret a present flag attribute. Any non-empty value enables the flag,
/// `"false"` and `"0"` included; a bare attribute leaves it off.
pub fn parse_flag(value: &str) -> bool {
    !value.is_empty()
}
