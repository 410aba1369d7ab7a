//! Accessible disclosure regions ("expandibles") over a presentation tree.
//!
//! A root element gets a handle descendant that toggles it open and closed,
//! with the ARIA attributes screen readers expect. Controllers live in a
//! [`Registry`] owned by the host, which also routes host events to them.
//!
//! ```
//! use expandible::{Options, Registry};
//! use tuidom::{Document, Element, Event};
//!
//! let mut doc = Document::new(
//!     Element::col().key("doc").child(
//!         Element::box_()
//!             .key("faq")
//!             .child(Element::text("Question").key("q").attr("data-expandible-toggle", "")),
//!     ),
//! );
//! let mut registry = Registry::new();
//! let faq = registry.create(&mut doc, &"faq".to_string(), &Options::new()).unwrap();
//!
//! registry.handle_event(&mut doc, &Event::click("q"));
//! assert!(registry.get(faq).unwrap().is_expanded());
//! ```

mod controller;
pub mod error;
mod host;
pub mod registry;
pub mod settings;
pub mod tree;

pub use controller::Expandible;
pub use error::{Error, Result};
pub use registry::{EventOutcome, InitReport, InstanceId, Registry, Transition};
pub use settings::{Options, Settings};
pub use tree::{Interaction, KeyInput, PresentationTree, Trigger};
