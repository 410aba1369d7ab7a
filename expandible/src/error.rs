//! Error types.

use thiserror::Error;

use crate::registry::InstanceId;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the registry.
///
/// Everything except `UnknownController` is a configuration error and is
/// reported at construction time.
#[derive(Debug, Error)]
pub enum Error {
    /// No descendant of the root matches the handle selector.
    #[error("no handle matching {selector:?} inside {root}")]
    HandleNotFound { selector: String, root: String },

    /// The handle selector could not be parsed by the host.
    #[error("invalid handle selector {selector:?}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The root element is already managed by this registry.
    #[error("{root} is already expandible")]
    AlreadyInitialized { root: String },

    /// The handle found for a new root already belongs to another
    /// expandible, e.g. when roots are nested.
    #[error("handle {handle} already belongs to {owner}")]
    HandleInUse { handle: String, owner: String },

    /// The id does not belong to this registry, or was destroyed.
    #[error("unknown expandible {0}")]
    UnknownController(InstanceId),
}
