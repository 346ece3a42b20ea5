//! Error types for the memory cache
//!
//! Lookups of absent keys are not errors; every cache operation is total over
//! its inputs. The variants here cover misuse of the blocking API, a runtime
//! that went away underneath the cache, and bad configuration.

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error type for cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A blocking call was made from inside an exclusive operation or an
    /// event hook. Waiting here would never return because the exclusive
    /// context cannot release until the caller does.
    #[error("blocking '{operation}' called from inside the cache's exclusive context")]
    ReentrantBlockingCall { operation: &'static str },

    /// A blocking call was made from a thread driving a tokio runtime.
    #[error("blocking '{operation}' called from within an async runtime; await the completion instead")]
    BlockingInAsyncContext { operation: &'static str },

    /// The dispatcher shut down before the operation completed
    #[error("cache operation '{operation}' was dropped before completing")]
    Closed { operation: &'static str },

    /// The background runtime could not be started
    #[error("failed to start cache runtime: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl CacheError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error reports a forbidden call pattern rather than a
    /// runtime failure
    #[must_use]
    pub const fn is_usage_violation(&self) -> bool {
        matches!(
            self,
            Self::ReentrantBlockingCall { .. } | Self::BlockingInAsyncContext { .. }
        )
    }

    /// The operation the error was raised for, if any
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::ReentrantBlockingCall { operation }
            | Self::BlockingInAsyncContext { operation }
            | Self::Closed { operation } => Some(operation),
            Self::Runtime { .. } | Self::Configuration { .. } => None,
        }
    }
}
