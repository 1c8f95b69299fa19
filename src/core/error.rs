//! Error types for the reference injector

use thiserror::Error;

/// Errors raised by the injector and the plugin host.
#[derive(Debug, Error)]
pub enum InjectorError {
    /// `transform` ran before `config_resolved`.
    #[error("plugin used before config_resolved captured the project root")]
    NotInitialized,

    /// `config_resolved` ran twice for the same session.
    #[error("plugin already initialized for this build session")]
    AlreadyInitialized,

    /// An include/exclude pattern could not be compiled.
    #[error("invalid filter pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The project root could not be made absolute.
    #[error("cannot resolve project root: {0}")]
    Root(#[from] std::io::Error),

    /// The reference resolver callback failed.
    #[error("reference resolver failed for `{id}`")]
    Resolver {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type InjectorResult<T> = Result<T, InjectorError>;
