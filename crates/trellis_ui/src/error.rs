//! # UI Error Types
//!
//! Errors raised while loading resources or mutating the widget tree.

use std::path::PathBuf;

use thiserror::Error;
use trellis_render::RenderError;

use crate::widget::WidgetId;

/// Errors that can occur in the toolkit.
#[derive(Error, Debug)]
pub enum UiError {
    /// The style file could not be read.
    #[error("cannot read style file {path}: {source}")]
    StyleIo {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The style file is not valid JSON.
    #[error("malformed style file: {0}")]
    StyleJson(#[from] serde_json::Error),

    /// The style file parsed but lacks required data.
    #[error("invalid style file: {0}")]
    InvalidStyle(String),

    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    ConfigIo {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),

    /// The config parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No widget with this id is alive.
    #[error("widget not found: {0}")]
    WidgetNotFound(WidgetId),

    /// Children can only be added to panels.
    #[error("widget {0} is not a container")]
    NotAContainer(WidgetId),

    /// Re-parenting would make a widget its own ancestor.
    #[error("moving widget {child} under {parent} would create a cycle")]
    CyclicParent {
        /// Widget being moved.
        child: WidgetId,
        /// Requested parent.
        parent: WidgetId,
    },

    /// A registry handle is already in use.
    #[error("a UI instance is already registered for this handle")]
    DuplicateHandle,

    /// The draw layer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for toolkit operations.
pub type UiResult<T> = Result<T, UiError>;
