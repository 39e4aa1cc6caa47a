// src/error.rs
use layerconf_combine::CombineError;
use layerconf_props::PropertyError;
use layerconf_tree::TreeError;
use thiserror::Error;

/// Every way building a layered configuration can fail.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Reading layer failed: {0}")]
    Tree(#[from] TreeError),

    #[error("Merging layers failed: {0}")]
    Combine(#[from] CombineError),

    #[error("Resolving placeholders failed: {0}")]
    Property(#[from] PropertyError),

    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
