use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombineError {
    #[error("Invalid value '{value}' for attribute '{attribute}' on element <{element}>")]
    InvalidPolicy {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("No configuration layers were combined")]
    NoInput,

    #[error("Layer {layer} removed the root element <{tag}>")]
    RootRemoved { layer: usize, tag: String },
}
