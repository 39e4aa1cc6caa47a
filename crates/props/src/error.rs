use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// No resolver provides a value. Raised by a resolver, this also stops a
    /// compound chain from consulting the resolvers after it.
    #[error("Property '{name}' not found")]
    NotFound { name: String },

    #[error("Circular property dependency on '{name}'")]
    Circular { name: String },
}

impl PropertyError {
    pub fn not_found(name: impl Into<String>) -> Self {
        PropertyError::NotFound { name: name.into() }
    }
}
