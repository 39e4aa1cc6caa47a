use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("XML serialization error: {0}")]
    Serialize(String),

    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
