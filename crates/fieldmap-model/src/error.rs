use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("required name `{0}` is missing or empty")]
    MissingName(&'static str),
    #[error("name `{name}` contains the row key separator `::`")]
    RowKeySeparator { name: String },
    #[error("`{0}` is a tracked attribute and cannot be set as an extension")]
    ReservedKey(String),
    #[error("attribute `{0}` is read-only")]
    ReadOnly(&'static str),
    #[error("attribute `{key}` expects a {expected} value")]
    AttributeType { key: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
