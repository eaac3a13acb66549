use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while declaring or constructing DTOs
///
/// The taxonomy is flat and every variant carries its message.
#[derive(Error, Debug)]
pub enum Error {
    /// No fields are declared for the DTO type being constructed
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// A required value is absent and neither a default nor a callback supplied one
    #[error("Missing property: {0}")]
    MissingProperty(String),

    /// A present value failed its type or shape check
    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    /// A declaration-time misuse, such as an unnamed field or an unusable nested type
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Converting a constructed DTO into a caller-defined serde type failed
    #[error("Conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),
}

/// Discriminant of [`Error`] for callers that only care about the category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::Mapping`]
    Mapping,
    /// See [`Error::MissingProperty`]
    MissingProperty,
    /// See [`Error::InvalidProperty`]
    InvalidProperty,
    /// See [`Error::InvalidArgument`]
    InvalidArgument,
    /// See [`Error::Conversion`]
    Conversion,
}

impl Error {
    /// The category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Mapping(_) => ErrorKind::Mapping,
            Self::MissingProperty(_) => ErrorKind::MissingProperty,
            Self::InvalidProperty(_) => ErrorKind::InvalidProperty,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Conversion(_) => ErrorKind::Conversion,
        }
    }

    pub(crate) fn missing_property(key: &str) -> Self {
        Self::MissingProperty(format!("Required property \"{key}\" is missing"))
    }
}
