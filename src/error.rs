/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for router location, resolution and documentation rendering
#[derive(Debug)]
pub enum Error {
    /// A non-default API version was requested
    UnsupportedVersion(String),
    /// Router configuration is missing, malformed or references something unknown
    Configuration(String),
    /// A nesting segment or the final route segment has no match
    NotFound(String),
    /// The UI access policy rejected the caller
    PermissionDenied,
    IoError(std::io::Error),
    SerializationError(String),
}

impl Error {
    /// HTTP status code the error is surfaced as
    pub fn status_code(&self) -> u16 {
        match self {
            Error::UnsupportedVersion(_) => 501,
            Error::NotFound(_) => 404,
            Error::PermissionDenied => 403,
            Error::Configuration(_) | Error::IoError(_) | Error::SerializationError(_) => 500,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound(path.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::UnsupportedVersion(version) => {
                write!(f, "API version '{}' is not supported", version)
            }
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::NotFound(path) => write!(f, "No resource registered at '{}'", path),
            Error::PermissionDenied => write!(f, "Permission denied"),
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML: {}", err))
    }
}
