#![forbid(unsafe_code)]

//! Garden error type.

/// Errors produced while configuring or building a garden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GardenError {
    /// No element matched the container selector.
    ContainerNotFound {
        /// Selector that was queried.
        selector: String,
    },
    /// Configuration failed validation.
    InvalidConfig(&'static str),
    /// Configuration JSON could not be decoded.
    ConfigParse(String),
    /// The host failed to apply a mutation.
    Host(String),
}

impl GardenError {
    /// Whether this error is the expected "no container on this page" case.
    #[must_use]
    pub const fn is_missing_container(&self) -> bool {
        matches!(self, Self::ContainerNotFound { .. })
    }
}

impl core::fmt::Display for GardenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ContainerNotFound { selector } => {
                write!(f, "garden container not found: {selector}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid garden config: {msg}"),
            Self::ConfigParse(msg) => write!(f, "failed to parse garden config: {msg}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for GardenError {}

impl From<serde_json::Error> for GardenError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
