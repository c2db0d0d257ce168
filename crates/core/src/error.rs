//! Error taxonomy for xmlsec operations.
//!
//! Certificate failures get their own variants so callers can apply policy
//! (for example accepting self-signed certificates in development) without
//! re-parsing the tool's diagnostic text.

use thiserror::Error;

/// Coarse classification of an [`XmlSecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The external tool could not be started
    ProcessLaunchFailure,
    /// A pipe to or from the tool failed
    StreamIoFailure,
    /// The tool rejected a self-signed certificate
    SelfSignedCertificate,
    /// The tool could not find the issuer of a certificate
    UnknownIssuer,
    /// Any other failure
    Generic,
}

/// Errors that can occur while driving the external xmlsec tool.
#[derive(Debug, Error)]
pub enum XmlSecError {
    /// The tool binary is missing or could not be spawned
    #[error("failed to launch {binary}: {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing to or reading from one of the child's pipes failed
    #[error("stream I/O failure on {stream}: {source}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Diagnostics reported a self-signed certificate
    #[error("{0}")]
    SelfSignedCertificate(String),

    /// Diagnostics reported an unknown certificate issuer
    #[error("{0}")]
    UnknownIssuer(String),

    /// Nonzero exit with unrecognised diagnostics, or a bare exit status
    #[error("{0}")]
    Generic(String),

    /// The encryption template could not be serialized
    #[error("template serialization failed: {0}")]
    Template(String),

    /// Staging I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl XmlSecError {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Launch { .. } => ErrorKind::ProcessLaunchFailure,
            Self::StreamIo { .. } => ErrorKind::StreamIoFailure,
            Self::SelfSignedCertificate(_) => ErrorKind::SelfSignedCertificate,
            Self::UnknownIssuer(_) => ErrorKind::UnknownIssuer,
            Self::Generic(_) | Self::Template(_) | Self::Io(_) | Self::Config(_) => {
                ErrorKind::Generic
            }
        }
    }

    /// True for the two certificate-related classifications.
    pub fn is_certificate_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::SelfSignedCertificate | ErrorKind::UnknownIssuer
        )
    }

    /// The diagnostic text captured from the tool, if this error carries one.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::SelfSignedCertificate(msg) | Self::UnknownIssuer(msg) | Self::Generic(msg) => {
                Some(msg)
            }
            _ => None,
        }
    }
}

/// Result type for xmlsec operations.
pub type XmlSecResult<T> = Result<T, XmlSecError>;
