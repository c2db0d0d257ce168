//! Algorithm identifiers used in XML Encryption templates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const XMLENC_NS: &str = "http://www.w3.org/2001/04/xmlenc#";
pub const DSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// `Type` attribute value for element-level encryption.
pub const TYPE_ELEMENT: &str = "http://www.w3.org/2001/04/xmlenc#Element";
/// `Type` attribute value for content-level encryption.
pub const TYPE_CONTENT: &str = "http://www.w3.org/2001/04/xmlenc#Content";

// Data encryption
pub const AES128_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes128-cbc";
pub const AES192_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes192-cbc";
pub const AES256_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes256-cbc";
pub const AES128_GCM: &str = "http://www.w3.org/2009/xmlenc11#aes128-gcm";
pub const AES256_GCM: &str = "http://www.w3.org/2009/xmlenc11#aes256-gcm";
pub const TRIPLEDES_CBC: &str = "http://www.w3.org/2001/04/xmlenc#tripledes-cbc";

// Key transport
pub const RSA_1_5: &str = "http://www.w3.org/2001/04/xmlenc#rsa-1_5";
pub const RSA_OAEP_MGF1P: &str = "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p";

// Digest
pub const SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";
pub const SHA256: &str = "http://www.w3.org/2001/04/xmlenc#sha256";

pub const DEFAULT_DATA_ENCRYPTION_METHOD: &str = AES128_CBC;
pub const DEFAULT_KEY_TRANSPORT_METHOD: &str = RSA_OAEP_MGF1P;

/// Session key names accepted by the tool's `--session-key` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Aes128,
    Aes192,
    Aes256,
    Des192,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown session key algorithm: {0}")]
pub struct UnknownSessionKey(pub String);

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes128 => "aes-128",
            Self::Aes192 => "aes-192",
            Self::Aes256 => "aes-256",
            Self::Des192 => "des-192",
        }
    }

    /// The CBC data encryption method matching this session key.
    pub fn data_encryption_method(&self) -> &'static str {
        match self {
            Self::Aes128 => AES128_CBC,
            Self::Aes192 => AES192_CBC,
            Self::Aes256 => AES256_CBC,
            Self::Des192 => TRIPLEDES_CBC,
        }
    }

    /// The XML Encryption 1.1 GCM method for this key size, if one exists.
    pub fn gcm_data_encryption_method(&self) -> Option<&'static str> {
        match self {
            Self::Aes128 => Some(AES128_GCM),
            Self::Aes256 => Some(AES256_GCM),
            Self::Aes192 | Self::Des192 => None,
        }
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKey {
    type Err = UnknownSessionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aes-128" => Ok(Self::Aes128),
            "aes-192" => Ok(Self::Aes192),
            "aes-256" => Ok(Self::Aes256),
            "des-192" => Ok(Self::Des192),
            other => Err(UnknownSessionKey(other.to_string())),
        }
    }
}
