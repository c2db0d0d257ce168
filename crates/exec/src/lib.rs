//! XML signing and encryption through the `xmlsec1` command-line tool.
//!
//! The cryptography happens in the external tool. This crate builds its
//! invocations, pumps documents through its standard streams and classifies
//! the outcome into [`XmlSecError`] variants callers can branch on.

pub mod algorithm;
pub mod classify;
pub mod invoker;
pub mod ops;
pub mod pump;
pub mod staging;
pub mod template;

pub use algorithm::SessionKey;
pub use ops::{decrypt, encrypt, sign, verify, XmlSec};
pub use template::EncryptedData;
pub use xmlsec_core::{ErrorKind, XmlSecConfig, XmlSecError, XmlSecResult};
