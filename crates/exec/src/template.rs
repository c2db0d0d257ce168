//! XML Encryption template model.
//!
//! An [`EncryptedData`] value describes the skeleton the tool fills in:
//! algorithms are set, cipher values and key material are left empty.

use serde::Serialize;
use xmlsec_core::{XmlSecError, XmlSecResult};

use crate::algorithm::{
    DEFAULT_DATA_ENCRYPTION_METHOD, DEFAULT_KEY_TRANSPORT_METHOD, DSIG_NS, RSA_OAEP_MGF1P, SHA1,
    TYPE_ELEMENT, XMLENC_NS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "EncryptedData")]
pub struct EncryptedData {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@Type")]
    pub data_type: String,
    #[serde(rename = "EncryptionMethod")]
    pub encryption_method: EncryptionMethod,
    #[serde(rename = "KeyInfo", skip_serializing_if = "Option::is_none")]
    pub key_info: Option<KeyInfo>,
    #[serde(rename = "CipherData")]
    pub cipher_data: CipherData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptionMethod {
    #[serde(rename = "@Algorithm")]
    pub algorithm: String,
    #[serde(rename = "DigestMethod", skip_serializing_if = "Option::is_none")]
    pub digest_method: Option<DigestMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestMethod {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@Algorithm")]
    pub algorithm: String,
}

/// `ds:KeyInfo`, holding either a wrapped session key or certificate data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "EncryptedKey", skip_serializing_if = "Option::is_none")]
    pub encrypted_key: Option<Box<EncryptedKey>>,
    #[serde(rename = "X509Data", skip_serializing_if = "Option::is_none")]
    pub x509_data: Option<X509Data>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptedKey {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "EncryptionMethod")]
    pub encryption_method: EncryptionMethod,
    #[serde(rename = "KeyInfo", skip_serializing_if = "Option::is_none")]
    pub key_info: Option<KeyInfo>,
    #[serde(rename = "CipherData")]
    pub cipher_data: CipherData,
}

/// Placeholder the tool fills with the recipient certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct X509Data {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CipherData {
    #[serde(rename = "CipherValue")]
    pub cipher_value: String,
}

impl EncryptionMethod {
    pub fn new(algorithm: impl Into<String>) -> Self {
        let algorithm = algorithm.into();
        // OAEP key transport carries its digest explicitly
        let digest_method = (algorithm == RSA_OAEP_MGF1P).then(|| DigestMethod::new(SHA1));
        Self {
            algorithm,
            digest_method,
        }
    }
}

impl DigestMethod {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            xmlns: DSIG_NS,
            algorithm: algorithm.into(),
        }
    }
}

impl KeyInfo {
    pub fn with_encrypted_key(key: EncryptedKey) -> Self {
        Self {
            xmlns: DSIG_NS,
            encrypted_key: Some(Box::new(key)),
            x509_data: None,
        }
    }

    pub fn with_x509_data() -> Self {
        Self {
            xmlns: DSIG_NS,
            encrypted_key: None,
            x509_data: Some(X509Data::default()),
        }
    }
}

impl EncryptedKey {
    /// Session key wrapped for the holder of the certificate given to the tool.
    pub fn new(key_transport_method: impl Into<String>) -> Self {
        Self {
            xmlns: XMLENC_NS,
            encryption_method: EncryptionMethod::new(key_transport_method),
            key_info: Some(KeyInfo::with_x509_data()),
            cipher_data: CipherData::default(),
        }
    }
}

impl EncryptedData {
    /// Element-level template encrypting data with `data_method` under a
    /// session key transported with `key_transport_method`.
    pub fn new(data_method: impl Into<String>, key_transport_method: impl Into<String>) -> Self {
        Self {
            xmlns: XMLENC_NS,
            id: None,
            data_type: TYPE_ELEMENT.to_string(),
            encryption_method: EncryptionMethod::new(data_method),
            key_info: Some(KeyInfo::with_encrypted_key(EncryptedKey::new(
                key_transport_method,
            ))),
            cipher_data: CipherData::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the digest used by OAEP key transport, e.g. with
    /// [`SHA256`](crate::algorithm::SHA256). No effect for other transports.
    pub fn with_key_transport_digest(mut self, digest: impl Into<String>) -> Self {
        let method = self
            .key_info
            .as_mut()
            .and_then(|info| info.encrypted_key.as_mut())
            .map(|key| &mut key.encryption_method);
        if let Some(method) = method {
            if method.digest_method.is_some() {
                method.digest_method = Some(DigestMethod::new(digest));
            }
        }
        self
    }

    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Serialize to an indented XML document.
    pub fn to_xml(&self) -> XmlSecResult<String> {
        let mut xml = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut xml);
        serializer.indent('\t', 1);
        self.serialize(serializer)
            .map_err(|e| XmlSecError::Template(e.to_string()))?;
        Ok(xml)
    }
}

impl Default for EncryptedData {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_ENCRYPTION_METHOD, DEFAULT_KEY_TRANSPORT_METHOD)
    }
}
