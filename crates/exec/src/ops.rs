//! Sign, Verify, Encrypt and Decrypt.
//!
//! Each call owns one child process and its buffers; nothing is shared
//! between calls. There is no built-in timeout: wrap the future in
//! `tokio::time::timeout` and the child is killed and reaped when the future
//! is dropped.

use std::path::Path;

use tracing::Instrument;
use xmlsec_core::{XmlSecConfig, XmlSecResult};

use crate::classify;
use crate::invoker::{self, Operation};
use crate::pump;
use crate::staging;
use crate::template::EncryptedData;

/// Runs xmlsec operations with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct XmlSec {
    config: XmlSecConfig,
}

impl XmlSec {
    pub fn new(config: XmlSecConfig) -> Self {
        Self { config }
    }

    /// Configuration from the environment (see [`XmlSecConfig::from_env`]).
    pub fn from_env() -> Self {
        Self::new(XmlSecConfig::from_env())
    }

    pub fn config(&self) -> &XmlSecConfig {
        &self.config
    }

    async fn execute(&self, operation: Operation<'_>, input: &[u8]) -> XmlSecResult<Vec<u8>> {
        let span = tracing::info_span!("xmlsec", operation = operation.name());
        async move {
            let child = invoker::launch(&self.config, &operation)?;
            let output = pump::pump(child, input).await?;
            let result = classify::classify(output, operation.diagnostic_source());
            if let Ok(out) = &result {
                tracing::info!(output_bytes = out.len(), "operation succeeded");
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Sign `document`, a template carrying an empty `Signature`, with the PEM
    /// private key at `private_key`. `id_attribute` names the element whose
    /// `ID` attribute signature references resolve against.
    pub async fn sign(
        &self,
        document: &[u8],
        private_key: impl AsRef<Path>,
        id_attribute: &str,
    ) -> XmlSecResult<Vec<u8>> {
        self.execute(
            Operation::Sign {
                private_key: private_key.as_ref(),
                id_attribute,
            },
            document,
        )
        .await
    }

    /// Verify the signature on `document` against the PEM certificate.
    pub async fn verify(
        &self,
        document: &[u8],
        certificate: impl AsRef<Path>,
        id_attribute: &str,
    ) -> XmlSecResult<()> {
        self.execute(
            Operation::Verify {
                certificate: certificate.as_ref(),
                id_attribute,
            },
            document,
        )
        .await
        .map(|_| ())
    }

    /// Encrypt `document` into `template` for the holder of `certificate`.
    ///
    /// The template is staged to a transient file that is removed before
    /// this returns, whatever the outcome.
    pub async fn encrypt(
        &self,
        template: &EncryptedData,
        document: &[u8],
        certificate: impl AsRef<Path>,
        session_key: impl AsRef<str>,
    ) -> XmlSecResult<Vec<u8>> {
        let staged = staging::stage(template, self.config.temp_dir.as_deref())?;
        let result = self
            .execute(
                Operation::Encrypt {
                    session_key: session_key.as_ref(),
                    certificate: certificate.as_ref(),
                    template: staged.path(),
                },
                document,
            )
            .await;
        drop(staged);
        result
    }

    /// Decrypt `document` with the PEM private key.
    pub async fn decrypt(
        &self,
        document: &[u8],
        private_key: impl AsRef<Path>,
    ) -> XmlSecResult<Vec<u8>> {
        self.execute(
            Operation::Decrypt {
                private_key: private_key.as_ref(),
            },
            document,
        )
        .await
    }
}

/// [`XmlSec::sign`] with the environment configuration.
pub async fn sign(
    document: &[u8],
    private_key: impl AsRef<Path>,
    id_attribute: &str,
) -> XmlSecResult<Vec<u8>> {
    XmlSec::from_env()
        .sign(document, private_key, id_attribute)
        .await
}

/// [`XmlSec::verify`] with the environment configuration.
pub async fn verify(
    document: &[u8],
    certificate: impl AsRef<Path>,
    id_attribute: &str,
) -> XmlSecResult<()> {
    XmlSec::from_env()
        .verify(document, certificate, id_attribute)
        .await
}

/// [`XmlSec::encrypt`] with the environment configuration.
pub async fn encrypt(
    template: &EncryptedData,
    document: &[u8],
    certificate: impl AsRef<Path>,
    session_key: impl AsRef<str>,
) -> XmlSecResult<Vec<u8>> {
    XmlSec::from_env()
        .encrypt(template, document, certificate, session_key)
        .await
}

/// [`XmlSec::decrypt`] with the environment configuration.
pub async fn decrypt(document: &[u8], private_key: impl AsRef<Path>) -> XmlSecResult<Vec<u8>> {
    XmlSec::from_env().decrypt(document, private_key).await
}
