//! Scoped staging of encryption templates.
//!
//! The tool reads the template from a path, so each Encrypt call writes its
//! own uniquely named, owner-only file. [`StagedTemplate`] removes it on drop,
//! which covers normal return, `?` propagation and panic unwinding alike.

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;
use xmlsec_core::XmlSecResult;

use crate::template::EncryptedData;

const PREFIX: &str = "xmlsec";
const SUFFIX: &str = ".xml";

/// A template written to disk for the lifetime of one invocation.
#[derive(Debug)]
pub struct StagedTemplate {
    path: Option<TempPath>,
}

impl StagedTemplate {
    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for StagedTemplate {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => tracing::debug!(path = %shown, "removed staged template"),
                Err(e) => {
                    tracing::warn!(path = %shown, error = %e, "failed to remove staged template")
                }
            }
        }
    }
}

/// Serialize `template` into a fresh temporary file under `dir`, or the
/// system temp directory when `dir` is `None`.
pub fn stage(template: &EncryptedData, dir: Option<&Path>) -> XmlSecResult<StagedTemplate> {
    let xml = template.to_xml()?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(PREFIX).suffix(SUFFIX);
    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    file.write_all(xml.as_bytes())?;
    file.flush()?;

    // Close the handle; only the path is kept alive
    let path = file.into_temp_path();
    tracing::debug!(path = %path.display(), bytes = xml.len(), "staged encryption template");

    Ok(StagedTemplate { path: Some(path) })
}
