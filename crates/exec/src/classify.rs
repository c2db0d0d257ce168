//! Turns exit status and captured streams into a result.
//!
//! The tool's diagnostic wording is not a stable interface. Every pattern
//! lives here so the matching rules can change without touching callers.

use std::process::Output;

use xmlsec_core::{XmlSecError, XmlSecResult};

use crate::invoker::DiagnosticSource;

/// Leading token the tool prints when an operation succeeded with advisory output.
pub const OK_TOKEN: &str = "OK";
pub const SELF_SIGNED_PATTERN: &str = "self signed certificate";
pub const UNKNOWN_ISSUER_PATTERN: &str = "unable to get local issuer certificate";

const MESSAGE_PREFIX: &str = "xmlsec: ";

/// Map diagnostic text to a typed error. Case-sensitive substring match,
/// self-signed first.
pub fn match_diagnostic(text: &str) -> XmlSecError {
    let message = format!("{}{}", MESSAGE_PREFIX, text.trim());
    if message.contains(SELF_SIGNED_PATTERN) {
        XmlSecError::SelfSignedCertificate(message)
    } else if message.contains(UNKNOWN_ISSUER_PATTERN) {
        XmlSecError::UnknownIssuer(message)
    } else {
        XmlSecError::Generic(message)
    }
}

fn reports_ok(stderr: &[u8]) -> bool {
    stderr.starts_with(OK_TOKEN.as_bytes())
}

fn diagnostic_text(output: &Output, source: DiagnosticSource) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    match source {
        DiagnosticSource::Stderr => stderr.into_owned(),
        DiagnosticSource::Combined => {
            format!("{}\n{}", String::from_utf8_lossy(&output.stdout), stderr)
        }
    }
}

/// Classify a finished invocation.
///
/// Returns the captured stdout on success. Never returns output together
/// with an error.
pub fn classify(output: Output, source: DiagnosticSource) -> XmlSecResult<Vec<u8>> {
    if reports_ok(&output.stderr) {
        tracing::debug!(status = %output.status, "tool reported OK");
        return Ok(output.stdout);
    }

    if output.status.success() {
        // Verification failures sometimes arrive on a clean exit
        if source == DiagnosticSource::Combined && !output.stderr.is_empty() {
            let err = match_diagnostic(&diagnostic_text(&output, source));
            if err.is_certificate_error() {
                tracing::warn!(error = %err, "certificate failure reported on clean exit");
                return Err(err);
            }
        }
        return Ok(output.stdout);
    }

    if output.stderr.is_empty() {
        tracing::warn!(status = %output.status, "tool failed without diagnostics");
        return Err(XmlSecError::Generic(output.status.to_string()));
    }

    let err = match_diagnostic(&diagnostic_text(&output, source));
    tracing::warn!(status = %output.status, kind = ?err.kind(), "tool failed");
    Err(err)
}
