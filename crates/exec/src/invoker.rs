//! Builds argument vectors and launches the external tool.
//!
//! Arguments are always passed as a vector; nothing goes through a shell.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};
use xmlsec_core::{XmlSecConfig, XmlSecError, XmlSecResult};

/// Pseudo-file the tool reads the document from.
pub const STDIN_PATH: &str = "/dev/stdin";
/// Pseudo-file the tool writes its result to.
pub const STDOUT_PATH: &str = "/dev/stdout";

/// Which stream(s) the classifier inspects when the tool fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSource {
    /// Standard error only
    Stderr,
    /// Standard output and standard error, newline-joined
    Combined,
}

/// One invocation of the tool, minus the document bytes.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    Sign {
        private_key: &'a Path,
        id_attribute: &'a str,
    },
    Verify {
        certificate: &'a Path,
        id_attribute: &'a str,
    },
    Encrypt {
        session_key: &'a str,
        certificate: &'a Path,
        template: &'a Path,
    },
    Decrypt {
        private_key: &'a Path,
    },
}

impl Operation<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sign { .. } => "sign",
            Self::Verify { .. } => "verify",
            Self::Encrypt { .. } => "encrypt",
            Self::Decrypt { .. } => "decrypt",
        }
    }

    pub fn diagnostic_source(&self) -> DiagnosticSource {
        match self {
            // Verification details land on either stream depending on verbosity
            Self::Verify { .. } => DiagnosticSource::Combined,
            _ => DiagnosticSource::Stderr,
        }
    }

    /// The exact argument vector for this operation. Order matters.
    pub fn arguments(&self, config: &XmlSecConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(10);
        match self {
            Self::Sign {
                private_key,
                id_attribute,
            } => {
                args.push("--sign".into());
                args.push("--privkey-pem".into());
                args.push(private_key.as_os_str().to_owned());
                args.push(config.id_attr_flag.as_str().into());
                args.push((*id_attribute).into());
                args.push("--output".into());
                args.push(STDOUT_PATH.into());
                args.push(STDIN_PATH.into());
            }
            Self::Verify {
                certificate,
                id_attribute,
            } => {
                args.push("--verify".into());
                args.push("--pubkey-cert-pem".into());
                args.push(certificate.as_os_str().to_owned());
                args.push(config.id_attr_flag.as_str().into());
                args.push((*id_attribute).into());
                args.push(STDIN_PATH.into());
            }
            Self::Encrypt {
                session_key,
                certificate,
                template,
            } => {
                args.push("--encrypt".into());
                args.push("--session-key".into());
                args.push((*session_key).into());
                args.push("--pubkey-cert-pem".into());
                args.push(certificate.as_os_str().to_owned());
                args.push("--output".into());
                args.push(STDOUT_PATH.into());
                args.push("--xml-data".into());
                args.push(STDIN_PATH.into());
                args.push(template.as_os_str().to_owned());
            }
            Self::Decrypt { private_key } => {
                args.push("--decrypt".into());
                args.push("--privkey-pem".into());
                args.push(private_key.as_os_str().to_owned());
                args.push("--output".into());
                args.push(STDOUT_PATH.into());
                args.push(STDIN_PATH.into());
            }
        }
        args
    }
}

/// The program to execute.
///
/// With a cleared environment the child has no `PATH`, so a bare binary
/// name is resolved against `search_path` (the caller's `PATH`) first.
/// Names that cannot be resolved are passed through and fail at spawn.
pub fn resolve_program(config: &XmlSecConfig, search_path: Option<OsString>) -> PathBuf {
    let bare = config.binary.components().count() == 1 && !config.binary.is_absolute();
    if !(config.env_clear && bare) {
        return config.binary.clone();
    }

    let cwd = std::env::current_dir().unwrap_or_default();
    match which::which_in(&config.binary, search_path, cwd) {
        Ok(resolved) => {
            tracing::debug!(
                binary = %config.binary_name(),
                resolved = %resolved.display(),
                "resolved binary before clearing environment"
            );
            resolved
        }
        Err(e) => {
            tracing::warn!(binary = %config.binary_name(), error = %e, "binary not found on PATH");
            config.binary.clone()
        }
    }
}

/// Spawn the tool for `operation` with all three standard streams piped.
///
/// Does not wait for the child. A spawn failure is returned as
/// [`XmlSecError::Launch`] and no handle is produced.
pub fn launch(config: &XmlSecConfig, operation: &Operation<'_>) -> XmlSecResult<Child> {
    let program = resolve_program(config, std::env::var_os("PATH"));
    let mut command = Command::new(&program);
    command
        .args(operation.arguments(config))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if config.env_clear {
        command.env_clear();
    }

    let child = command.spawn().map_err(|source| {
        tracing::error!(
            binary = %config.binary_name(),
            operation = operation.name(),
            error = %source,
            "failed to launch xmlsec tool"
        );
        XmlSecError::Launch {
            binary: config.binary_name(),
            source,
        }
    })?;

    tracing::debug!(
        binary = %config.binary_name(),
        operation = operation.name(),
        pid = ?child.id(),
        "launched xmlsec tool"
    );

    Ok(child)
}
