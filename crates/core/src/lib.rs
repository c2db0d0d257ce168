//! Core types shared by the xmlsec process wrapper.
//!
//! This crate provides the error taxonomy, configuration and logging setup
//! used across the workspace.

pub mod config;
pub mod error;
pub mod logging;

pub use config::XmlSecConfig;
pub use error::{ErrorKind, XmlSecError, XmlSecResult};
