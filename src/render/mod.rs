//! Rendering of merged device configurations into provisioning documents.
//!
//! This module provides:
//! - The rendering seam ([`Renderer`])
//! - Handlebars-based rendering ([`HandlebarsRenderer`])
//! - The built-in Grandstream XML template ([`DEFAULT_TEMPLATE`])
//! - Output file naming ([`file_name_for`])

mod engine;

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

pub use engine::{
    DEFAULT_TEMPLATE, HandlebarsRenderer, comment_text, provisioning_registry, xml_escape,
};

use thiserror::Error;

use crate::settings::DeviceConfig;

/// Prefix of every generated file name.
pub const FILE_PREFIX: &str = "cfg";

/// Extension of every generated file name.
pub const FILE_EXTENSION: &str = ".xml";

/// A rendered provisioning document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// File name the document should be stored under.
    pub file_name: String,

    /// Document bytes.
    pub content: Vec<u8>,
}

/// Errors produced while rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template does not compile.
    #[error("Invalid provisioning template: {reason}")]
    Template {
        /// Reason reported by the template engine
        reason: String,
    },

    /// Rendering a compiled template failed.
    #[error("Failed to render configuration for '{mac}': {reason}")]
    Render {
        /// MAC of the device being rendered
        mac: String,
        /// Reason reported by the template engine
        reason: String,
    },
}

/// Turns a merged device configuration into a document.
///
/// Implementations must keep settings in order and place each setting's
/// comments directly above it.
pub trait Renderer {
    /// Renders `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the document cannot be produced.
    fn render(&self, config: &DeviceConfig) -> Result<RenderedDocument, RenderError>;
}

/// Returns the output file name for a device MAC: `cfg<MAC>.xml`.
///
/// The MAC is used as-is, without normalisation.
#[must_use]
pub fn file_name_for(mac: &str) -> String {
    format!("{FILE_PREFIX}{mac}{FILE_EXTENSION}")
}
