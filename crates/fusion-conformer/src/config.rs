//! Conformer configuration.
//!
//! Every field has a default that reproduces the Fusion conventions, so an
//! empty JSON object is a valid configuration.

use crate::error::OptionsError;
use fusion_emitter::PrintOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConformOptions {
    /// Base class of every conformed page, as written in source.
    pub page_base_class: String,
    /// Trait mixed into procedurally written pages.
    pub procedural_trait: String,
    /// Method that holds the procedural statements.
    pub procedural_method: String,
    pub server_only_attribute: String,
    pub expose_attribute: String,
    pub discovered_props_property: String,
    /// Namespace prefix for classes named after their destination.
    pub generated_namespace: String,
    /// Directory whose subdirectories become namespace segments.
    pub destination_root: Option<PathBuf>,
    /// Lines of the doc comment placed above the generated namespace.
    pub file_header: Vec<String>,
    pub print: PrintOptions,
}

impl Default for ConformOptions {
    fn default() -> Self {
        ConformOptions {
            page_base_class: "\\Fusion\\FusionPage".to_string(),
            procedural_trait: "\\Fusion\\Concerns\\IsProceduralPage".to_string(),
            procedural_method: "runProceduralCode".to_string(),
            server_only_attribute: "\\Fusion\\Attributes\\ServerOnly".to_string(),
            expose_attribute: "\\Fusion\\Attributes\\Expose".to_string(),
            discovered_props_property: "discoveredProps".to_string(),
            generated_namespace: "Fusion\\Generated".to_string(),
            destination_root: None,
            file_header: vec![
                "This file was automatically generated by Fusion.".to_string(),
                "You should not edit it.".to_string(),
            ],
            print: PrintOptions::default(),
        }
    }
}

impl ConformOptions {
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
