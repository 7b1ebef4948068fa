//! Application context and the local synthesis boundary.
//!
//! Stacks register CloudFormation-shaped resources against an [`App`]; a
//! single synthesis pass then writes one `<stack>.template.json` per stack
//! into an output directory. Synthesis is the only step that touches the
//! filesystem outside configuration loading, and it is skipped entirely on
//! dry runs.

use crate::core::error::TemplateError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// One provisioned resource: a CloudFormation type tag plus its properties.
#[derive(Debug, Clone, Serialize)]
pub struct CfnResource {
    #[serde(rename = "Type")]
    pub resource_type: String,

    #[serde(rename = "Properties")]
    pub properties: Value,
}

/// A fully defined stack: its name and resources keyed by logical id.
#[derive(Debug, Clone)]
pub struct StackArtifact {
    pub name: String,
    pub resources: IndexMap<String, CfnResource>,
}

impl StackArtifact {
    /// Render the stack as a template document body.
    pub fn template_body(&self) -> Value {
        json!({ "Resources": self.resources })
    }
}

/// Synthesis failure: a template document could not be written.
#[derive(Debug, Error)]
#[error("unable to write template {path}: {reason}")]
pub struct SynthError {
    pub path: String,
    pub reason: String,
}

impl From<SynthError> for TemplateError {
    fn from(e: SynthError) -> Self {
        Self::new(e.to_string())
    }
}

/// The shared application context for one provisioning run.
///
/// Holds the derived unique identifier and every stack committed so far.
/// Stacks are committed whole: a stack that fails mid-definition never
/// appears here.
#[derive(Debug)]
pub struct App {
    unique_id: String,
    stacks: Vec<StackArtifact>,
}

impl App {
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            stacks: Vec::new(),
        }
    }

    /// The identifier namespacing every resource in this run.
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Stacks committed so far, in definition order.
    pub fn stacks(&self) -> &[StackArtifact] {
        &self.stacks
    }

    pub(crate) fn commit_stack(&mut self, name: &str, resources: IndexMap<String, CfnResource>) {
        self.stacks.push(StackArtifact {
            name: name.to_string(),
            resources,
        });
    }

    /// Write one template document per stack into `out_dir`.
    ///
    /// Returns the written paths in stack definition order.
    pub fn synth(&self, out_dir: &Path) -> Result<Vec<PathBuf>, SynthError> {
        std::fs::create_dir_all(out_dir).map_err(|e| SynthError {
            path: out_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut written = Vec::with_capacity(self.stacks.len());
        for stack in &self.stacks {
            let path = out_dir.join(format!("{}.template.json", stack.name));
            let body = serde_json::to_string_pretty(&stack.template_body()).map_err(|e| {
                SynthError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            std::fs::write(&path, body).map_err(|e| SynthError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            info!(stack = %stack.name, path = %path.display(), "synthesized template");
            written.push(path);
        }

        Ok(written)
    }
}
