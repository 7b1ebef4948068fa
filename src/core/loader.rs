//! Layered configuration loading.
//!
//! Configuration documents are flat JSON objects of string→string pairs,
//! addressed by convention at `<root>/<layer>/<selector>.json`. Layers merge
//! into the shared property set in a fixed order — environment tier, then
//! network, then application — with later layers overwriting earlier keys.
//! Optional layers with no selector are skipped; the application layer is
//! mandatory and its selector seeds `app_id` before anything is read.

use super::error::{ConfigError, PropError};
use super::props::AppProps;
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::debug;

/// Property key seeded from the application selector.
pub const APP_ID_KEY: &str = "app_id";

/// Environment-tier layer name (lowest precedence).
pub const DTAP_LAYER: &str = "dtap";

/// Network layer name.
pub const VPC_LAYER: &str = "vpc";

/// Application layer name (highest precedence, mandatory).
pub const APPLICATION_LAYER: &str = "application";

/// External selector values choosing which document each layer loads.
#[derive(Debug, Clone, Default)]
pub struct Selectors {
    /// Mandatory; selects the application layer and seeds `app_id`.
    pub application: Option<String>,
    /// Optional environment-tier selector.
    pub dtap: Option<String>,
    /// Optional network selector.
    pub vpc: Option<String>,
}

/// Loads and merges layer documents from a configuration root directory.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
}

impl ConfigLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem path for a layer document.
    pub fn document_path(&self, layer: &str, selector: &str) -> PathBuf {
        self.root.join(layer).join(format!("{selector}.json"))
    }

    /// Resolve all layers into `props`.
    ///
    /// The application selector is validated before any document is read:
    /// an absent or empty value aborts the whole load with a missing-property
    /// failure naming the application layer.
    pub fn load(&self, selectors: &Selectors, props: &mut AppProps) -> Result<(), ConfigError> {
        let application = match selectors.application.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => return Err(PropError::Missing(APPLICATION_LAYER.to_string()).into()),
        };

        // Always present, even when the application document omits it.
        props.put(APP_ID_KEY, application);

        if let Some(dtap) = non_empty(selectors.dtap.as_deref()) {
            self.load_layer(DTAP_LAYER, dtap, props)?;
            props.put(DTAP_LAYER, dtap);
        }

        if let Some(vpc) = non_empty(selectors.vpc.as_deref()) {
            self.load_layer(VPC_LAYER, vpc, props)?;
            props.put(VPC_LAYER, vpc);
        }

        self.load_layer(APPLICATION_LAYER, application, props)?;

        Ok(())
    }

    fn load_layer(
        &self,
        layer: &str,
        selector: &str,
        props: &mut AppProps,
    ) -> Result<(), ConfigError> {
        let path = self.document_path(layer, selector);
        let location = format!("{layer}/{selector}.json");

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Load {
            location: location.clone(),
            reason: e.to_string(),
        })?;

        // Parse failures are not distinguished from I/O failures here.
        let document: IndexMap<String, String> =
            serde_json::from_str(&content).map_err(|e| ConfigError::Load {
                location: location.clone(),
                reason: e.to_string(),
            })?;

        debug!(layer, selector, keys = document.len(), "merged configuration layer");
        for (key, value) in document {
            props.put(key, value);
        }

        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
