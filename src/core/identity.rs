//! Per-environment identity derivation.
//!
//! Every resource a stack defines is namespaced by a single identifier
//! derived from the resolved properties, so distinct application/environment
//! combinations never collide on resource names.

use super::error::PropError;
use super::loader::{APP_ID_KEY, DTAP_LAYER};
use super::props::AppProps;

/// Derive the unique identifier for this run.
///
/// A pure function of the property set: `<app_id>-<dtap>` when an
/// environment tier was selected, `<app_id>` alone otherwise. Fails only
/// when `app_id` itself is absent.
pub fn unique_id(props: &AppProps) -> Result<String, PropError> {
    let app_id = props.get_string(APP_ID_KEY)?;
    Ok(match props.get(DTAP_LAYER) {
        Some(dtap) if !dtap.is_empty() => format!("{app_id}-{dtap}"),
        _ => app_id,
    })
}
