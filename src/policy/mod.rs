//! IAM policy document generation.
//!
//! Pure data shaping in the wire format the provisioning boundary expects.
//! No semantic checking of action or resource strings is performed.

use serde_json::{json, Value};
use std::fmt;

const POLICY_VERSION: &str = "2012-10-17";

/// Statement effect tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "Allow"),
            Self::Deny => write!(f, "Deny"),
        }
    }
}

/// Trust document granting `sts:AssumeRole` to a service principal.
pub fn service_trust_policy(principal: &str) -> Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [{
            "Effect": Effect::Allow.to_string(),
            "Principal": { "Service": principal },
            "Action": "sts:AssumeRole"
        }]
    })
}

/// One policy statement combining an effect, actions, and resources.
pub fn policy_statement(effect: Effect, actions: &[&str], resources: &[&str]) -> Value {
    json!({
        "Effect": effect.to_string(),
        "Action": actions,
        "Resource": resources
    })
}

/// Wrap statements into a single policy document.
pub fn policy_document(statements: Vec<Value>) -> Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": statements
    })
}
