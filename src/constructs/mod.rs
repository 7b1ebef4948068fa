//! Shared sub-constructs wired into stacks by composition.
//!
//! A construct registers its own resources against the owning stack's
//! context and hands back references the stack threads into further
//! resources. Constructs never share mutable state between stacks.

use crate::stacks::StackContext;
use serde_json::{json, Value};

/// A REST API with a greedy `{proxy+}` resource under its root.
///
/// Defined once per owning stack; the returned references are wired into
/// method resources by the caller.
#[derive(Debug, Clone)]
pub struct RestApiWithProxy {
    /// Reference to the REST API id.
    pub rest_api: Value,
    /// Reference to the proxy resource id.
    pub proxy_resource: Value,
}

impl RestApiWithProxy {
    pub fn define(ctx: &mut StackContext<'_>) -> Self {
        ctx.add_resource(
            "RestApi",
            "AWS::ApiGateway::RestApi",
            json!({ "Name": ctx.unique_id() }),
        );

        ctx.add_resource(
            "ProxyResource",
            "AWS::ApiGateway::Resource",
            json!({
                "RestApiId": { "Ref": "RestApi" },
                "ParentId": { "Fn::GetAtt": ["RestApi", "RootResourceId"] },
                "PathPart": "{proxy+}"
            }),
        );

        Self {
            rest_api: json!({ "Ref": "RestApi" }),
            proxy_resource: json!({ "Ref": "ProxyResource" }),
        }
    }
}
