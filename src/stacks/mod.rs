//! Stack contract and definition boundary.
//!
//! A stack is one cohesive group of cloud resources for one logical concern.
//! Implementations provide a single [`Stack::define_resources`] hook; the
//! [`define`] boundary invokes it exactly once, staging resources into a
//! fresh set and committing them to the application context only on success.
//! Any property failure raised inside the hook is re-signaled as a
//! [`StackError`] carrying the stack name and the original message.

pub mod compute;
pub mod relational;
pub mod storage;
pub mod table;

use crate::core::error::{PropError, StackError};
use crate::core::props::AppProps;
use crate::synth::{App, CfnResource};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::info;

/// A unit that defines cloud resources from resolved configuration.
pub trait Stack {
    /// Human-readable stack name, used for the artifact and its template file.
    fn name(&self) -> &str;

    /// Define every resource in this stack.
    ///
    /// Runs exactly once. Property reads may fail; the boundary wraps any
    /// failure into a [`StackError`] and discards everything staged so far.
    fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError>;
}

/// Definition-time view handed to a stack: the resolved properties, the
/// derived unique identifier, and the staging set for its resources.
#[derive(Debug)]
pub struct StackContext<'a> {
    props: &'a AppProps,
    unique_id: &'a str,
    resources: IndexMap<String, CfnResource>,
}

impl<'a> StackContext<'a> {
    /// The resolved configuration (read-only).
    pub fn props(&self) -> &AppProps {
        self.props
    }

    /// The identifier namespacing every resource name in this run.
    pub fn unique_id(&self) -> &str {
        self.unique_id
    }

    /// Register one resource under a logical id.
    pub fn add_resource(
        &mut self,
        logical_id: impl Into<String>,
        resource_type: impl Into<String>,
        properties: Value,
    ) {
        self.resources.insert(
            logical_id.into(),
            CfnResource {
                resource_type: resource_type.into(),
                properties,
            },
        );
    }
}

/// Run a stack's definition hook against the application context.
///
/// On success the staged resources are committed whole; on failure nothing
/// is committed and the error names the stack and the originating message.
pub fn define(app: &mut App, props: &AppProps, stack: &dyn Stack) -> Result<(), StackError> {
    let unique_id = app.unique_id().to_string();
    let mut ctx = StackContext {
        props,
        unique_id: &unique_id,
        resources: IndexMap::new(),
    };

    stack
        .define_resources(&mut ctx)
        .map_err(|e| StackError::new(stack.name(), e))?;

    info!(stack = stack.name(), resources = ctx.resources.len(), "stack defined");
    app.commit_stack(stack.name(), ctx.resources);
    Ok(())
}

/// All built-in stacks, in their conventional definition order.
pub fn builtin_stacks() -> Vec<Box<dyn Stack>> {
    vec![
        Box::new(storage::StorageStack),
        Box::new(table::TableStack),
        Box::new(relational::RelationalStack),
        Box::new(compute::WebServiceStack),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NeedsKey;

    impl Stack for NeedsKey {
        fn name(&self) -> &str {
            "needs-key"
        }

        fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError> {
            ctx.add_resource("First", "AWS::S3::Bucket", json!({"BucketName": "staged"}));
            let value = ctx.props().get_string("absent_key")?;
            ctx.add_resource("Second", "AWS::S3::Bucket", json!({"BucketName": value}));
            Ok(())
        }
    }

    struct TwoBuckets;

    impl Stack for TwoBuckets {
        fn name(&self) -> &str {
            "two-buckets"
        }

        fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError> {
            let uid = ctx.unique_id().to_string();
            ctx.add_resource("A", "AWS::S3::Bucket", json!({"BucketName": uid.clone()}));
            ctx.add_resource("B", "AWS::S3::Bucket", json!({"BucketName": format!("{uid}-web")}));
            Ok(())
        }
    }

    #[test]
    fn successful_stack_commits_all_resources() {
        let mut app = App::new("shop-staging");
        let props = AppProps::new();
        define(&mut app, &props, &TwoBuckets).unwrap();

        assert_eq!(app.stacks().len(), 1);
        let artifact = &app.stacks()[0];
        assert_eq!(artifact.name, "two-buckets");
        assert_eq!(artifact.resources.len(), 2);
        assert_eq!(
            artifact.resources["A"].properties["BucketName"],
            "shop-staging"
        );
    }

    #[test]
    fn failed_stack_commits_nothing() {
        let mut app = App::new("shop");
        let props = AppProps::new();
        let err = define(&mut app, &props, &NeedsKey).unwrap_err();

        assert!(app.stacks().is_empty(), "partial resources must be discarded");
        assert_eq!(err.stack, "needs-key");
        assert!(err.to_string().contains("missing property: absent_key"));
    }

    #[test]
    fn builtin_stacks_keep_conventional_order() {
        let names: Vec<_> = builtin_stacks().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["storage", "table", "relational", "web-service"]);
    }
}
