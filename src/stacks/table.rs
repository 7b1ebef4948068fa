//! NoSQL table stack.

use super::{Stack, StackContext};
use crate::core::error::PropError;
use serde_json::json;

#[derive(Debug)]
pub struct TableStack;

impl Stack for TableStack {
    fn name(&self) -> &str {
        "table"
    }

    fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError> {
        ctx.add_resource(
            "Table",
            "AWS::DynamoDB::Table",
            json!({
                "TableName": ctx.unique_id(),
                "ProvisionedThroughput": {
                    "ReadCapacityUnits": 1,
                    "WriteCapacityUnits": 1
                }
            }),
        );

        Ok(())
    }
}
