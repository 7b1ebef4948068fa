//! Object storage stack: a versioned artifact bucket and a static-site
//! bucket with website hosting and CORS.

use super::{Stack, StackContext};
use crate::core::error::PropError;
use serde_json::json;

#[derive(Debug)]
pub struct StorageStack;

impl Stack for StorageStack {
    fn name(&self) -> &str {
        "storage"
    }

    fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError> {
        let uid = ctx.unique_id().to_string();

        ctx.add_resource(
            "VersionedBucket",
            "AWS::S3::Bucket",
            json!({
                "BucketName": uid,
                "VersioningConfiguration": { "Status": "Enabled" }
            }),
        );

        ctx.add_resource(
            "StaticHostBucket",
            "AWS::S3::Bucket",
            json!({
                "BucketName": format!("{uid}-web"),
                "WebsiteConfiguration": {
                    "IndexDocument": "index.html",
                    "ErrorDocument": "error.html"
                },
                "CorsConfiguration": {
                    "CorsRules": [{
                        "AllowedHeaders": ["Authorization"],
                        "AllowedMethods": ["GET"],
                        "AllowedOrigins": ["*"],
                        "MaxAge": 3000
                    }]
                }
            }),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::props::AppProps;
    use crate::stacks::define;
    use crate::synth::App;

    #[test]
    fn names_buckets_from_unique_id() {
        let mut app = App::new("shop-staging");
        define(&mut app, &AppProps::new(), &StorageStack).unwrap();

        let resources = &app.stacks()[0].resources;
        assert_eq!(
            resources["VersionedBucket"].properties["BucketName"],
            "shop-staging"
        );
        assert_eq!(
            resources["StaticHostBucket"].properties["BucketName"],
            "shop-staging-web"
        );
    }

    #[test]
    fn static_host_bucket_serves_a_website() {
        let mut app = App::new("shop");
        define(&mut app, &AppProps::new(), &StorageStack).unwrap();

        let bucket = &app.stacks()[0].resources["StaticHostBucket"];
        assert_eq!(
            bucket.properties["WebsiteConfiguration"]["IndexDocument"],
            "index.html"
        );
        assert_eq!(
            bucket.properties["CorsConfiguration"]["CorsRules"][0]["AllowedMethods"][0],
            "GET"
        );
    }
}
