//! Web service stack: an application role and instance profile, an
//! elastic-compute application/environment pair, and an API gateway proxy
//! in front of it.
//!
//! The REST API and its proxy resource come from the shared
//! [`RestApiWithProxy`] construct; this stack wires the returned references
//! into the method resource.

use super::{Stack, StackContext};
use crate::constructs::RestApiWithProxy;
use crate::core::error::PropError;
use crate::policy::{self, Effect};
use serde_json::json;

#[derive(Debug)]
pub struct WebServiceStack;

impl Stack for WebServiceStack {
    fn name(&self) -> &str {
        "web-service"
    }

    fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError> {
        let uid = ctx.unique_id().to_string();
        let solution_stack = ctx.props().get_string("solution_stack")?;
        let instance_type = ctx.props().get_string("instance_type")?;
        let keypair = ctx.props().get_string("keypair")?;
        let bastion_sg = ctx.props().get_string("bastion_sg")?;
        let vpc_id = ctx.props().get_string("vpc_id")?;

        let table_access = policy::policy_document(vec![policy::policy_statement(
            Effect::Allow,
            &["dynamodb:*"],
            &["*"],
        )]);

        ctx.add_resource(
            "ApplicationRole",
            "AWS::IAM::Role",
            json!({
                "RoleName": uid,
                "Path": "/",
                "AssumeRolePolicyDocument": policy::service_trust_policy("ec2.amazonaws.com"),
                "Policies": [{ "PolicyName": "TableAccess", "PolicyDocument": table_access }]
            }),
        );

        ctx.add_resource(
            "ApplicationInstanceProfile",
            "AWS::IAM::InstanceProfile",
            json!({
                "InstanceProfileName": uid,
                "Path": "/",
                "Roles": [{ "Ref": "ApplicationRole" }]
            }),
        );

        ctx.add_resource(
            "Application",
            "AWS::ElasticBeanstalk::Application",
            json!({ "ApplicationName": uid }),
        );

        ctx.add_resource(
            "Environment",
            "AWS::ElasticBeanstalk::Environment",
            json!({
                "EnvironmentName": uid,
                "ApplicationName": { "Ref": "Application" },
                "SolutionStackName": solution_stack,
                "CNAMEPrefix": uid,
                "OptionSettings": [
                    { "Namespace": "aws:autoscaling:asg", "OptionName": "Availability Zones", "Value": "Any 3" },
                    { "Namespace": "aws:elasticbeanstalk:environment", "OptionName": "ServiceRole", "Value": "aws-elasticbeanstalk-service-role" },
                    { "Namespace": "aws:elasticbeanstalk:healthreporting:system", "OptionName": "SystemType", "Value": "enhanced" },
                    { "Namespace": "aws:autoscaling:launchconfiguration", "OptionName": "InstanceType", "Value": instance_type },
                    { "Namespace": "aws:autoscaling:launchconfiguration", "OptionName": "EC2KeyName", "Value": keypair },
                    { "Namespace": "aws:autoscaling:launchconfiguration", "OptionName": "SSHSourceRestriction", "Value": format!("tcp,22,22,{bastion_sg}") },
                    { "Namespace": "aws:ec2:vpc", "OptionName": "VPCId", "Value": vpc_id }
                ]
            }),
        );

        let api = RestApiWithProxy::define(ctx);

        ctx.add_resource(
            "ProxyMethod",
            "AWS::ApiGateway::Method",
            json!({
                "RestApiId": api.rest_api,
                "ResourceId": api.proxy_resource,
                "HttpMethod": "ANY",
                "AuthorizationType": "NONE",
                "RequestParameters": { "method.request.path.proxy": true },
                "Integration": {
                    "IntegrationHttpMethod": "ANY",
                    "Type": "HTTP_PROXY",
                    "Uri": format!("http://{uid}.eu-west-1.elasticbeanstalk.com/{{proxy}}")
                }
            }),
        );

        Ok(())
    }
}
