//! Relational database stack: a security group with CIDR-scoped ingress
//! and the database instance itself.
//!
//! Reads the widest spread of property shapes of any built-in stack —
//! plain strings, a boolean (`rds_multi_az`), and a comma-joined list
//! (`availability_zones`).

use super::{Stack, StackContext};
use crate::core::error::PropError;
use serde_json::json;

const DB_PORT: u16 = 3306;

#[derive(Debug)]
pub struct RelationalStack;

impl Stack for RelationalStack {
    fn name(&self) -> &str {
        "relational"
    }

    fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError> {
        let uid = ctx.unique_id().to_string();
        let props = ctx.props();

        let vpc_id = props.get_string("vpc_id")?;
        let availability_zones = props.get_string_list("availability_zones")?;
        let admin_cidr = props.get_string("admin_cidr")?;
        let vpc_cidr = props.get_string("vpc_cidr")?;
        let storage = props.get_string("rds_storage")?;
        let instance_class = props.get_string("rds_instance_class")?;
        let subnet_group = props.get_string("rds_subnet_group")?;
        let engine = props.get_string("rds_engine")?;
        let engine_version = props.get_string("rds_engine_version")?;
        let multi_az = props.get_bool("rds_multi_az")?;

        ctx.add_resource(
            "DatabaseSecurityGroup",
            "AWS::EC2::SecurityGroup",
            json!({
                "GroupName": uid,
                "GroupDescription": uid,
                "VpcId": vpc_id,
                "SecurityGroupIngress": [
                    { "IpProtocol": "tcp", "FromPort": DB_PORT, "ToPort": DB_PORT, "CidrIp": admin_cidr },
                    { "IpProtocol": "tcp", "FromPort": DB_PORT, "ToPort": DB_PORT, "CidrIp": vpc_cidr }
                ],
                "SecurityGroupEgress": [
                    { "IpProtocol": "-1", "CidrIp": "0.0.0.0/0" }
                ]
            }),
        );

        ctx.add_resource(
            "DatabaseInstance",
            "AWS::RDS::DBInstance",
            json!({
                "DBInstanceIdentifier": uid,
                "AllocatedStorage": storage,
                "StorageType": "gp2",
                "DBInstanceClass": instance_class,
                "DBSubnetGroupName": subnet_group,
                "Engine": engine,
                "EngineVersion": engine_version,
                "MultiAZ": multi_az,
                "AvailabilityZones": availability_zones,
                "VPCSecurityGroups": [{ "Fn::GetAtt": ["DatabaseSecurityGroup", "GroupId"] }]
            }),
        );

        Ok(())
    }
}
