//! Wire types for ECS RPC responses.

use serde::Deserialize;

/// Body returned by a successful `RunInstances` call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct CreateInstancesResponse {
    pub(super) instance_id_sets: InstanceIdSets,
}

/// Wrapper around the created instance identifiers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct InstanceIdSets {
    pub(super) instance_id_set: Vec<String>,
}

/// Body returned by a successful `DescribeInstances` call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DescribeInstancesResponse {
    pub(super) instances: Instances,
}

/// Wrapper around the described instance records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Instances {
    pub(super) instance: Vec<InstanceRecord>,
}

/// One instance as reported by `DescribeInstances`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct InstanceRecord {
    pub(super) instance_id: String,
    pub(super) status: String,
}

/// Error body returned alongside a non-success HTTP status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct FaultBody {
    pub(super) code: String,
    pub(super) message: String,
    pub(super) request_id: Option<String>,
}
