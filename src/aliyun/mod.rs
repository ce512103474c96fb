//! Alibaba Cloud ECS provider.
//!
//! [`EcsClient`] implements [`ComputeApi`] against the ECS RPC endpoint:
//! each operation becomes one signed GET request, successful bodies decode
//! into the wire types, and non-success bodies surface as business faults.

mod rpc;
mod types;

use std::sync::LazyLock;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::{
    ApiError, ApiFuture, ComputeApi, InstanceStatus, LaunchRequest, UNKNOWN_SERVER_FAULT_CODE,
};
use crate::config::{ConfigError, EcsConfig};
use types::{CreateInstancesResponse, DescribeInstancesResponse, FaultBody};

/// Timeout applied to every ECS HTTP request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size sent with `DescribeInstances` so one page covers the largest
/// batch a single launch may create.
const DESCRIBE_PAGE_SIZE: &str = "100";

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Signed HTTP client for one ECS region.
#[derive(Clone, Debug)]
pub struct EcsClient {
    access_key_id: String,
    access_key_secret: String,
    region_id: String,
    endpoint: String,
}

impl EcsClient {
    /// Builds a client from the configured credentials and endpoint.
    ///
    /// Launch-only fields stay unchecked here so status queries work from a
    /// credentials-only configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a credential is unset.
    pub fn new(config: &EcsConfig) -> Result<Self, ConfigError> {
        config.validate_credentials()?;
        Ok(Self {
            access_key_id: config.access_key_id.clone(),
            access_key_secret: config.access_key_secret.clone(),
            region_id: config.region_id.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
        })
    }

    /// Sends one signed RPC call and decodes the response body.
    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        action_params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let query = rpc::signed_query(
            action,
            action_params,
            &self.access_key_id,
            &self.access_key_secret,
            &self.region_id,
        )?;
        let url = format!("{}/?{}", self.endpoint, query);

        let response = HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::connection(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::connection(err.to_string()))?;

        if status.is_success() {
            serde_json::from_slice(&body).map_err(|err| ApiError::Unexpected {
                message: format!("undecodable {action} response: {err}"),
            })
        } else {
            Err(fault_from_body(&body))
        }
    }
}

/// Interprets a non-success response body as a business fault.
///
/// Bodies that do not carry the documented fault shape are reported under
/// [`UNKNOWN_SERVER_FAULT_CODE`] with the raw text as the message.
fn fault_from_body(body: &[u8]) -> ApiError {
    serde_json::from_slice::<FaultBody>(body).map_or_else(
        |_| {
            ApiError::business(
                UNKNOWN_SERVER_FAULT_CODE,
                String::from_utf8_lossy(body).into_owned(),
                None,
            )
        },
        |fault| ApiError::business(fault.code, fault.message, fault.request_id),
    )
}

/// Flattens a launch request into `RunInstances` wire parameters.
fn create_parameters(request: &LaunchRequest) -> Vec<(String, String)> {
    vec![
        (String::from("ZoneId"), request.zone_id.clone()),
        (String::from("ImageId"), request.image_id.clone()),
        (
            String::from("SecurityGroupId"),
            request.security_group_id.clone(),
        ),
        (String::from("VSwitchId"), request.vswitch_id.clone()),
        (String::from("InstanceType"), request.instance_type.clone()),
        (String::from("InstanceName"), request.instance_name.clone()),
        (String::from("Amount"), request.amount.to_string()),
        (
            String::from("InstanceChargeType"),
            request.instance_charge_type.clone(),
        ),
        (String::from("Period"), request.period.to_string()),
        (String::from("PeriodUnit"), request.period_unit.clone()),
        (
            String::from("InternetChargeType"),
            request.internet_charge_type.clone(),
        ),
        (
            String::from("InternetMaxBandwidthOut"),
            request.internet_max_bandwidth_out.to_string(),
        ),
        (String::from("IoOptimized"), request.io_optimized.clone()),
        (String::from("KeyPairName"), request.key_pair_name.clone()),
        (
            String::from("SystemDisk.Size"),
            request.system_disk_size.to_string(),
        ),
        (
            String::from("SystemDisk.Category"),
            request.system_disk_category.clone(),
        ),
        (String::from("DryRun"), request.dry_run.to_string()),
    ]
}

/// Builds `DescribeInstances` parameters scoped to the given identifiers.
fn describe_parameters(instance_ids: &[String]) -> Result<Vec<(String, String)>, ApiError> {
    let ids = serde_json::to_string(instance_ids).map_err(|err| ApiError::Unexpected {
        message: format!("instance id list not serialisable: {err}"),
    })?;
    Ok(vec![
        (String::from("InstanceIds"), ids),
        (String::from("PageSize"), String::from(DESCRIBE_PAGE_SIZE)),
    ])
}

impl ComputeApi for EcsClient {
    fn create_instances<'a>(&'a self, request: &'a LaunchRequest) -> ApiFuture<'a, Vec<String>> {
        Box::pin(async move {
            let params = create_parameters(request);
            let response: CreateInstancesResponse = self.call("RunInstances", &params).await?;
            Ok(response.instance_id_sets.instance_id_set)
        })
    }

    fn describe_instances<'a>(
        &'a self,
        instance_ids: &'a [String],
    ) -> ApiFuture<'a, Vec<InstanceStatus>> {
        Box::pin(async move {
            let params = describe_parameters(instance_ids)?;
            let response: DescribeInstancesResponse =
                self.call("DescribeInstances", &params).await?;
            Ok(response
                .instances
                .instance
                .into_iter()
                .map(|record| InstanceStatus {
                    id: record.instance_id,
                    status: record.status,
                })
                .collect())
        })
    }
}
