//! Configuration loading via `ortho-config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::api::LaunchRequest;

/// Alibaba Cloud specific configuration derived from environment variables,
/// configuration files, and CLI flags.
///
/// Defaults mirror the provider's entry-level instance profile so a minimal
/// configuration only has to supply credentials, network identifiers, and
/// naming.
///
/// Required fields load as empty strings when no source provides them, so
/// absence is reported by validation with remediation guidance rather than
/// by the loader.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "ALIBABA_CLOUD")]
pub struct EcsConfig {
    /// Access key identifier for the account or RAM user. Required.
    #[ortho_config(default = String::new())]
    pub access_key_id: String,
    /// Secret paired with the access key. Required.
    #[ortho_config(default = String::new())]
    pub access_key_secret: String,
    /// Region hosting the instances. Defaults to `cn-beijing`.
    #[ortho_config(default = "cn-beijing".to_owned())]
    pub region_id: String,
    /// API endpoint the client signs requests against.
    #[ortho_config(default = "https://ecs.aliyuncs.com".to_owned())]
    pub endpoint: String,
    /// Availability zone, where `random` lets the provider choose.
    #[ortho_config(default = "random".to_owned())]
    pub zone_id: String,
    /// Image identifier for the system disk. Required.
    #[ortho_config(default = String::new())]
    pub image_id: String,
    /// Security group the instances join. Required.
    #[ortho_config(default = String::new())]
    pub security_group_id: String,
    /// VSwitch the instances join. Required.
    #[ortho_config(default = String::new())]
    pub vswitch_id: String,
    /// Commercial instance type.
    #[ortho_config(default = "ecs.t5-lc2m1.nano".to_owned())]
    pub instance_type: String,
    /// Display name applied to the created instances. Required.
    #[ortho_config(default = String::new())]
    pub instance_name: String,
    /// Number of instances to create per run.
    #[ortho_config(default = 1)]
    pub amount: u32,
    /// Billing method for the instances.
    #[ortho_config(default = "PostPaid".to_owned())]
    pub instance_charge_type: String,
    /// Subscription length for prepaid billing.
    #[ortho_config(default = 1)]
    pub period: u32,
    /// Unit for `period`.
    #[ortho_config(default = "Hourly".to_owned())]
    pub period_unit: String,
    /// Billing method for public traffic.
    #[ortho_config(default = "PayByTraffic".to_owned())]
    pub internet_charge_type: String,
    /// Public egress bandwidth cap in Mbit/s.
    #[ortho_config(default = 5)]
    pub internet_max_bandwidth_out: u32,
    /// Whether to request an I/O optimised instance.
    #[ortho_config(default = "optimized".to_owned())]
    pub io_optimized: String,
    /// Name of the key pair bound to the instances. Required.
    #[ortho_config(default = String::new())]
    pub key_pair_name: String,
    /// System disk size in GiB.
    #[ortho_config(default = 40)]
    pub system_disk_size: u32,
    /// System disk category.
    #[ortho_config(default = "cloud_efficiency".to_owned())]
    pub system_disk_category: String,
    /// Ask the provider to validate the request without creating instances.
    #[ortho_config(default = false)]
    pub dry_run: bool,
    /// Seconds between status polls while waiting for instances to boot.
    #[ortho_config(default = 3)]
    pub poll_interval_secs: u64,
    /// Wall-clock budget in seconds for the whole boot watch.
    #[ortho_config(default = 180)]
    pub poll_timeout_secs: u64,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
    section: &'static str,
}

impl FieldMetadata {
    const fn new(
        description: &'static str,
        env_var: &'static str,
        toml_key: &'static str,
        section: &'static str,
    ) -> Self {
        Self {
            description,
            env_var,
            toml_key,
            section,
        }
    }
}

impl EcsConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to [{}] in yunti.toml",
                metadata.description, metadata.env_var, metadata.toml_key, metadata.section
            )));
        }
        Ok(())
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags in
    /// that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("yunti")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds a [`LaunchRequest`] from the configured values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required launch option is
    /// empty.
    pub fn as_request(&self) -> Result<LaunchRequest, ConfigError> {
        self.validate_launch()?;
        Ok(LaunchRequest::builder()
            .zone_id(&self.zone_id)
            .image_id(&self.image_id)
            .security_group_id(&self.security_group_id)
            .vswitch_id(&self.vswitch_id)
            .instance_type(&self.instance_type)
            .instance_name(&self.instance_name)
            .amount(self.amount)
            .instance_charge_type(&self.instance_charge_type)
            .period(self.period)
            .period_unit(&self.period_unit)
            .internet_charge_type(&self.internet_charge_type)
            .internet_max_bandwidth_out(self.internet_max_bandwidth_out)
            .io_optimized(&self.io_optimized)
            .key_pair_name(&self.key_pair_name)
            .system_disk_size(self.system_disk_size)
            .system_disk_category(&self.system_disk_category)
            .dry_run(self.dry_run)
            .build())
    }

    /// Interval between status polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Wall-clock budget for the boot watch.
    #[must_use]
    pub const fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// Performs semantic validation on all required fields. Error messages
    /// include guidance on how to provide missing values via environment
    /// variables or configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_credentials()?;
        self.validate_launch()
    }

    /// Checks the credential fields every signed API call needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a credential is empty.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.access_key_id,
            &FieldMetadata::new(
                "Alibaba Cloud access key ID",
                "ALIBABA_CLOUD_ACCESS_KEY_ID",
                "access_key_id",
                "aliyun",
            ),
        )?;
        Self::require_field(
            &self.access_key_secret,
            &FieldMetadata::new(
                "Alibaba Cloud access key secret",
                "ALIBABA_CLOUD_ACCESS_KEY_SECRET",
                "access_key_secret",
                "aliyun",
            ),
        )
    }

    /// Checks the fields a launch request consumes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a launch field is empty.
    pub fn validate_launch(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.image_id,
            &FieldMetadata::new("image ID", "ALIBABA_CLOUD_IMAGE_ID", "image_id", "aliyun"),
        )?;
        Self::require_field(
            &self.security_group_id,
            &FieldMetadata::new(
                "security group ID",
                "ALIBABA_CLOUD_SECURITY_GROUP_ID",
                "security_group_id",
                "aliyun",
            ),
        )?;
        Self::require_field(
            &self.vswitch_id,
            &FieldMetadata::new(
                "VSwitch ID",
                "ALIBABA_CLOUD_VSWITCH_ID",
                "vswitch_id",
                "aliyun",
            ),
        )?;
        Self::require_field(
            &self.instance_name,
            &FieldMetadata::new(
                "instance name",
                "ALIBABA_CLOUD_INSTANCE_NAME",
                "instance_name",
                "aliyun",
            ),
        )?;
        Self::require_field(
            &self.key_pair_name,
            &FieldMetadata::new(
                "key pair name",
                "ALIBABA_CLOUD_KEY_PAIR_NAME",
                "key_pair_name",
                "aliyun",
            ),
        )?;
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
