//! Provider abstraction for creating compute instances and reading their
//! lifecycle status.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Synthetic fault code used when a request never produced a provider
/// response.
pub const CONNECTION_FAULT_CODE: &str = "SDK.HttpError";

/// Synthetic fault code used when the provider rejected a request with a
/// body that does not parse as a fault payload.
pub const UNKNOWN_SERVER_FAULT_CODE: &str = "SDK.UnknownServerError";

/// Parameters for one batch instance-creation call.
///
/// Values are passed through to the provider verbatim; the provider's API
/// contract is authoritative and nothing is validated locally.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LaunchRequest {
    /// Availability zone, or `random` to let the provider choose.
    pub zone_id: String,
    /// Image identifier for the system disk.
    pub image_id: String,
    /// Security group attached to the primary network interface.
    pub security_group_id: String,
    /// VSwitch the instances join.
    pub vswitch_id: String,
    /// Commercial instance type (for example `ecs.t5-lc2m1.nano`).
    pub instance_type: String,
    /// Display name applied to every instance in the batch.
    pub instance_name: String,
    /// Number of instances to create.
    pub amount: u32,
    /// Billing method for the instances (`PostPaid` or `PrePaid`).
    pub instance_charge_type: String,
    /// Subscription length for prepaid billing.
    pub period: u32,
    /// Unit for `period` (for example `Hourly`).
    pub period_unit: String,
    /// Billing method for public traffic.
    pub internet_charge_type: String,
    /// Public egress bandwidth cap in Mbit/s.
    pub internet_max_bandwidth_out: u32,
    /// Whether to request an I/O optimised instance.
    pub io_optimized: String,
    /// Name of the key pair bound to the instances.
    pub key_pair_name: String,
    /// System disk size in GiB.
    pub system_disk_size: u32,
    /// System disk category (for example `cloud_efficiency`).
    pub system_disk_category: String,
    /// When set, the provider validates the request without creating
    /// anything and reports the outcome as a business fault.
    pub dry_run: bool,
}

impl LaunchRequest {
    /// Starts a builder for a [`LaunchRequest`].
    #[must_use]
    pub fn builder() -> LaunchRequestBuilder {
        LaunchRequestBuilder::new()
    }
}

/// Builder for [`LaunchRequest`].
///
/// Construction never fails: field validity is the provider's contract, not
/// ours.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LaunchRequestBuilder {
    zone_id: String,
    image_id: String,
    security_group_id: String,
    vswitch_id: String,
    instance_type: String,
    instance_name: String,
    amount: u32,
    instance_charge_type: String,
    period: u32,
    period_unit: String,
    internet_charge_type: String,
    internet_max_bandwidth_out: u32,
    io_optimized: String,
    key_pair_name: String,
    system_disk_size: u32,
    system_disk_category: String,
    dry_run: bool,
}

impl LaunchRequestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the availability zone.
    #[must_use]
    pub fn zone_id(mut self, value: impl Into<String>) -> Self {
        self.zone_id = value.into();
        self
    }

    /// Sets the image identifier.
    #[must_use]
    pub fn image_id(mut self, value: impl Into<String>) -> Self {
        self.image_id = value.into();
        self
    }

    /// Sets the security group identifier.
    #[must_use]
    pub fn security_group_id(mut self, value: impl Into<String>) -> Self {
        self.security_group_id = value.into();
        self
    }

    /// Sets the VSwitch identifier.
    #[must_use]
    pub fn vswitch_id(mut self, value: impl Into<String>) -> Self {
        self.vswitch_id = value.into();
        self
    }

    /// Sets the instance type.
    #[must_use]
    pub fn instance_type(mut self, value: impl Into<String>) -> Self {
        self.instance_type = value.into();
        self
    }

    /// Sets the instance display name.
    #[must_use]
    pub fn instance_name(mut self, value: impl Into<String>) -> Self {
        self.instance_name = value.into();
        self
    }

    /// Sets how many instances to create.
    #[must_use]
    pub const fn amount(mut self, value: u32) -> Self {
        self.amount = value;
        self
    }

    /// Sets the instance billing method.
    #[must_use]
    pub fn instance_charge_type(mut self, value: impl Into<String>) -> Self {
        self.instance_charge_type = value.into();
        self
    }

    /// Sets the subscription length.
    #[must_use]
    pub const fn period(mut self, value: u32) -> Self {
        self.period = value;
        self
    }

    /// Sets the subscription period unit.
    #[must_use]
    pub fn period_unit(mut self, value: impl Into<String>) -> Self {
        self.period_unit = value.into();
        self
    }

    /// Sets the network billing method.
    #[must_use]
    pub fn internet_charge_type(mut self, value: impl Into<String>) -> Self {
        self.internet_charge_type = value.into();
        self
    }

    /// Sets the public egress bandwidth cap.
    #[must_use]
    pub const fn internet_max_bandwidth_out(mut self, value: u32) -> Self {
        self.internet_max_bandwidth_out = value;
        self
    }

    /// Sets the I/O optimisation flag value.
    #[must_use]
    pub fn io_optimized(mut self, value: impl Into<String>) -> Self {
        self.io_optimized = value.into();
        self
    }

    /// Sets the key pair name.
    #[must_use]
    pub fn key_pair_name(mut self, value: impl Into<String>) -> Self {
        self.key_pair_name = value.into();
        self
    }

    /// Sets the system disk size in GiB.
    #[must_use]
    pub const fn system_disk_size(mut self, value: u32) -> Self {
        self.system_disk_size = value;
        self
    }

    /// Sets the system disk category.
    #[must_use]
    pub fn system_disk_category(mut self, value: impl Into<String>) -> Self {
        self.system_disk_category = value.into();
        self
    }

    /// Sets the provider-side dry-run flag.
    #[must_use]
    pub const fn dry_run(mut self, value: bool) -> Self {
        self.dry_run = value;
        self
    }

    /// Builds the [`LaunchRequest`].
    #[must_use]
    pub fn build(self) -> LaunchRequest {
        LaunchRequest {
            zone_id: self.zone_id,
            image_id: self.image_id,
            security_group_id: self.security_group_id,
            vswitch_id: self.vswitch_id,
            instance_type: self.instance_type,
            instance_name: self.instance_name,
            amount: self.amount,
            instance_charge_type: self.instance_charge_type,
            period: self.period,
            period_unit: self.period_unit,
            internet_charge_type: self.internet_charge_type,
            internet_max_bandwidth_out: self.internet_max_bandwidth_out,
            io_optimized: self.io_optimized,
            key_pair_name: self.key_pair_name,
            system_disk_size: self.system_disk_size,
            system_disk_category: self.system_disk_category,
            dry_run: self.dry_run,
        }
    }
}

/// Identifier and lifecycle status pair returned by the describe operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstanceStatus {
    /// Provider-assigned instance identifier.
    pub id: String,
    /// Lifecycle status string (for example `Pending` or `Running`).
    pub status: String,
}

/// Faults raised at the provider API boundary.
///
/// All implementations share this concrete type so the two user-facing
/// fault categories are classified identically by the production client and
/// any test double.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ApiError {
    /// Transport-level failure: the request never reached the provider or
    /// no response came back.
    #[error("connection fault {code}: {message}")]
    Connection {
        /// Synthetic code identifying the transport failure class.
        code: String,
        /// Description of the underlying transport error.
        message: String,
    },
    /// Server-side rejection carrying the provider's fault payload.
    #[error("business fault {code}: {message}")]
    Business {
        /// Provider fault code (for example `InvalidAccessKeyId.NotFound`).
        code: String,
        /// Provider fault message.
        message: String,
        /// Request identifier echoed by the provider, when present.
        request_id: Option<String>,
    },
    /// Any fault that fits neither category, such as an undecodable
    /// success payload.
    #[error("unexpected fault: {message}")]
    Unexpected {
        /// Description of what went wrong.
        message: String,
    },
}

impl ApiError {
    /// Wraps a transport error under the synthetic [`CONNECTION_FAULT_CODE`].
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            code: CONNECTION_FAULT_CODE.to_owned(),
            message: message.into(),
        }
    }

    /// Builds a business fault from a provider payload.
    #[must_use]
    pub fn business(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::Business {
            code: code.into(),
            message: message.into(),
            request_id,
        }
    }
}

/// Future returned by provider operations.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Minimal interface a compute provider must expose to boot instances.
///
/// Two operations cover the whole workflow; anything else a provider SDK
/// offers stays behind this seam so the workflow can run against a test
/// double.
pub trait ComputeApi {
    /// Creates a batch of instances and returns their identifiers in
    /// response order.
    fn create_instances<'a>(&'a self, request: &'a LaunchRequest) -> ApiFuture<'a, Vec<String>>;

    /// Returns the current status of each queried instance the provider
    /// reports on.
    fn describe_instances<'a>(&'a self, ids: &'a [String]) -> ApiFuture<'a, Vec<InstanceStatus>>;
}
