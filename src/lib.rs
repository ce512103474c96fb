//! Core library for the yunti ECS provisioning tool.
//!
//! The crate exposes a minimal compute-provider abstraction with two
//! operations (create a batch of instances, describe their status) and an
//! Alibaba Cloud ECS implementation that powers the boot workflow
//! (create → poll until running or deadline).

pub mod aliyun;
pub mod api;
pub mod boot;
pub mod config;
pub mod report;
pub mod test_support;
pub mod watch;

pub use aliyun::EcsClient;
pub use api::{
    ApiError, ApiFuture, CONNECTION_FAULT_CODE, ComputeApi, InstanceStatus, LaunchRequest,
    LaunchRequestBuilder, UNKNOWN_SERVER_FAULT_CODE,
};
pub use boot::{BootOrchestrator, BootReport};
pub use config::{ConfigError, EcsConfig};
pub use report::Reporter;
pub use watch::{BootOutcome, BootWatcher, RUNNING_STATUS};
