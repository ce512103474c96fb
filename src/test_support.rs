//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{ApiError, ApiFuture, ComputeApi, InstanceStatus, LaunchRequest};
use crate::config::EcsConfig;

/// Scripted provider double that returns pre-seeded results in FIFO order.
///
/// Used to drive deterministic boot outcomes without reaching any provider.
/// Each operation records its input so tests can assert on what was sent.
#[derive(Clone, Debug, Default)]
pub struct ScriptedApi {
    state: Arc<Mutex<State>>,
}

// Scripts queue plain values: a `Result` payload here would strip
// rstest-bdd's `NotResult` auto trait from every step context embedding
// the double.
#[derive(Debug, Default)]
struct State {
    create_scripts: VecDeque<CreateScript>,
    describe_scripts: VecDeque<DescribeScript>,
    create_requests: Vec<LaunchRequest>,
    describe_queries: Vec<Vec<String>>,
}

/// Scripted outcome of one creation call.
#[derive(Debug)]
enum CreateScript {
    Ids(Vec<String>),
    Fault(ApiError),
}

/// Scripted outcome of one status poll.
#[derive(Debug)]
enum DescribeScript {
    Statuses(Vec<InstanceStatus>),
    Fault(ApiError),
}

impl ScriptedApi {
    /// Creates a new double with no queued results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful creation result assigning `ids`.
    pub fn push_create_ids(&self, ids: &[&str]) {
        let ids = ids.iter().map(|id| (*id).to_owned()).collect();
        self.lock().create_scripts.push_back(CreateScript::Ids(ids));
    }

    /// Queues a failing creation result.
    pub fn push_create_fault(&self, fault: ApiError) {
        self.lock().create_scripts.push_back(CreateScript::Fault(fault));
    }

    /// Queues a successful status response of `(id, status)` records.
    pub fn push_statuses(&self, statuses: &[(&str, &str)]) {
        let statuses = statuses
            .iter()
            .map(|(id, status)| InstanceStatus {
                id: (*id).to_owned(),
                status: (*status).to_owned(),
            })
            .collect();
        self.lock()
            .describe_scripts
            .push_back(DescribeScript::Statuses(statuses));
    }

    /// Queues a failing status response.
    pub fn push_describe_fault(&self, fault: ApiError) {
        self.lock()
            .describe_scripts
            .push_back(DescribeScript::Fault(fault));
    }

    /// Returns a snapshot of all creation requests received, in call order.
    #[must_use]
    pub fn create_requests(&self) -> Vec<LaunchRequest> {
        self.lock().create_requests.clone()
    }

    /// Returns the identifier list of every status query, in call order.
    #[must_use]
    pub fn describe_queries(&self) -> Vec<Vec<String>> {
        self.lock().describe_queries.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|err| panic!("scripted api state lock poisoned: {err}"))
    }
}

impl ComputeApi for ScriptedApi {
    fn create_instances<'a>(&'a self, request: &'a LaunchRequest) -> ApiFuture<'a, Vec<String>> {
        Box::pin(async move {
            let mut state = self.lock();
            state.create_requests.push(request.clone());
            match state.create_scripts.pop_front() {
                Some(CreateScript::Ids(ids)) => Ok(ids),
                Some(CreateScript::Fault(fault)) => Err(fault),
                None => Err(ApiError::Unexpected {
                    message: String::from("no scripted create result available"),
                }),
            }
        })
    }

    fn describe_instances<'a>(&'a self, ids: &'a [String]) -> ApiFuture<'a, Vec<InstanceStatus>> {
        Box::pin(async move {
            let mut state = self.lock();
            state.describe_queries.push(ids.to_vec());
            match state.describe_scripts.pop_front() {
                Some(DescribeScript::Statuses(statuses)) => Ok(statuses),
                Some(DescribeScript::Fault(fault)) => Err(fault),
                None => Err(ApiError::Unexpected {
                    message: String::from("no scripted describe response available"),
                }),
            }
        })
    }
}

/// Returns a fully populated configuration for tests.
#[must_use]
pub fn sample_config() -> EcsConfig {
    EcsConfig {
        access_key_id: String::from("test-access-key-id"),
        access_key_secret: String::from("test-access-key-secret"),
        region_id: String::from("cn-beijing"),
        endpoint: String::from("https://ecs.aliyuncs.com"),
        zone_id: String::from("random"),
        image_id: String::from("ubuntu_22_04_x64_20G_alibase_20240101.vhd"),
        security_group_id: String::from("sg-2zeagan3sm6nctp3xite"),
        vswitch_id: String::from("vsw-2zef06xhq3ezqghdl5cbk"),
        instance_type: String::from("ecs.t5-lc2m1.nano"),
        instance_name: String::from("yunti-demo"),
        amount: 1,
        instance_charge_type: String::from("PostPaid"),
        period: 1,
        period_unit: String::from("Hourly"),
        internet_charge_type: String::from("PayByTraffic"),
        internet_max_bandwidth_out: 5,
        io_optimized: String::from("optimized"),
        key_pair_name: String::from("yunti-keypair"),
        system_disk_size: 40,
        system_disk_category: String::from("cloud_efficiency"),
        dry_run: false,
        poll_interval_secs: 3,
        poll_timeout_secs: 180,
    }
}
