//! Harness settings.

use std::env;
use std::time::Duration;

/// Default primary bucket.
pub const DEFAULT_BUCKET_URL: &str = "http://cosgosdktest-1251668577.cos.ap-guangzhou.myqcloud.com";
const DEFAULT_REPLICATION_ROLE: &str = "qcs::cam::uin/2779643970:uin/2779643970";
const DEFAULT_REPLICATION_DEST: &str = "qcs::cos:ap-beijing::alanbj-1251668577";
const DEFAULT_INVENTORY_DEST: &str = "qcs::cos:ap-guangzhou::alangz-1251668577";
const DEFAULT_LOGGING_TARGET: &str = "alangz-1251668577";
const DEFAULT_SETTLE_MS: u64 = 3000;

/// Settings the scenarios read: which bucket to use, where replication,
/// inventory and logging point, and how long to wait for the service to
/// settle after a write.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Primary bucket URL, `<scheme>://<bucket>-<appid>.cos.<region>.myqcloud.com`.
    pub bucket_url: String,
    /// CAM role COS assumes to replicate objects.
    pub replication_role: String,
    /// Replication destination resource name.
    pub replication_dest: String,
    /// Inventory destination resource name.
    pub inventory_dest: String,
    /// Logging target bucket, `<name>-<appid>`.
    pub logging_target: String,
    /// Pause after a write before reading it back.
    pub settle_delay: Duration,
    /// Delete this run's leftovers on teardown.
    pub sweep_on_teardown: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            bucket_url: DEFAULT_BUCKET_URL.to_string(),
            replication_role: DEFAULT_REPLICATION_ROLE.to_string(),
            replication_dest: DEFAULT_REPLICATION_DEST.to_string(),
            inventory_dest: DEFAULT_INVENTORY_DEST.to_string(),
            logging_target: DEFAULT_LOGGING_TARGET.to_string(),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_MS),
            sweep_on_teardown: false,
        }
    }
}

impl HarnessConfig {
    /// Read `COS_TEST_*` overrides on top of the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("COS_TEST_BUCKET_URL") {
            config.bucket_url = url;
        }
        if let Ok(role) = env::var("COS_TEST_REPLICATION_ROLE") {
            config.replication_role = role;
        }
        if let Ok(dest) = env::var("COS_TEST_REPLICATION_DEST") {
            config.replication_dest = dest;
        }
        if let Ok(dest) = env::var("COS_TEST_INVENTORY_DEST") {
            config.inventory_dest = dest;
        }
        if let Ok(target) = env::var("COS_TEST_LOGGING_TARGET") {
            config.logging_target = target;
        }
        if let Some(ms) = env::var("COS_TEST_SETTLE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.settle_delay = Duration::from_millis(ms);
        }
        if let Ok(sweep) = env::var("COS_TEST_SWEEP") {
            config.sweep_on_teardown = sweep.eq_ignore_ascii_case("true") || sweep == "1";
        }

        config
    }

    /// Use another primary bucket.
    pub fn with_bucket_url(mut self, url: impl Into<String>) -> Self {
        self.bucket_url = url.into();
        self
    }

    /// Override the settle delay; zero skips the wait.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Turn the run-scoped teardown sweep on or off.
    pub fn with_sweep_on_teardown(mut self, sweep: bool) -> Self {
        self.sweep_on_teardown = sweep;
        self
    }
}
