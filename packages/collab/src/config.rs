//! Runtime tuning knobs for sessions and the change bus.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollabConfig {
    /// Maximum pending inputs per session before submissions are rejected.
    pub queue_capacity: usize,
    /// Ring buffer size per editing-context change channel. Lagging
    /// subscribers lose the oldest buffered events beyond this.
    pub change_buffer_capacity: usize,
    /// How long a caller waits on a reply before receiving a timeout error
    /// payload.
    pub reply_timeout: Duration,
    /// Sessions idle longer than this are disposed by `reap_idle`.
    pub idle_timeout: Duration,
}

impl Default for CollabConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            change_buffer_capacity: 256,
            reply_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}
