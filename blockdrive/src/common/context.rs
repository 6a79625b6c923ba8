use crate::utils::time::now_unix_seconds;

/// Who is acting and when.
///
/// Every drive operation takes one of these instead of reading ambient state, so the
/// same request can be replayed at a fixed instant (tests, audits) or run against the
/// wall clock.
//
// // 请求上下文：操作者 ID 与事务时间戳（秒）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestContext {
    /// The acting user's id.
    pub actor_id: String,
    /// Transaction time in seconds since the Unix epoch.
    pub timestamp: i64,
}

impl RequestContext {
    pub fn new(actor_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            actor_id: actor_id.into(),
            timestamp,
        }
    }

    /// Builds a context stamped with the current wall-clock time.
    pub fn now(actor_id: impl Into<String>) -> Self {
        Self::new(actor_id, now_unix_seconds())
    }

    /// Same actor, different instant.
    pub fn at(&self, timestamp: i64) -> Self {
        Self::new(self.actor_id.clone(), timestamp)
    }

    /// Same instant, different actor.
    pub fn as_actor(&self, actor_id: impl Into<String>) -> Self {
        Self::new(actor_id, self.timestamp)
    }
}
