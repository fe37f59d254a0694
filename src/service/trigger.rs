//! The user-facing "get random user" action.
//!
//! Wraps [`UserFetchService::request_random_user`] in a [`Throttle`] and runs
//! each accepted request as its own task, so the trigger stays responsive
//! while a fetch is pending and a second click can be accepted before the
//! first fetch resolves.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use super::UserFetchService;
use crate::throttle::Throttle;

/// Throttled, fire-and-forget trigger for random user requests.
pub struct ThrottledTrigger {
    service: Arc<UserFetchService>,
    throttle: Throttle,
}

impl ThrottledTrigger {
    pub fn new(service: Arc<UserFetchService>, throttle: Throttle) -> Self {
        Self { service, throttle }
    }

    /// Click the trigger.
    ///
    /// Returns the handle of the spawned request when the throttle let the
    /// click through, `None` when it was dropped. Must be called from
    /// within a tokio runtime.
    pub fn fire(&self) -> Option<JoinHandle<()>> {
        let handle = self.throttle.call(|| {
            let service = Arc::clone(&self.service);
            tokio::spawn(async move { service.request_random_user().await })
        });
        if handle.is_none() {
            debug!("trigger throttled");
        }
        handle
    }

    pub fn service(&self) -> &Arc<UserFetchService> {
        &self.service
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }
}
