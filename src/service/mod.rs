//! The user fetch service.
//!
//! Resolves a user id to a record, from the session cache when possible
//! and from the [`UserSource`] otherwise, and publishes the result to
//! whoever is watching the display surface.
//!
//! ```text
//! trigger ─▶ throttle ─▶ draw id ─▶ cache? ──hit──▶ publish
//!                                      └──miss─▶ fetch ─▶ publish ─▶ cache
//! ```

pub mod session;
pub mod trigger;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::cache::{CacheStats, UserCache};
use crate::models::User;
use crate::source::{FetchError, UserSource};

pub use session::SessionReport;
pub use trigger::ThrottledTrigger;

/// Draw a user id the way the widget always has: `floor(random() * (max - 1)) + 1`.
///
/// With the default `max` of 10 this is uniform over `1..=9`; id 10 is
/// never drawn. `max` below 2 is treated as 2.
pub fn draw_user_id<R: Rng>(rng: &mut R, max: u32) -> u32 {
    let span = max.max(2) - 1;
    rng.random_range(0..span) + 1
}

/// Source of the id for each random request.
pub trait IdPicker: Send + Sync {
    fn pick(&self) -> u32;
}

/// [`IdPicker`] backed by the thread-local RNG and [`draw_user_id`].
#[derive(Debug, Clone)]
pub struct RandomIdPicker {
    max: u32,
}

impl RandomIdPicker {
    pub fn new(max: u32) -> Self {
        Self { max }
    }
}

impl IdPicker for RandomIdPicker {
    fn pick(&self) -> u32 {
        draw_user_id(&mut rand::rng(), self.max)
    }
}

/// How a request was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the session cache; no remote read happened.
    Cached(Arc<User>),
    /// Read from the source and added to the cache.
    Fetched(Arc<User>),
}

impl Resolution {
    pub fn user(&self) -> &Arc<User> {
        match self {
            Resolution::Cached(user) | Resolution::Fetched(user) => user,
        }
    }

    pub fn was_cached(&self) -> bool {
        matches!(self, Resolution::Cached(_))
    }
}

/// Cached, publishing user fetcher.
///
/// The cache and the published record are only locked for the duration of
/// a lookup or a write, never across the remote read, so a second request
/// can start while the first is still waiting on the network.
pub struct UserFetchService {
    source: Arc<dyn UserSource>,
    picker: Arc<dyn IdPicker>,
    cache: Mutex<UserCache>,
    published: watch::Sender<Option<Arc<User>>>,
}

impl UserFetchService {
    /// Create a service with an empty cache and nothing published.
    pub fn new(source: Arc<dyn UserSource>, picker: Arc<dyn IdPicker>) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            source,
            picker,
            cache: Mutex::new(UserCache::new()),
            published,
        }
    }

    /// Fetch-and-publish a random user, fire-and-forget.
    ///
    /// Failures are logged and dropped: the published record stays as it
    /// was and nothing reaches the caller.
    pub async fn request_random_user(&self) {
        let id = self.picker.pick();
        if let Err(err) = self.resolve(id).await {
            error!(id, error = %err, "error fetching user");
        }
    }

    /// Resolve `id` through the cache, falling back to one remote read.
    ///
    /// On success the record is published, and on a miss also cached. On
    /// failure neither the cache nor the published record change.
    pub async fn resolve(&self, id: u32) -> Result<Resolution, FetchError> {
        let cached = self.lock_cache().get(id);
        if let Some(user) = cached {
            debug!(id, "cache hit");
            self.publish(Arc::clone(&user));
            return Ok(Resolution::Cached(user));
        }

        debug!(id, "cache miss");
        let user = Arc::new(self.source.fetch_user(id).await?);
        info!(id, name = %user.name, "fetched user");

        self.publish(Arc::clone(&user));
        self.lock_cache().insert(id, Arc::clone(&user));
        Ok(Resolution::Fetched(user))
    }

    /// The currently published record, if any.
    pub fn current(&self) -> Option<Arc<User>> {
        self.published.borrow().clone()
    }

    /// Watch the published record.
    ///
    /// Receivers are only woken when the record actually changes;
    /// republishing an equal record is silent.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<User>>> {
        self.published.subscribe()
    }

    /// Look up a cached record without publishing it.
    pub fn cached(&self, id: u32) -> Option<Arc<User>> {
        self.lock_cache().get(id)
    }

    pub fn cached_ids(&self) -> Vec<u32> {
        self.lock_cache().ids()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    /// Replace the published record, returning whether it changed.
    fn publish(&self, user: Arc<User>) -> bool {
        self.published.send_if_modified(|current| {
            if current.as_deref() == Some(&*user) {
                false
            } else {
                *current = Some(user);
                true
            }
        })
    }

    fn lock_cache(&self) -> MutexGuard<'_, UserCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
