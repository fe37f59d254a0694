//! Remote user sources.
//!
//! [`UserSource`] is the seam between the fetch service and the network,
//! so the service can be driven by the reqwest-backed [`HttpUserSource`]
//! in production and by canned sources in tests.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::User;

pub use http::HttpUserSource;

/// Failure of a single remote read.
///
/// Network errors, bad statuses and undecodable bodies are all the same
/// kind of failure to the service; the variants only exist for logging.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request for user {id} failed: {message}")]
    Request { id: u32, message: String },

    #[error("request for user {id} returned HTTP {status}")]
    Status { id: u32, status: u16 },

    #[error("failed to decode user {id}: {message}")]
    Decode { id: u32, message: String },
}

impl FetchError {
    /// The user id whose read failed.
    pub fn user_id(&self) -> u32 {
        match self {
            FetchError::Request { id, .. }
            | FetchError::Status { id, .. }
            | FetchError::Decode { id, .. } => *id,
        }
    }
}

/// Something that can read one user record by id.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Read the record for `id`. Exactly one remote read per call.
    async fn fetch_user(&self, id: u32) -> Result<User, FetchError>;
}
