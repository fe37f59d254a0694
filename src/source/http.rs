//! reqwest-backed [`UserSource`] reading `GET <base>/<id>`.

use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, UserSource};
use crate::constants::USER_AGENT;
use crate::models::User;

/// Reads user records from a JSON REST endpoint.
///
/// No authentication, no query parameters and no request timeout: a read
/// runs until the server answers or the connection fails.
pub struct HttpUserSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserSource {
    /// Create a source for the given base endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// The URL a given user id is read from.
    pub fn user_url(&self, id: u32) -> String {
        format!("{}/{id}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_user(&self, id: u32) -> Result<User, FetchError> {
        let url = self.user_url(id);
        debug!(%url, "fetching user");

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request {
                id,
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                id,
                status: status.as_u16(),
            });
        }

        resp.json::<User>().await.map_err(|e| FetchError::Decode {
            id,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEANNE: &str = r#"{
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org"
    }"#;

    #[test]
    fn user_url_joins_base_and_id() {
        let source = HttpUserSource::new("https://example.test/users").unwrap();
        assert_eq!(source.user_url(4), "https://example.test/users/4");

        let trailing = HttpUserSource::new("https://example.test/users/").unwrap();
        assert_eq!(trailing.user_url(4), "https://example.test/users/4");
    }

    #[tokio::test]
    async fn fetch_user_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/1")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LEANNE)
            .create_async()
            .await;

        let source = HttpUserSource::new(format!("{}/users", server.url())).unwrap();
        let user = source.fetch_user(1).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Leanne Graham");
        assert_eq!(user.phone, "1-770-736-8031 x56442");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_user_not_found_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/42")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let source = HttpUserSource::new(format!("{}/users", server.url())).unwrap();
        let err = source.fetch_user(42).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { id: 42, status: 404 }), "got: {err}");
        assert_eq!(err.user_id(), 42);
    }

    #[tokio::test]
    async fn fetch_user_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let source = HttpUserSource::new(format!("{}/users", server.url())).unwrap();
        let err = source.fetch_user(2).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode { id: 2, .. }), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_user_unreachable_host_is_request_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let source = HttpUserSource::new("http://127.0.0.1:9/users").unwrap();
        let err = source.fetch_user(1).await.unwrap_err();

        assert!(matches!(err, FetchError::Request { id: 1, .. }), "got: {err}");
    }
}
