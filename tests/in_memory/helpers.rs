//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use eyre::WrapErr;
use reqwest::{Client, Response, StatusCode};
use rstest::fixture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskboard::http::{AppState, InMemoryBackend, start_server};
use taskboard::workflow::domain::StageList;
use tokio::task::JoinHandle;

/// Stages used by the delivery workflow in these tests.
pub const DELIVERY: [&str; 4] = ["Manager", "Developer", "Tester", "Deployed"];

/// Provides application state over fresh in-memory repositories.
#[fixture]
pub fn state() -> Arc<AppState<InMemoryBackend>> {
    Arc::new(AppState::in_memory(StageList::default_board()))
}

/// A board server bound to an ephemeral local port.
pub struct TestServer {
    base: String,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Starts a server over `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(state: Arc<AppState<InMemoryBackend>>) -> Result<Self, eyre::Report> {
        let (addr, handle) = start_server("127.0.0.1:0", state)
            .await
            .wrap_err("bind test server")?;
        Ok(Self {
            base: format!("http://{addr}"),
            client: Client::new(),
            handle,
        })
    }

    /// Returns the absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Returns the HTTP client.
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Result<Response, eyre::Report> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Response, eyre::Report> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Response, eyre::Report> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn delete(&self, path: &str) -> Result<Response, eyre::Report> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Checks the response status and decodes its JSON body.
///
/// # Errors
///
/// Returns an error if the status differs from `expected` or the body does
/// not decode as `T`.
pub async fn expect_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T, eyre::Report> {
    let status = response.status();
    let body = response.text().await?;
    eyre::ensure!(
        status == expected,
        "expected status {expected}, got {status}: {body}"
    );
    serde_json::from_str(&body).wrap_err_with(|| format!("decode response body: {body}"))
}
