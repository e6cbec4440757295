//! HTTP client for the remote service
//!
//! Thin wrapper over `reqwest` that never treats an HTTP error status as a
//! Rust error: every completed request yields an [`Outcome`] and each caller
//! decides which status codes it accepts. Only transport-level failures
//! (connect errors, timeouts) surface as `Error::Transport`.

mod bookstore;
mod outcome;

pub use bookstore::{
    add_books, create_user, delete_user, fetch_books, fetch_user_account, generate_token,
    remove_book, AddBooksBody, Book, BookShelf, CreatedUser, IsbnRef, LoginBody, RemoveBookBody,
    Session, TokenResponse, UserAccount,
};
pub use outcome::Outcome;

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

use crate::common::Result;

/// Client bound to one service base URL
///
/// The underlying `reqwest::Client` holds the connection pool and is safe to
/// share across concurrently running scenarios; cloning `ApiClient` reuses it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a path, optionally authenticated
    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Outcome> {
        let request = self.request(Method::GET, path, token);
        self.execute(request).await
    }

    /// POST a JSON body to a path, optionally authenticated
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<Outcome> {
        let request = self.request(Method::POST, path, token).json(body);
        self.execute(request).await
    }

    /// PUT a JSON body to a path, optionally authenticated
    pub async fn put<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<Outcome> {
        let request = self.request(Method::PUT, path, token).json(body);
        self.execute(request).await
    }

    /// DELETE a path, optionally authenticated
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Outcome> {
        let request = self.request(Method::DELETE, path, token);
        let outcome = self.execute(request).await?;
        tracing::debug!(path, status = outcome.status.as_u16(), "DELETE completed");
        Ok(outcome)
    }

    /// DELETE with a JSON body
    ///
    /// The book removal endpoint models deletion as a body-bearing DELETE
    /// keyed by owner id plus isbn, not by path segments.
    pub async fn delete_with_body<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<Outcome> {
        let request = self.request(Method::DELETE, path, token).json(body);
        self.execute(request).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Outcome> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(Outcome { status, body })
    }
}
