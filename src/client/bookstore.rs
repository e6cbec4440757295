//! Typed bindings for the BookStore endpoints
//!
//! Each consumed endpoint gets an explicit request/response schema; required
//! fields that are absent from a success body surface as
//! `Error::MissingField` instead of silently propagating nulls.

use serde::{Deserialize, Serialize};

use super::{ApiClient, Outcome};
use crate::common::Result;
use crate::data::Credentials;

/// Body for user creation and token generation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            user_name: &credentials.username,
            password: &credentials.password,
        }
    }
}

/// `POST /Account/v1/User` 201 response
#[derive(Debug, Deserialize)]
pub struct CreatedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "username", default)]
    pub username: Option<String>,
}

/// `POST /Account/v1/GenerateToken` 200 response
///
/// The service answers 200 with `token: null` for bad credentials under
/// some deployments, so every field is optional here.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
    pub status: Option<String>,
    pub result: Option<String>,
}

/// One book reference; only the isbn identifies it
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// `GET /BookStore/v1/Books` 200 response
#[derive(Debug, Deserialize)]
pub struct BookShelf {
    pub books: Vec<Book>,
}

/// `GET /Account/v1/User/{id}` 200 response
#[derive(Debug, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(rename = "username", default)]
    pub username: Option<String>,
    #[serde(default)]
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct IsbnRef<'a> {
    pub isbn: &'a str,
}

/// Body for `POST /BookStore/v1/Books`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBooksBody<'a> {
    pub user_id: &'a str,
    pub collection_of_isbns: Vec<IsbnRef<'a>>,
}

/// Body for the body-bearing `DELETE /BookStore/v1/Book`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBookBody<'a> {
    pub user_id: &'a str,
    pub isbn: &'a str,
}

/// Create a user account; the caller checks the status
pub async fn create_user(client: &ApiClient, credentials: &Credentials) -> Result<Outcome> {
    client
        .post("/Account/v1/User", &LoginBody::from(credentials), None)
        .await
}

/// Obtain a bearer token for the credentials
///
/// Returns `Ok(None)` for any non-2xx status and for a 2xx body without a
/// token; only transport failures are errors.
pub async fn generate_token(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<Option<String>> {
    let outcome = client
        .post(
            "/Account/v1/GenerateToken",
            &LoginBody::from(credentials),
            None,
        )
        .await?;

    if !outcome.is_success() {
        tracing::debug!(status = outcome.status.as_u16(), "token not granted");
        return Ok(None);
    }

    let token = outcome
        .decode::<TokenResponse>()
        .ok()
        .and_then(|response| response.token);
    Ok(token)
}

/// Fetch the store's book catalogue
pub async fn fetch_books(client: &ApiClient, token: Option<&str>) -> Result<Outcome> {
    client.get("/BookStore/v1/Books", token).await
}

/// Add books to a user's shelf
pub async fn add_books(
    client: &ApiClient,
    user_id: &str,
    isbns: &[&str],
    token: &str,
) -> Result<Outcome> {
    let body = AddBooksBody {
        user_id,
        collection_of_isbns: isbns.iter().map(|isbn| IsbnRef { isbn }).collect(),
    };
    client.post("/BookStore/v1/Books", &body, Some(token)).await
}

/// Remove one book from a user's shelf
pub async fn remove_book(
    client: &ApiClient,
    user_id: &str,
    isbn: &str,
    token: &str,
) -> Result<Outcome> {
    let body = RemoveBookBody { user_id, isbn };
    client
        .delete_with_body("/BookStore/v1/Book", &body, Some(token))
        .await
}

/// Fetch a user account including its shelf
pub async fn fetch_user_account(
    client: &ApiClient,
    user_id: &str,
    token: &str,
) -> Result<Outcome> {
    client
        .get(&format!("/Account/v1/User/{user_id}"), Some(token))
        .await
}

/// Delete a user account
///
/// Teardown may run without a token (authentication can fail after the
/// user exists), so the bearer header is optional here.
pub async fn delete_user(
    client: &ApiClient,
    user_id: &str,
    token: Option<&str>,
) -> Result<Outcome> {
    client
        .delete(&format!("/Account/v1/User/{user_id}"), token)
        .await
}

/// One scenario's authentication state
///
/// Holds the credentials and, once granted, the opaque bearer token. The
/// token is never interpreted, only attached to requests.
#[derive(Debug)]
pub struct Session {
    pub credentials: Credentials,
    pub token: Option<String>,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: None,
        }
    }

    /// Register the account with the service
    pub async fn sign_up(&self, client: &ApiClient) -> Result<Outcome> {
        create_user(client, &self.credentials).await
    }

    /// Authenticate and remember the token; returns it when granted
    pub async fn authenticate(&mut self, client: &ApiClient) -> Result<Option<&str>> {
        self.token = generate_token(client, &self.credentials).await?;
        Ok(self.token.as_deref())
    }
}
