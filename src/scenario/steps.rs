//! Scenario steps
//!
//! Each step performs its HTTP calls, validates the outcome immediately and
//! writes the slots later steps depend on. An unexpected status aborts the
//! scenario (fail-fast); there is no retry at this layer.

use reqwest::StatusCode;

use crate::client::{self, ApiClient, BookShelf, CreatedUser, Session, UserAccount};
use crate::common::{Error, Result};
use crate::data::Credentials;

use super::state::ScenarioState;

/// Create a user and obtain a bearer token for it
///
/// Stores `user_id` and `token`. Aborts when creation does not answer 201
/// or when no token is granted, before any book operation runs.
pub async fn create_and_authorize(client: &ApiClient, state: &mut ScenarioState) -> Result<()> {
    let mut session = Session::new(Credentials::generate());

    let outcome = session.sign_up(client).await?;
    outcome.expect_status("create user", StatusCode::CREATED)?;

    let created: CreatedUser = outcome
        .decode()
        .map_err(|_| Error::missing_field("create user", "userID"))?;
    tracing::info!(user_id = %created.user_id, "user created");
    state.user_id = Some(created.user_id);

    match session.authenticate(client).await? {
        Some(token) => {
            state.token = Some(token.to_string());
            Ok(())
        }
        None => Err(Error::precondition("token was not generated")),
    }
}

/// Snapshot the store catalogue into the scenario state
///
/// Requires 200 and at least `min_books` entries so later steps can pick
/// reference isbns from the snapshot.
pub async fn snapshot_books(
    client: &ApiClient,
    state: &mut ScenarioState,
    min_books: usize,
) -> Result<()> {
    let outcome = client::fetch_books(client, None).await?;
    outcome.expect_status("get books", StatusCode::OK)?;

    let shelf: BookShelf = outcome
        .decode()
        .map_err(|_| Error::missing_field("get books", "books"))?;
    if shelf.books.len() < min_books {
        return Err(Error::precondition(format!(
            "catalogue has {} books, scenario needs {}",
            shelf.books.len(),
            min_books
        )));
    }

    state.books_snapshot = Some(shelf.books);
    Ok(())
}

/// Add the snapshot book at `index` to the user's shelf; requires 201
pub async fn add_snapshot_book(
    client: &ApiClient,
    state: &mut ScenarioState,
    index: usize,
) -> Result<()> {
    let user_id = state.require_user_id()?;
    let token = state.require_token()?;
    let isbn = state.snapshot_isbn(index)?;

    let outcome = client::add_books(client, user_id, &[isbn], token).await?;
    outcome.expect_status("add book", StatusCode::CREATED)?;
    tracing::info!(isbn, "book added to shelf");
    Ok(())
}

/// Remove the snapshot book at `index` from the user's shelf
///
/// The book endpoint's contract is exactly 204, unlike user deletion.
pub async fn remove_snapshot_book(
    client: &ApiClient,
    state: &mut ScenarioState,
    index: usize,
) -> Result<()> {
    let user_id = state.require_user_id()?;
    let token = state.require_token()?;
    let isbn = state.snapshot_isbn(index)?;

    let outcome = client::remove_book(client, user_id, isbn, token).await?;
    outcome.expect_status("remove book", StatusCode::NO_CONTENT)?;
    tracing::info!(isbn, "book removed from shelf");
    Ok(())
}

/// Replace the book at `old_index` with the one at `new_index`
///
/// Removal must be confirmed (204) before the new book is added; a partial
/// overlap is caught by the next shelf verification, not assumed away.
pub async fn replace_book(
    client: &ApiClient,
    state: &mut ScenarioState,
    old_index: usize,
    new_index: usize,
) -> Result<()> {
    remove_snapshot_book(client, state, old_index).await?;
    add_snapshot_book(client, state, new_index).await
}

/// Re-fetch the user's shelf and assert it holds exactly the snapshot books
/// at `expected_indices`, in count and identity
pub async fn verify_shelf(
    client: &ApiClient,
    state: &mut ScenarioState,
    expected_indices: &[usize],
) -> Result<()> {
    let user_id = state.require_user_id()?;
    let token = state.require_token()?;

    let outcome = client::fetch_user_account(client, user_id, token).await?;
    outcome.expect_status("get user", StatusCode::OK)?;

    let account: UserAccount = outcome
        .decode()
        .map_err(|_| Error::missing_field("get user", "books"))?;

    let expected: Vec<&str> = expected_indices
        .iter()
        .map(|&index| state.snapshot_isbn(index))
        .collect::<Result<_>>()?;
    let actual: Vec<&str> = account.books.iter().map(|book| book.isbn.as_str()).collect();

    if actual != expected {
        return Err(Error::assertion(format!(
            "shelf mismatch: expected isbns {expected:?}, got {actual:?}"
        )));
    }
    Ok(())
}

/// Delete the scenario's user, treating 204 and 200 as equally successful
///
/// This is the teardown action; the runner guarantees it is attempted
/// whenever a user was created, and never lets its failure mask an earlier
/// one. The created user id is the sole gate: when authentication never
/// granted a token the delete is still issued, unauthenticated.
pub async fn delete_scenario_user(client: &ApiClient, state: &ScenarioState) -> Result<()> {
    let user_id = state.require_user_id()?;
    let token = state.token.as_deref();

    let outcome = client::delete_user(client, user_id, token).await?;
    outcome.expect_one_of(
        "delete user",
        &[StatusCode::NO_CONTENT, StatusCode::OK],
    )?;
    tracing::info!(user_id, status = outcome.status.as_u16(), "user deleted");
    Ok(())
}
