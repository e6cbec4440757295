//! Scenario-scoped mutable state
//!
//! One `ScenarioState` exists per scenario run, owned by the runner and
//! passed `&mut` into each step so data dependencies stay visible in the
//! control flow. It is dropped with the scenario, never reused.

use crate::client::Book;
use crate::common::{Error, Result};

/// Slots written by earlier steps and read by later ones
#[derive(Debug, Default)]
pub struct ScenarioState {
    /// Id of the user created by this scenario; set exactly once
    pub user_id: Option<String>,
    /// Bearer token granted for that user
    pub token: Option<String>,
    /// Catalogue snapshot taken before any mutation
    pub books_snapshot: Option<Vec<Book>>,
}

impl ScenarioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The created user's id, or a precondition failure naming the slot
    pub fn require_user_id(&self) -> Result<&str> {
        self.user_id
            .as_deref()
            .ok_or_else(|| Error::precondition("no user id in scenario state"))
    }

    /// The bearer token, or a precondition failure naming the slot
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| Error::precondition("no token in scenario state"))
    }

    /// The catalogue snapshot, or a precondition failure naming the slot
    pub fn require_snapshot(&self) -> Result<&[Book]> {
        self.books_snapshot
            .as_deref()
            .ok_or_else(|| Error::precondition("no books snapshot in scenario state"))
    }

    /// The nth book of the snapshot
    pub fn snapshot_isbn(&self, index: usize) -> Result<&str> {
        let books = self.require_snapshot()?;
        books
            .get(index)
            .map(|book| book.isbn.as_str())
            .ok_or_else(|| {
                Error::precondition(format!(
                    "books snapshot has only {} entries, needed index {}",
                    books.len(),
                    index
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_fails_preconditions_by_name() {
        let state = ScenarioState::new();
        assert!(state.require_user_id().unwrap_err().to_string().contains("user id"));
        assert!(state.require_token().unwrap_err().to_string().contains("token"));
        assert!(state
            .require_snapshot()
            .unwrap_err()
            .to_string()
            .contains("snapshot"));
    }

    #[test]
    fn snapshot_index_out_of_range_is_a_precondition_failure() {
        let mut state = ScenarioState::new();
        state.books_snapshot = Some(vec![Book {
            isbn: "ISBN1".into(),
            title: None,
        }]);
        assert_eq!(state.snapshot_isbn(0).unwrap(), "ISBN1");
        assert!(state.snapshot_isbn(1).is_err());
    }

    #[test]
    fn last_write_wins_per_slot() {
        let mut state = ScenarioState::new();
        state.token = Some("T1".into());
        state.token = Some("T2".into());
        assert_eq!(state.require_token().unwrap(), "T2");
    }
}
