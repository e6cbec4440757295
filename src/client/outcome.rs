//! The result of one completed HTTP call

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::{Error, Result};

/// Status and body of one request, immutable once produced
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: StatusCode,
    pub body: String,
}

impl Outcome {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as arbitrary JSON, if it is JSON at all
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Decode the body into a typed response schema
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Require an exact status, converting a mismatch into
    /// [`Error::UnexpectedStatus`] with the body attached
    pub fn expect_status(&self, operation: &str, expected: StatusCode) -> Result<&Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(Error::unexpected_status(
                operation,
                expected,
                self.status,
                &self.body,
            ))
        }
    }

    /// Require one of several statuses
    ///
    /// User deletion answers 204 or 200 depending on the deployment, so
    /// teardown accepts either; book deletion keeps the exact-204 contract.
    pub fn expect_one_of(&self, operation: &str, expected: &[StatusCode]) -> Result<&Self> {
        if expected.contains(&self.status) {
            Ok(self)
        } else {
            Err(Error::unexpected_status(
                operation,
                expected[0],
                self.status,
                &self.body,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: StatusCode, body: &str) -> Outcome {
        Outcome {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn expect_status_passes_on_match() {
        let out = outcome(StatusCode::CREATED, "{}");
        assert!(out.expect_status("create user", StatusCode::CREATED).is_ok());
    }

    #[test]
    fn expect_status_reports_both_codes_and_body() {
        let out = outcome(StatusCode::BAD_REQUEST, r#"{"message":"User exists!"}"#);
        let err = out
            .expect_status("create user", StatusCode::CREATED)
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("201"));
        assert!(text.contains("400"));
        assert!(text.contains("User exists!"));
    }

    #[test]
    fn expect_one_of_accepts_any_listed_status() {
        let out = outcome(StatusCode::OK, "");
        assert!(out
            .expect_one_of("delete user", &[StatusCode::NO_CONTENT, StatusCode::OK])
            .is_ok());
    }

    #[test]
    fn json_is_none_for_non_json_bodies() {
        assert!(outcome(StatusCode::OK, "<html>oops</html>").json().is_none());
        assert!(outcome(StatusCode::OK, r#"{"a":1}"#).json().is_some());
    }
}
