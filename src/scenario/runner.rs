//! Scenario runner
//!
//! Sequences the steps of a named scenario and guarantees teardown: when a
//! step created a user, exactly one delete attempt is made afterwards, on
//! every exit path — success, failed expectation, or scenario timeout.

use std::time::Duration;

use colored::Colorize;

use crate::client::ApiClient;
use crate::common::{Error, Result};

use super::state::ScenarioState;
use super::steps;

/// Names of the scenarios this harness knows how to run
pub const SCENARIOS: &[&str] = &["replace-book", "book-roundtrip"];

/// Result of one scenario run, in the shape the CLI reports
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<String>,
}

/// One logical action within a scenario
#[derive(Debug, Clone)]
enum Step {
    /// Create a user, authenticate, store id and token
    CreateAndAuthorize,
    /// Snapshot the catalogue; fails when it holds fewer than `min_books`
    SnapshotBooks { min_books: usize },
    /// Add the snapshot book at `index` to the user's shelf
    AddBook { index: usize },
    /// Remove the snapshot book at `index` from the user's shelf
    RemoveBook { index: usize },
    /// Confirmed removal of `old`, then addition of `new`
    ReplaceBook { old: usize, new: usize },
    /// Assert the shelf holds exactly the snapshot books at these indices
    VerifyShelf { expected: Vec<usize> },
}

impl Step {
    fn label(&self) -> String {
        match self {
            Step::CreateAndAuthorize => "create and authorize user".to_string(),
            Step::SnapshotBooks { .. } => "snapshot the catalogue".to_string(),
            Step::AddBook { index } => format!("add catalogue book #{index}"),
            Step::RemoveBook { index } => format!("remove catalogue book #{index}"),
            Step::ReplaceBook { old, new } => {
                format!("replace catalogue book #{old} with #{new}")
            }
            Step::VerifyShelf { expected } if expected.is_empty() => {
                "verify shelf is empty".to_string()
            }
            Step::VerifyShelf { expected } => {
                format!("verify shelf holds exactly catalogue books {expected:?}")
            }
        }
    }

    async fn execute(&self, client: &ApiClient, state: &mut ScenarioState) -> Result<()> {
        match self {
            Step::CreateAndAuthorize => steps::create_and_authorize(client, state).await,
            Step::SnapshotBooks { min_books } => {
                steps::snapshot_books(client, state, *min_books).await
            }
            Step::AddBook { index } => steps::add_snapshot_book(client, state, *index).await,
            Step::RemoveBook { index } => {
                steps::remove_snapshot_book(client, state, *index).await
            }
            Step::ReplaceBook { old, new } => {
                steps::replace_book(client, state, *old, *new).await
            }
            Step::VerifyShelf { expected } => {
                steps::verify_shelf(client, state, expected).await
            }
        }
    }
}

fn steps_for(name: &str) -> Result<Vec<Step>> {
    match name {
        "replace-book" => Ok(vec![
            Step::CreateAndAuthorize,
            Step::SnapshotBooks { min_books: 2 },
            Step::AddBook { index: 0 },
            Step::VerifyShelf { expected: vec![0] },
            Step::ReplaceBook { old: 0, new: 1 },
            Step::VerifyShelf { expected: vec![1] },
        ]),
        "book-roundtrip" => Ok(vec![
            Step::CreateAndAuthorize,
            Step::SnapshotBooks { min_books: 1 },
            Step::AddBook { index: 0 },
            Step::VerifyShelf { expected: vec![0] },
            Step::RemoveBook { index: 0 },
            Step::VerifyShelf { expected: vec![] },
        ]),
        _ => Err(Error::UnknownScenario {
            name: name.to_string(),
            available: SCENARIOS.join(", "),
        }),
    }
}

/// Run a named scenario against the service behind `client`
///
/// The steps run under `budget`; teardown runs outside it, best effort.
/// Step failures are reported through the returned `ScenarioResult`, not as
/// an `Err` — the error path is reserved for unknown scenario names.
pub async fn run_scenario(
    name: &str,
    client: &ApiClient,
    budget: Duration,
    verbose: bool,
) -> Result<ScenarioResult> {
    let scenario_steps = steps_for(name)?;
    let steps_total = scenario_steps.len();

    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        name.white().bold()
    );
    println!("\n{}", "Steps:".cyan());

    let mut state = ScenarioState::new();
    let outcome = run_steps(client, &mut state, &scenario_steps, budget, verbose).await;

    // Teardown happens before the result is shaped, whatever the steps did.
    teardown(client, &state).await;

    let result = match outcome {
        Ok(()) => {
            println!(
                "\n{} {}\n",
                "✓".green().bold(),
                "Scenario Passed".green().bold()
            );
            ScenarioResult {
                name: name.to_string(),
                passed: true,
                steps_run: steps_total,
                steps_total,
                error: None,
            }
        }
        Err((steps_run, error)) => {
            println!(
                "\n{} {}\n",
                "✗".red().bold(),
                "Scenario Failed".red().bold()
            );
            ScenarioResult {
                name: name.to_string(),
                passed: false,
                steps_run,
                steps_total,
                error: Some(error.to_string()),
            }
        }
    };

    Ok(result)
}

/// Execute the steps sequentially under the scenario budget
///
/// Returns the number of steps run and the first violation on failure.
async fn run_steps(
    client: &ApiClient,
    state: &mut ScenarioState,
    scenario_steps: &[Step],
    budget: Duration,
    verbose: bool,
) -> std::result::Result<(), (usize, Error)> {
    let budget_secs = budget.as_secs();
    let mut steps_run = 0usize;
    let mut failure: Option<Error> = None;

    let sequence = async {
        for step in scenario_steps {
            steps_run += 1;
            match step.execute(client, state).await {
                Ok(()) => {
                    println!(
                        "  {} Step {}: {}",
                        "✓".green(),
                        steps_run,
                        step.label().dimmed()
                    );
                }
                Err(error) => {
                    println!("  {} Step {}: {}", "✗".red(), steps_run, step.label());
                    if verbose {
                        println!("    {}", error.to_string().dimmed());
                    }
                    failure = Some(error);
                    return;
                }
            }
        }
    };

    let timed_out = tokio::time::timeout(budget, sequence).await.is_err();

    if timed_out {
        println!("  {} scenario budget exhausted", "✗".red());
        return Err((steps_run, Error::ScenarioTimeout(budget_secs)));
    }
    match failure {
        Some(error) => Err((steps_run, error)),
        None => Ok(()),
    }
}

/// Best-effort removal of the scenario's user
///
/// Never escalates: a teardown failure is logged and must not mask the
/// steps' own outcome. Skipped only when no user was ever created.
async fn teardown(client: &ApiClient, state: &ScenarioState) {
    if state.user_id.is_none() {
        return;
    }

    match steps::delete_scenario_user(client, state).await {
        Ok(()) => {
            println!("  {} {}", "✓".green(), "cleanup: user deleted".dimmed());
        }
        Err(error) => {
            tracing::warn!(%error, "teardown failed");
            println!(
                "  {} cleanup failed: {}",
                "!".yellow(),
                error.to_string().dimmed()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_scenario_resolves() {
        for name in SCENARIOS {
            assert!(steps_for(name).is_ok(), "scenario '{name}' missing steps");
        }
    }

    #[test]
    fn unknown_scenario_lists_the_available_ones() {
        let err = steps_for("petstore-smoke").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("petstore-smoke"));
        assert!(text.contains("replace-book"));
        assert!(text.contains("book-roundtrip"));
    }

    #[test]
    fn replace_scenario_ends_by_verifying_only_the_replacement() {
        let steps = steps_for("replace-book").unwrap();
        match steps.last().unwrap() {
            Step::VerifyShelf { expected } => assert_eq!(expected, &vec![1]),
            other => panic!("unexpected final step: {other:?}"),
        }
    }
}
