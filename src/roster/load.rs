use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use crate::{
    foundation::error::{ReelError, ReelResult},
    roster::schema::{self, PlayerRecord},
};

/// Validated, display-ordered roster.
///
/// Input files list players best-last (descending file order); the roster
/// reverses them so rank 1 leads, then truncates to the display count. It is
/// read-only for the lifetime of a render.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Roster {
    pub players: Vec<PlayerRecord>,
}

impl Roster {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_validated(mut players: Vec<PlayerRecord>, display_count: usize) -> Self {
        players.reverse();
        players.truncate(display_count);
        Self { players }
    }

    /// Top-ranked player after reordering, shown on the intro card.
    pub fn leader(&self) -> Option<&PlayerRecord> {
        self.players.first()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Parse and validate a raw roster document from JSON text.
#[tracing::instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_roster(json: &str, display_count: usize) -> ReelResult<Roster> {
    let raw: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ReelError::serde(format!("roster is not valid JSON: {e}")))?;

    match schema::validate_roster(&raw) {
        Ok(players) => {
            tracing::debug!(total = players.len(), kept = display_count.min(players.len()), "roster validated");
            Ok(Roster::from_validated(players, display_count))
        }
        Err(errors) => {
            tracing::error!(count = errors.errors.len(), %errors, "roster validation failed");
            Err(errors.into())
        }
    }
}

/// Read, parse, and validate a roster file.
pub fn load_roster(path: &Path, display_count: usize) -> ReelResult<Roster> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| ReelError::io(path.display().to_string(), e))?;
    parse_roster(&json, display_count)
}

/// What the render gate does when the roster cannot be produced in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatePolicy {
    /// Surface the failure to the operator; nothing renders.
    FailFast,
    /// Release the gate with an empty roster and keep rendering. This
    /// reproduces the upstream behavior and can silently yield an empty
    /// video; callers must opt into it.
    FailOpen,
}

/// Load a roster behind a bounded gate.
///
/// Validation runs on a worker thread; if it does not finish within
/// `timeout` the gate is released according to `policy`. A timed-out worker
/// is detached, not cancelled.
pub fn load_roster_gated(
    path: &Path,
    display_count: usize,
    policy: GatePolicy,
    timeout: Duration,
) -> ReelResult<Roster> {
    let (tx, rx) = mpsc::channel();
    let owned: PathBuf = path.to_path_buf();
    std::thread::spawn(move || {
        let _ = tx.send(load_roster(&owned, display_count));
    });

    let outcome = match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => Err(ReelError::evaluation(format!(
            "roster validation exceeded {} s gate",
            timeout.as_secs_f64()
        ))),
    };

    match (outcome, policy) {
        (Ok(roster), _) => Ok(roster),
        (Err(e), GatePolicy::FailFast) => Err(e),
        (Err(e), GatePolicy::FailOpen) => {
            tracing::warn!(error = %e, "releasing render gate with an empty roster");
            Ok(Roster::empty())
        }
    }
}
