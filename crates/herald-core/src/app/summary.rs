//! Per-run accounting.

use serde::{Deserialize, Serialize};

/// Counts for one dispatcher run.
///
/// The scheduler only sees exit code 0, so this is the one place a caller
/// (or a log reader) can tell "all sent" apart from "some records failed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Unsent records returned by the query.
    pub fetched: usize,

    /// Sends that succeeded and marked their record.
    pub sent: usize,

    /// Records skipped because they carry no device token.
    pub skipped_no_token: usize,

    /// Sends that succeeded but found the record already marked by a
    /// concurrent run (possible duplicate delivery).
    pub already_marked: usize,

    /// Records whose send or mark failed; they stay unsent and are retried
    /// on the next scheduled invocation.
    pub failed: usize,
}

impl DispatchSummary {
    /// True when every fetched record was accounted for without failure.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
