//! Scoreboard and summary rendering for mathdrill.
//!
//! Turns a session's right/wrong/skipped buckets into the column layout shown
//! at the end of a test, and into a JSON summary.

pub mod scoreboard;
pub mod summary;

pub use scoreboard::{render_rows, Scoreboard};
pub use summary::{format_elapsed, QuestionRecord, SessionSummary};
