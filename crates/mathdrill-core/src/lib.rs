//! Question generation, scoring, and session state for mathdrill.
//!
//! This crate defines the equations, operand ranges, unique-question pool,
//! and the quiz session that every mathdrill front-end drives.

pub mod config;
pub mod equation;
pub mod error;
pub mod model;
pub mod pool;
pub mod ranges;
pub mod session;

pub use config::{load_config, load_config_from, DrillConfig, RunSettings};
pub use equation::Equation;
pub use error::DrillError;
pub use model::{Answer, Operator, OperatorSet, Outcome, Pins};
pub use session::QuizSession;
