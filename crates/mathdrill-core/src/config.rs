//! Drill configuration and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::model::{Operator, OperatorSet, Pins};

/// Options for one test, as written in `mathdrill.toml` or given on the
/// command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Operator characters to draw from, e.g. `"+-"`. All four when unset.
    #[serde(default)]
    pub operators: Option<String>,
    /// Ask only this operator.
    #[serde(default)]
    pub operator: Option<String>,
    /// Pin the first operand.
    #[serde(default)]
    pub first_operand: Option<i32>,
    /// Pin the second operand.
    #[serde(default)]
    pub second_operand: Option<i32>,
    /// Draw a picture of each question.
    #[serde(default)]
    pub visualize: bool,
    /// Never repeat a question until every possible one has been asked.
    #[serde(default)]
    pub unique: bool,
    /// Number of new questions in the test.
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    /// Equations per row on the scoreboard.
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Keep re-asking wrong answers until they are all right.
    #[serde(default)]
    pub retry_wrong: bool,
}

fn default_question_count() -> u32 {
    25
}

fn default_columns() -> usize {
    5
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            operators: None,
            operator: None,
            first_operand: None,
            second_operand: None,
            visualize: false,
            unique: false,
            question_count: default_question_count(),
            columns: default_columns(),
            retry_wrong: false,
        }
    }
}

/// A validated [`DrillConfig`], ready to drive a session.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub operators: OperatorSet,
    pub pins: Pins,
    pub question_count: u32,
    pub columns: usize,
    pub visualize: bool,
    pub unique: bool,
    pub retry_wrong: bool,
}

impl DrillConfig {
    /// Check ranges and resolve operators and pins.
    pub fn resolve(&self) -> Result<RunSettings, DrillError> {
        if self.question_count == 0 {
            return Err(DrillError::InvalidConfig(
                "question count must be greater than 0".into(),
            ));
        }
        if self.columns == 0 {
            return Err(DrillError::InvalidConfig(
                "columns must be greater than 0".into(),
            ));
        }

        let pinned = self
            .operator
            .as_deref()
            .map(str::parse::<Operator>)
            .transpose()?;
        let operators = match (&self.operators, pinned) {
            (Some(ops), _) => OperatorSet::parse(ops)?,
            (None, Some(op)) => OperatorSet::single(op),
            (None, None) => OperatorSet::default(),
        };
        if let Some(op) = pinned {
            if !operators.contains(op) {
                return Err(DrillError::InvalidOperator(format!(
                    "{op} is not among the enabled operators {operators}"
                )));
            }
        }

        Ok(RunSettings {
            operators,
            pins: Pins {
                operator: pinned,
                first: self.first_operand.map(i64::from),
                second: self.second_operand.map(i64::from),
            },
            question_count: self.question_count,
            columns: self.columns,
            visualize: self.visualize,
            unique: self.unique,
            retry_wrong: self.retry_wrong,
        })
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mathdrill.toml` in the current directory
/// 2. `~/.config/mathdrill/config.toml`
///
/// Environment variable overrides: `MATHDRILL_OPERATORS`, `MATHDRILL_QUESTIONS`.
pub fn load_config() -> Result<DrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            toml::from_str::<DrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

fn apply_env_overrides(
    mut config: DrillConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DrillConfig> {
    if let Some(ops) = lookup("MATHDRILL_OPERATORS") {
        config.operators = Some(ops);
    }
    if let Some(count) = lookup("MATHDRILL_QUESTIONS") {
        config.question_count = count
            .trim()
            .parse()
            .with_context(|| format!("MATHDRILL_QUESTIONS is not a number: '{count}'"))?;
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathdrill"))
}
