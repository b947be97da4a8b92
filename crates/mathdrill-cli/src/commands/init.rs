//! The `mathdrill init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = Path::new("mathdrill.toml");
    if path.exists() {
        println!("mathdrill.toml already exists, skipping.");
        return Ok(());
    }
    std::fs::write(path, SAMPLE_CONFIG).context("failed to write mathdrill.toml")?;
    println!("Created mathdrill.toml");

    println!("\nNext steps:");
    println!("  1. Edit mathdrill.toml to pick operators and a question count");
    println!("  2. Run: mathdrill run");
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathdrill configuration

# Operators to draw from: any of + - * /
operators = "+-*/"

# Ask only one operator
# operator = "*"

# Pin an operand
# first_operand = 7
# second_operand = 3

question_count = 25
columns = 5
visualize = false
unique = false
retry_wrong = false
"#;
