//! Shell command parsing
//!
//! Lines starting with `.` are commands; anything else is a query.

use anyhow::{anyhow, Result};

/// Available shell commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show help information
    Help,
    /// Exit the shell
    Quit,
    /// Show how many records match the current query
    Count,
    /// List the columns of the dataset
    Columns,
    /// Limit rendered rows; `None` shows all
    Sample(Option<usize>),
    /// Clear the current query
    Reset,
    /// Select the next matching record
    Next,
    /// Select the previous matching record
    Previous,
}

/// Parse a command string into a ShellCommand
pub fn parse_command(input: &str) -> Result<ShellCommand> {
    let trimmed = input.trim();

    let Some(body) = trimmed.strip_prefix('.') else {
        return Err(anyhow!("Commands must start with '.'"));
    };

    let parts: Vec<&str> = body.split_whitespace().collect();

    if parts.is_empty() {
        return Err(anyhow!("Empty command"));
    }

    match parts[0] {
        "help" | "h" => Ok(ShellCommand::Help),
        "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
        "count" => Ok(ShellCommand::Count),
        "columns" | "cols" => Ok(ShellCommand::Columns),
        "reset" => Ok(ShellCommand::Reset),
        "next" | "n" => Ok(ShellCommand::Next),
        "prev" | "p" => Ok(ShellCommand::Previous),
        "sample" => match parts.get(1) {
            None => Err(anyhow!("Usage: .sample <rows|all>")),
            Some(&"all") => Ok(ShellCommand::Sample(None)),
            Some(rows) => rows
                .parse::<usize>()
                .map(|rows| ShellCommand::Sample(Some(rows)))
                .map_err(|_| anyhow!("Usage: .sample <rows|all>")),
        },
        _ => Err(anyhow!("Unknown command: .{}", parts[0])),
    }
}
