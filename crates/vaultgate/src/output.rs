// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON rendering helpers shared by the subcommands.

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;
use vaultgate_core::VaultgateError;

use crate::OutputArgs;

impl OutputArgs {
    /// Colors only when allowed and stdout is a terminal.
    pub fn use_color(&self) -> bool {
        !self.plain && std::io::stdout().is_terminal()
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), VaultgateError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| VaultgateError::Internal(format!("failed to render JSON: {e}")))?;
    println!("{rendered}");
    Ok(())
}

pub fn header(title: &str) {
    println!();
    println!("  {title}");
    println!("  {}", "-".repeat(35));
}

/// A pass/fail marker, colored or bracketed.
pub fn mark(ok: bool, use_color: bool) -> String {
    match (ok, use_color) {
        (true, true) => "✓".green().to_string(),
        (false, true) => "✗".red().to_string(),
        (true, false) => "[OK]".to_string(),
        (false, false) => "[FAIL]".to_string(),
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_marks_are_bracketed() {
        assert_eq!(mark(true, false), "[OK]");
        assert_eq!(mark(false, false), "[FAIL]");
    }

    #[test]
    fn plain_flag_disables_color() {
        let args = OutputArgs {
            json: false,
            plain: true,
        };
        assert!(!args.use_color());
    }
}
