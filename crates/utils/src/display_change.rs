use colored::Colorize;
use wrapver_core::ChangeKind;

/// Render one rewritten line as a two-line diff.
pub fn display_change(line_number: usize, kind: ChangeKind, before: &str, after: &str) -> String {
    format!(
        "{} {}\n  {} {}\n  {} {}",
        format!("{line_number}:").bold(),
        kind,
        "-".red(),
        before.trim().red(),
        "+".green(),
        after.trim().green()
    )
}

pub fn display_skipped(line_number: usize, reason: &str) -> String {
    format!(
        "{} {} {}",
        format!("{line_number}:").bold(),
        "Skipped".bright_black().bold(),
        reason
    )
}
