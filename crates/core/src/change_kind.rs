use std::fmt::Display;

use colored::Colorize;
use serde::Serialize;

/// How a bundle line's `Bundle-Version` clause was produced.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// A new clause was added to the wrap declaration
    Inserted,
    /// An existing clause carried a different version
    Replaced,
}

impl Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Inserted => "Inserted".green().bold(),
                Self::Replaced => "Replaced".yellow().bold(),
            }
        )
    }
}
