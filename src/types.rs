// src/types.rs

use std::fmt;

use serde::Deserialize;

/// What the child's standard input is connected to.
///
/// - `Null`: the child reads EOF immediately (default).
/// - `Inherit`: the child shares the wrapper's stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdinMode {
    Null,
    Inherit,
}

impl Default for StdinMode {
    fn default() -> Self {
        StdinMode::Null
    }
}

/// Which of the child's output streams a piece of data or an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}
