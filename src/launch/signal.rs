// src/launch/signal.rs

//! Named signals that can be delivered to a child.

use std::fmt;
use std::str::FromStr;

use crate::errors::LauncherError;

/// Signals the wrapper knows how to relay.
///
/// Parsed from `"SIGINT"`, `"INT"` or `"int"` style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSignal {
    Interrupt,
    Terminate,
    Kill,
    Hangup,
    Quit,
}

impl ChildSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            ChildSignal::Interrupt => "SIGINT",
            ChildSignal::Terminate => "SIGTERM",
            ChildSignal::Kill => "SIGKILL",
            ChildSignal::Hangup => "SIGHUP",
            ChildSignal::Quit => "SIGQUIT",
        }
    }

    #[cfg(unix)]
    pub(crate) fn to_nix(self) -> nix::sys::signal::Signal {
        use nix::sys::signal::Signal;

        match self {
            ChildSignal::Interrupt => Signal::SIGINT,
            ChildSignal::Terminate => Signal::SIGTERM,
            ChildSignal::Kill => Signal::SIGKILL,
            ChildSignal::Hangup => Signal::SIGHUP,
            ChildSignal::Quit => Signal::SIGQUIT,
        }
    }
}

impl fmt::Display for ChildSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChildSignal {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let bare = upper.strip_prefix("SIG").unwrap_or(&upper);
        match bare {
            "INT" => Ok(ChildSignal::Interrupt),
            "TERM" => Ok(ChildSignal::Terminate),
            "KILL" => Ok(ChildSignal::Kill),
            "HUP" => Ok(ChildSignal::Hangup),
            "QUIT" => Ok(ChildSignal::Quit),
            _ => Err(LauncherError::UnknownSignal(s.to_string())),
        }
    }
}

/// Conventional name for a raw signal number, e.g. `2` -> `"SIGINT"`.
#[cfg(unix)]
pub(crate) fn signal_name(number: i32) -> String {
    nix::sys::signal::Signal::try_from(number)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| format!("SIG{number}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        for name in ["SIGINT", "INT", "int", " sigint "] {
            assert_eq!(name.parse::<ChildSignal>().unwrap(), ChildSignal::Interrupt);
        }
        assert_eq!("sigterm".parse::<ChildSignal>().unwrap(), ChildSignal::Terminate);
        assert_eq!("HUP".parse::<ChildSignal>().unwrap(), ChildSignal::Hangup);
    }

    #[test]
    fn unknown_names_are_rejected() {
        match "SIGWHAT".parse::<ChildSignal>() {
            Err(LauncherError::UnknownSignal(name)) => assert_eq!(name, "SIGWHAT"),
            other => panic!("expected UnknownSignal, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn raw_numbers_map_to_names() {
        assert_eq!(signal_name(2), "SIGINT");
        assert_eq!(signal_name(15), "SIGTERM");
        assert_eq!(signal_name(9999), "SIG9999");
    }
}
