//! Finding records and result sinks.
//!
//! Every check emits one immutable finding per device (or per device and
//! interface). Failures to locate data are encoded in the finding's status
//! rather than dropped, so the number of findings always follows the
//! number of inputs iterated.

use std::fmt;

use serde::Serialize;

/// Declare a status enum whose variants carry a fixed report label.
///
/// The label is used for both `Display` and serialization.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Report label for this status.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use status_enum;

status_enum! {
    /// Outcome of a per-device pattern search.
    pub enum MatchStatus {
        /// The pattern matched at least once.
        Found => "FOUND",
        /// The command output was present but nothing matched.
        NoMatchesFound => "No matches found",
        /// The command output is missing from the log.
        CommandNotFound => "COMMAND NOT FOUND",
        /// No device record carries the log's serial number.
        DeviceNotFound => "DEVICE NOT FOUND",
    }
}

impl MatchStatus {
    /// Status for a list of matches taken from a present command output.
    pub fn from_matches<T>(matches: &[T]) -> Self {
        if matches.is_empty() {
            Self::NoMatchesFound
        } else {
            Self::Found
        }
    }
}

/// A single compliance result.
pub trait Finding: Serialize + fmt::Debug {
    /// Hostname the finding belongs to.
    fn hostname(&self) -> &str;

    /// Interface the finding belongs to, for per-interface checks.
    fn interface(&self) -> Option<&str> {
        None
    }

    /// Report label of the finding's status.
    fn status(&self) -> &'static str;

    /// Whether the finding reports the condition the check looks for.
    fn is_positive(&self) -> bool;
}

/// Consumer of findings, such as a report writer.
pub trait FindingSink<F> {
    /// Accept one finding.
    fn accept(&mut self, finding: F);

    /// Accept every finding of an iterator, in order.
    fn accept_all<I>(&mut self, findings: I)
    where
        I: IntoIterator<Item = F>,
        Self: Sized,
    {
        for finding in findings {
            self.accept(finding);
        }
    }
}

impl<F> FindingSink<F> for Vec<F> {
    fn accept(&mut self, finding: F) {
        self.push(finding);
    }
}

/// Split findings into positive and negative ones, keeping their order.
pub fn partition<F: Finding>(findings: Vec<F>) -> (Vec<F>, Vec<F>) {
    findings.into_iter().partition(|finding| finding.is_positive())
}
