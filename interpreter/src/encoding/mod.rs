pub mod continuation;
pub mod direct;
pub mod structures;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::RuntimeError;

/// The three ways of building and running the FizzBuzz program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Command vectors transformed by plain closures, run by a lazy right fold.
    Direct,
    /// `Program` and `Context` values composed algebraically.
    #[default]
    Structures,
    /// Programs are `String -> String` functions sequenced by composition.
    Continuation,
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [
        Encoding::Direct,
        Encoding::Structures,
        Encoding::Continuation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Direct => "direct",
            Encoding::Structures => "structures",
            Encoding::Continuation => "continuation",
        }
    }

    /// Compute the FizzBuzz line for `n`.
    pub fn fizz_buzz(self, n: u64) -> String {
        match self {
            Encoding::Direct => direct::fizz_buzz(n),
            Encoding::Structures => structures::fizz_buzz(n),
            Encoding::Continuation => continuation::fizz_buzz(n),
        }
    }
}

impl FromStr for Encoding {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RuntimeError::UnknownEncoding(s.to_string()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
