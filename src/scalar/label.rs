use std::fmt;

use serde::{Deserialize, Serialize};

/// A row label.
///
/// Labels order integers before strings, so a mixed index still sorts deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl Label {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Label::Int(_) => None,
            Label::Str(v) => Some(v.as_str()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(v) => write!(f, "{}", v),
            Label::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(value.into())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Str(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Str(value)
    }
}

impl From<&Label> for Label {
    fn from(value: &Label) -> Self {
        value.clone()
    }
}
