use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Final investment call for a single token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    /// Safe default when the advisor is silent or unparseable.
    #[default]
    Hold,
    Avoid,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Hold => write!(f, "HOLD"),
            Self::Avoid => write!(f, "AVOID"),
        }
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "HOLD" => Ok(Self::Hold),
            "AVOID" => Ok(Self::Avoid),
            _ => Err(format!(
                "Invalid decision: '{}'. Use 'BUY', 'HOLD' or 'AVOID'",
                s
            )),
        }
    }
}
