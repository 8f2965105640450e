// Reveal stages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Closed: only the anchor cell (if any) is visible
    #[default]
    Initial,
    /// Cards are animating open
    Reveal,
    /// Settled: the background is shown directly
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::Reveal => "reveal",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" => Ok(Stage::Initial),
            "reveal" => Ok(Stage::Reveal),
            "done" => Ok(Stage::Done),
            other => Err(format!("unknown stage '{}'", other)),
        }
    }
}
