// The five fixed lanes a drafted champion can be assigned to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role on the map. Each lane can be held by at most one slot per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lane {
    Top,
    Jungle,
    Mid,
    Bottom,
    Support,
}

impl Lane {
    /// All lanes in display order. Variant order matches, so `Ord` sorts lanes
    /// the same way.
    pub const ALL: [Lane; 5] = [Lane::Top, Lane::Jungle, Lane::Mid, Lane::Bottom, Lane::Support];

    /// Parse a lane code.
    ///
    /// Accepts the display codes (`TOP`, `JGL`, `MID`, `ADC`, `SUPP`) and the
    /// common long forms (`jungle`, `middle`, `bot`, `bottom`, `support`, ...),
    /// case-insensitively.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TOP" => Some(Lane::Top),
            "JGL" | "JG" | "JUNGLE" => Some(Lane::Jungle),
            "MID" | "MIDDLE" => Some(Lane::Mid),
            "ADC" | "BOT" | "BOTTOM" => Some(Lane::Bottom),
            "SUPP" | "SUP" | "SUPPORT" | "UTILITY" => Some(Lane::Support),
            _ => None,
        }
    }

    /// Short display code.
    pub fn code(&self) -> &'static str {
        match self {
            Lane::Top => "TOP",
            Lane::Jungle => "JGL",
            Lane::Mid => "MID",
            Lane::Bottom => "ADC",
            Lane::Support => "SUPP",
        }
    }

    /// Position name used by the client asset bundle for lane icons.
    pub fn icon_slug(&self) -> &'static str {
        match self {
            Lane::Top => "top",
            Lane::Jungle => "jungle",
            Lane::Mid => "middle",
            Lane::Bottom => "bottom",
            Lane::Support => "utility",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
