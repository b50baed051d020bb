// Champion references as served by the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A read-only champion entry from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChampionRef {
    /// Stable textual id (e.g. "MonkeyKing"). Unique within a catalog.
    pub id: String,
    /// Numeric key as a string (e.g. "62"). Voice-over assets are keyed on it.
    pub key: String,
    /// Localized display name (e.g. "Wukong").
    pub name: String,
    /// Tile image file name (e.g. "MonkeyKing.png").
    pub image: String,
}

impl ChampionRef {
    pub fn new(
        id: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        ChampionRef {
            id: id.into(),
            key: key.into(),
            name: name.into(),
            image: image.into(),
        }
    }
}

impl fmt::Display for ChampionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
