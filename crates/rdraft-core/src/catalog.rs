// Champion catalog contract: display locales, the catalog snapshot handed to
// the engine, and the provider trait implemented by the HTTP client.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::champion::ChampionRef;

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// Display language. Selects both the champion name locale and the voice-over
/// locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
    Es,
    De,
    It,
    Pt,
    Ru,
    Tr,
    Ja,
    Ko,
    Ar,
}

impl Locale {
    pub const ALL: [Locale; 11] = [
        Locale::Fr,
        Locale::En,
        Locale::Es,
        Locale::De,
        Locale::It,
        Locale::Pt,
        Locale::Ru,
        Locale::Tr,
        Locale::Ja,
        Locale::Ko,
        Locale::Ar,
    ];

    pub fn from_code(s: &str) -> Option<Self> {
        let code = s.trim().to_lowercase();
        Locale::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
            Locale::Es => "es",
            Locale::De => "de",
            Locale::It => "it",
            Locale::Pt => "pt",
            Locale::Ru => "ru",
            Locale::Tr => "tr",
            Locale::Ja => "ja",
            Locale::Ko => "ko",
            Locale::Ar => "ar",
        }
    }

    /// Data Dragon locale for champion data. Arabic has no Data Dragon
    /// translation and falls back to English names.
    pub fn ddragon(&self) -> &'static str {
        match self {
            Locale::Fr => "fr_FR",
            Locale::En => "en_US",
            Locale::Es => "es_ES",
            Locale::De => "de_DE",
            Locale::It => "it_IT",
            Locale::Pt => "pt_BR",
            Locale::Ru => "ru_RU",
            Locale::Tr => "tr_TR",
            Locale::Ja => "ja_JP",
            Locale::Ko => "ko_KR",
            Locale::Ar => "en_US",
        }
    }

    /// CommunityDragon locale directory for voice-over files.
    pub fn cdragon(&self) -> &'static str {
        match self {
            Locale::Fr => "fr_fr",
            Locale::En => "default",
            Locale::Es => "es_es",
            Locale::De => "de_de",
            Locale::It => "it_it",
            Locale::Pt => "pt_br",
            Locale::Ru => "ru_ru",
            Locale::Tr => "tr_tr",
            Locale::Ja => "ja_jp",
            Locale::Ko => "ko_kr",
            Locale::Ar => "ar_ae",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A read-only champion pool for one game version and locale.
///
/// Providers guarantee ids are unique; the engine does not re-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub locale: Locale,
    pub champions: Vec<ChampionRef>,
}

impl Catalog {
    pub fn new(version: impl Into<String>, locale: Locale, champions: Vec<ChampionRef>) -> Self {
        Catalog {
            version: version.into(),
            locale,
            champions,
        }
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ChampionRef> {
        self.champions.iter().find(|c| c.id == id)
    }
}

// ---------------------------------------------------------------------------
// Provider contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },

    #[error("version list is empty")]
    NoVersions,
}

/// Source of champion catalogs.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Latest published game version (e.g. "14.24.1").
    async fn latest_version(&self) -> Result<String, CatalogError>;

    /// Champion pool for the latest version in `locale`.
    async fn catalog(&self, locale: Locale) -> Result<Catalog, CatalogError>;
}

/// Fixed in-memory catalog; names do not change with the locale.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    version: String,
    champions: Vec<ChampionRef>,
}

impl StaticCatalog {
    pub fn new(version: impl Into<String>, champions: Vec<ChampionRef>) -> Self {
        StaticCatalog {
            version: version.into(),
            champions,
        }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn latest_version(&self) -> Result<String, CatalogError> {
        Ok(self.version.clone())
    }

    async fn catalog(&self, locale: Locale) -> Result<Catalog, CatalogError> {
        Ok(Catalog::new(self.version.clone(), locale, self.champions.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
        }
        assert_eq!(Locale::from_code(" EN "), Some(Locale::En));
        assert_eq!(Locale::from_code("xx"), None);
    }

    #[test]
    fn arabic_falls_back_to_english_champion_data() {
        assert_eq!(Locale::Ar.ddragon(), "en_US");
        assert_eq!(Locale::Ar.cdragon(), "ar_ae");
        assert_eq!(Locale::En.cdragon(), "default");
    }

    #[test]
    fn locale_deserializes_from_lowercase_code() {
        #[derive(Deserialize)]
        struct Wrapper {
            locale: Locale,
        }
        let w: Wrapper = toml::from_str("locale = \"ko\"").unwrap();
        assert_eq!(w.locale, Locale::Ko);
    }

    #[test]
    fn catalog_find_by_id() {
        let catalog = Catalog::new(
            "1.0",
            Locale::En,
            vec![ChampionRef::new("Ahri", "103", "Ahri", "Ahri.png")],
        );
        assert_eq!(catalog.find("Ahri").map(|c| c.key.as_str()), Some("103"));
        assert!(catalog.find("Zed").is_none());
    }

    #[tokio::test]
    async fn static_catalog_tags_requested_locale() {
        let provider = StaticCatalog::new(
            "14.1.1",
            vec![ChampionRef::new("Ahri", "103", "Ahri", "Ahri.png")],
        );
        assert_eq!(provider.latest_version().await.unwrap(), "14.1.1");
        let catalog = provider.catalog(Locale::De).await.unwrap();
        assert_eq!(catalog.locale, Locale::De);
        assert_eq!(catalog.len(), 1);
    }
}
