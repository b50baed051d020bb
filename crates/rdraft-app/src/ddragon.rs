// Data Dragon catalog client.
//
// Fetches the published version list and the per-locale champion summary,
// and maps it onto the engine's `Catalog`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use rdraft_core::catalog::{Catalog, CatalogError, CatalogProvider, Locale};
use rdraft_core::config::CatalogConfig;
use rdraft_core::draft::ChampionRef;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// `champion.json`: `data` is keyed by champion id.
#[derive(Debug, Deserialize)]
struct ChampionFile {
    data: BTreeMap<String, ChampionEntry>,
}

#[derive(Debug, Deserialize)]
struct ChampionEntry {
    id: String,
    key: String,
    name: String,
    image: ChampionImage,
}

#[derive(Debug, Deserialize)]
struct ChampionImage {
    full: String,
}

impl From<ChampionEntry> for ChampionRef {
    fn from(entry: ChampionEntry) -> Self {
        ChampionRef::new(entry.id, entry.key, entry.name, entry.image.full)
    }
}

// ---------------------------------------------------------------------------
// DataDragonClient
// ---------------------------------------------------------------------------

pub struct DataDragonClient {
    http: reqwest::Client,
    base_url: String,
}

impl DataDragonClient {
    /// Build a client against `ddragon_base_url` with the configured timeout.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CatalogError::Http {
                url: config.ddragon_base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self::with_http(http, &config.ddragon_base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        DataDragonClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn versions_url(&self) -> String {
        format!("{}/api/versions.json", self.base_url)
    }

    pub fn champions_url(&self, version: &str, locale: Locale) -> String {
        format!(
            "{}/cdn/{}/data/{}/champion.json",
            self.base_url,
            version,
            locale.ddragon()
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, CatalogError> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(|e| CatalogError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| CatalogError::Decode {
            what: what.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogProvider for DataDragonClient {
    async fn latest_version(&self) -> Result<String, CatalogError> {
        let versions: Vec<String> = self.get_json(&self.versions_url(), "version list").await?;
        versions.into_iter().next().ok_or(CatalogError::NoVersions)
    }

    async fn catalog(&self, locale: Locale) -> Result<Catalog, CatalogError> {
        let version = self.latest_version().await?;
        let file: ChampionFile = self
            .get_json(&self.champions_url(&version, locale), "champion list")
            .await?;
        let champions: Vec<ChampionRef> = file.data.into_values().map(ChampionRef::from).collect();
        info!(
            "Fetched {} champions for {} ({})",
            champions.len(),
            version,
            locale.ddragon()
        );
        Ok(Catalog::new(version, locale, champions))
    }
}
