// Asset URL resolution for champion art, lane icons, profile icons and voice
// lines. Pure string building; nothing is fetched here.

use rdraft_core::config::CatalogConfig;
use rdraft_core::draft::{AvatarRef, ChampionRef, Lane};
use rdraft_core::protocol::VoiceCue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    ddragon_base: String,
    cdragon_base: String,
}

impl AssetResolver {
    pub fn new(ddragon_base: &str, cdragon_base: &str) -> Self {
        AssetResolver {
            ddragon_base: ddragon_base.trim_end_matches('/').to_string(),
            cdragon_base: cdragon_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.ddragon_base_url, &config.cdragon_base_url)
    }

    /// Square champion tile for a catalog version.
    pub fn champion_tile(&self, version: &str, champion: &ChampionRef) -> String {
        format!(
            "{}/cdn/{}/img/champion/{}",
            self.ddragon_base, version, champion.image
        )
    }

    /// Unversioned loading-screen art.
    pub fn loading_splash(&self, champion: &ChampionRef) -> String {
        format!(
            "{}/cdn/img/champion/loading/{}_0.jpg",
            self.ddragon_base, champion.id
        )
    }

    pub fn profile_icon(&self, version: &str, avatar: AvatarRef) -> String {
        format!(
            "{}/cdn/{}/img/profileicon/{}.png",
            self.ddragon_base, version, avatar
        )
    }

    pub fn lane_icon(&self, lane: Lane) -> String {
        format!(
            "{}/plugins/rcp-fe-lol-static-assets/global/default/svg/position-{}.svg",
            self.cdragon_base,
            lane.icon_slug()
        )
    }

    pub fn voice_line(&self, cue: &VoiceCue) -> String {
        format!(
            "{}/plugins/rcp-be-lol-game-data/global/{}/v1/{}/{}.ogg",
            self.cdragon_base,
            cue.locale.cdragon(),
            cue.kind.folder(),
            cue.champion_key
        )
    }
}
