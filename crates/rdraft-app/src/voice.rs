// Voice-over collaborator. The app only emits cues; playback belongs to
// whatever sink is plugged in.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use rdraft_core::protocol::VoiceCue;

use crate::assets::AssetResolver;

/// Voice lines play at this fraction of the master volume.
pub const VOICE_GAIN: f32 = 0.5;

/// The reveal sting plays at this fraction of the master volume.
pub const STING_GAIN: f32 = 0.1;

pub fn voice_volume(master: f32) -> f32 {
    VOICE_GAIN * master.clamp(0.0, 1.0)
}

pub fn sting_volume(master: f32) -> f32 {
    STING_GAIN * master.clamp(0.0, 1.0)
}

/// Receives fire-and-forget audio notifications. Implementations must not
/// block the caller.
pub trait VoiceSink: Send + Sync {
    /// Stop whatever line is playing and play `cue`.
    fn play(&self, cue: VoiceCue);

    /// Warm a cache for a line that is likely to play soon.
    fn preload(&self, _cue: VoiceCue) {}

    /// Short sound when a slot is revealed.
    fn reveal_sting(&self, _volume: f32) {}
}

/// Logs cues with their resolved URL. Used when no audio backend is present.
pub struct TracingVoiceSink {
    assets: AssetResolver,
}

impl TracingVoiceSink {
    pub fn new(assets: AssetResolver) -> Self {
        TracingVoiceSink { assets }
    }
}

impl VoiceSink for TracingVoiceSink {
    fn play(&self, cue: VoiceCue) {
        info!(
            "Voice {} ({}) at {:.2}: {}",
            cue.champion_id,
            cue.cache_key(),
            cue.volume,
            self.assets.voice_line(&cue)
        );
    }

    fn preload(&self, cue: VoiceCue) {
        debug!("Preload voice {}", cue.cache_key());
    }

    fn reveal_sting(&self, volume: f32) {
        debug!("Reveal sting at {:.2}", volume);
    }
}

/// Forwards cues over a bounded channel. Cues are dropped when the channel
/// is full or closed.
pub struct ChannelVoiceSink {
    tx: mpsc::Sender<VoiceCue>,
}

impl ChannelVoiceSink {
    pub fn new(tx: mpsc::Sender<VoiceCue>) -> Self {
        ChannelVoiceSink { tx }
    }
}

impl VoiceSink for ChannelVoiceSink {
    fn play(&self, cue: VoiceCue) {
        if let Err(e) = self.tx.try_send(cue) {
            warn!("Dropping voice cue: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdraft_core::catalog::Locale;
    use rdraft_core::draft::ChampionRef;
    use rdraft_core::protocol::CueKind;

    fn cue() -> VoiceCue {
        VoiceCue::new(
            &ChampionRef::new("Ahri", "103", "Ahri", "Ahri.png"),
            Locale::Ko,
            CueKind::Choice,
            voice_volume(0.8),
        )
    }

    #[test]
    fn volumes_scale_master() {
        assert!((voice_volume(1.0) - 0.5).abs() < f32::EPSILON);
        assert!((voice_volume(0.5) - 0.25).abs() < f32::EPSILON);
        assert!((sting_volume(1.0) - 0.1).abs() < f32::EPSILON);
        assert_eq!(voice_volume(3.0), 0.5);
        assert_eq!(voice_volume(-1.0), 0.0);
    }

    #[tokio::test]
    async fn channel_sink_forwards_cues() {
        let (tx, mut rx) = mpsc::channel(4);
        let sink = ChannelVoiceSink::new(tx);
        sink.play(cue());
        sink.preload(cue());
        let received = rx.recv().await.unwrap();
        assert_eq!(received.champion_key, "103");
        assert_eq!(received.locale, Locale::Ko);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_sink_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let sink = ChannelVoiceSink::new(tx);
        sink.play(cue());
        sink.play(cue());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
