// Application orchestrator: owns the draft session and routes user commands,
// catalog loads and timer events into it.

use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use rdraft_core::catalog::{Catalog, CatalogError, CatalogProvider, Locale};
use rdraft_core::config::Config;
use rdraft_core::draft::roster::random_avatar;
use rdraft_core::draft::{DraftError, DraftSession, Phase, RandomSource, RngSource};
use rdraft_core::mystery::MysteryRound;
use rdraft_core::protocol::{
    CatalogStatus, CueKind, MysteryView, SessionSnapshot, UiUpdate, UserCommand, VoiceCue,
};

use crate::reveal::{RevealEvent, RevealScheduler};
use crate::voice::{sting_volume, voice_volume, VoiceSink};

/// Result of a background catalog fetch, tagged with the load it belongs to.
#[derive(Debug)]
pub struct CatalogEvent {
    pub generation: u64,
    pub result: Result<Catalog, CatalogError>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub session: DraftSession,
    pub locale: Locale,
    pub master_volume: f32,
    pub mystery: Option<MysteryRound>,
    rng: RngSource<StdRng>,
    provider: Arc<dyn CatalogProvider>,
    catalog_tx: mpsc::Sender<CatalogEvent>,
    /// Bumped per catalog load. Results from superseded loads are dropped.
    catalog_generation: u64,
    catalog_task: Option<JoinHandle<()>>,
    reveals: RevealScheduler,
    voice: Arc<dyn VoiceSink>,
}

impl AppState {
    pub fn new(
        config: Config,
        rng: RngSource<StdRng>,
        provider: Arc<dyn CatalogProvider>,
        catalog_tx: mpsc::Sender<CatalogEvent>,
        reveal_tx: mpsc::Sender<RevealEvent>,
        voice: Arc<dyn VoiceSink>,
    ) -> Self {
        let reveals = RevealScheduler::new(&config.reveal, reveal_tx);
        AppState {
            locale: config.locale,
            master_volume: config.audio.master_volume,
            config,
            session: DraftSession::new(),
            mystery: None,
            rng,
            provider,
            catalog_tx,
            catalog_generation: 0,
            catalog_task: None,
            reveals,
            voice,
        }
    }

    pub fn build_snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    fn snapshot_update(&self) -> UiUpdate {
        UiUpdate::Snapshot(Box::new(self.build_snapshot()))
    }

    // -----------------------------------------------------------------------
    // Catalog loading
    // -----------------------------------------------------------------------

    /// Fetch the catalog for the current locale in the background. A load in
    /// flight is aborted and its result, if already queued, is ignored.
    pub fn load_catalog(&mut self) -> UiUpdate {
        if let Some(handle) = self.catalog_task.take() {
            handle.abort();
        }
        self.catalog_generation += 1;
        let generation = self.catalog_generation;
        let locale = self.locale;
        let provider = Arc::clone(&self.provider);
        let tx = self.catalog_tx.clone();

        self.catalog_task = Some(tokio::spawn(async move {
            let result = provider.catalog(locale).await;
            let _ = tx.send(CatalogEvent { generation, result }).await;
        }));
        info!("Loading catalog for {} (gen: {})", locale, generation);
        UiUpdate::Catalog(CatalogStatus::Loading { locale })
    }

    pub fn handle_catalog_event(&mut self, event: CatalogEvent) -> Vec<UiUpdate> {
        if event.generation != self.catalog_generation {
            debug!(
                "Discarding stale catalog result (event gen: {}, current gen: {})",
                event.generation, self.catalog_generation
            );
            return vec![];
        }
        self.catalog_task = None;

        match event.result {
            Ok(catalog) => {
                let status = CatalogStatus::Ready {
                    version: catalog.version.clone(),
                    locale: catalog.locale,
                    champions: catalog.len(),
                };
                self.session.set_catalog(catalog);
                vec![UiUpdate::Catalog(status), self.snapshot_update()]
            }
            Err(e) => {
                warn!("Catalog load failed for {}: {}", self.locale, e);
                // Fall back to the locale of the catalog still installed.
                if let Some(installed) = self.session.catalog().map(|c| c.locale) {
                    self.locale = installed;
                }
                vec![UiUpdate::Catalog(CatalogStatus::Failed {
                    message: e.to_string(),
                })]
            }
        }
    }

    // -----------------------------------------------------------------------
    // Timer events
    // -----------------------------------------------------------------------

    pub fn handle_reveal_event(&mut self, event: RevealEvent) -> Vec<UiUpdate> {
        if event.generation() != self.session.generation() {
            debug!(
                "Discarding stale reveal event (event gen: {}, current gen: {})",
                event.generation(),
                self.session.generation()
            );
            return vec![];
        }

        match event {
            RevealEvent::SlotRevealed { generation } => {
                if !self.session.reveal_next(generation) {
                    return vec![];
                }
                self.voice.reveal_sting(sting_volume(self.master_volume));
                if self.session.phase() == Phase::AwaitingPick {
                    self.start_roulette();
                }
                vec![self.snapshot_update()]
            }
            RevealEvent::Roulette {
                turn_index,
                name,
                settled,
                ..
            } => {
                if turn_index != self.session.turn_index() {
                    debug!("Discarding roulette frame for turn {}", turn_index);
                    return vec![];
                }
                vec![UiUpdate::Roulette { name, settled }]
            }
        }
    }

    /// Spin through random roster names, settling on the current player.
    fn start_roulette(&mut self) {
        let Some(current) = self.session.current_player().map(|p| p.name.clone()) else {
            return;
        };
        let names: Vec<String> = self.session.turn_order().iter().map(|p| p.name.clone()).collect();
        let frames = (0..self.reveals.roulette_ticks())
            .map(|_| names[self.rng.pick(names.len())].clone())
            .collect();
        self.reveals.schedule_roulette(
            self.session.generation(),
            self.session.turn_index(),
            frames,
            current,
        );
    }

    // -----------------------------------------------------------------------
    // User commands
    // -----------------------------------------------------------------------

    /// Apply a user command. Rejected commands leave the session unchanged
    /// and produce a single `Rejected` update.
    pub fn handle_command(&mut self, cmd: UserCommand) -> Vec<UiUpdate> {
        let action = command_name(&cmd);
        match self.apply_command(cmd) {
            Ok(updates) => updates,
            Err(e) => {
                warn!("Rejected {}: {}", action, e);
                vec![UiUpdate::Rejected {
                    action: action.to_string(),
                    reason: e.to_string(),
                }]
            }
        }
    }

    fn apply_command(&mut self, cmd: UserCommand) -> Result<Vec<UiUpdate>, DraftError> {
        match cmd {
            UserCommand::AddPlayer { name, avatar } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Ok(vec![UiUpdate::Notice("Player name is empty".into())]);
                }
                let avatar = avatar.unwrap_or_else(|| random_avatar(&mut self.rng));
                if self.session.add_player(name, avatar)? {
                    Ok(vec![self.snapshot_update()])
                } else {
                    Ok(vec![UiUpdate::Notice("Roster is full".into())])
                }
            }
            UserCommand::RemovePlayer(index) => {
                self.session.remove_player(index)?;
                Ok(vec![self.snapshot_update()])
            }
            UserCommand::StartDraw => {
                let generation = self.session.start_draw(&mut self.rng)?;
                self.after_draw(generation);
                Ok(vec![self.snapshot_update()])
            }
            UserCommand::RestartDraw => {
                let generation = self.session.restart_draw(&mut self.rng)?;
                self.after_draw(generation);
                Ok(vec![self.snapshot_update()])
            }
            UserCommand::SelectSlot(uid) => {
                self.session.select_slot(uid)?;
                Ok(vec![self.snapshot_update()])
            }
            UserCommand::CancelSelection => {
                self.session.cancel_selection()?;
                Ok(vec![self.snapshot_update()])
            }
            UserCommand::AssignLane(lane) => {
                let assignment = self.session.assign_lane(lane)?;
                self.play(&assignment.champion, CueKind::Choice);
                let mut updates = vec![self.snapshot_update()];
                if assignment.complete {
                    self.reveals.cancel_roulette();
                    updates.push(UiUpdate::Notice("Draft complete".into()));
                } else {
                    self.start_roulette();
                }
                Ok(updates)
            }
            UserCommand::Reroll(index) => {
                let outcome = self.session.reroll(index, &mut self.rng)?;
                self.play(&outcome.champion, CueKind::Choice);
                Ok(vec![self.snapshot_update()])
            }
            UserCommand::Reset => {
                self.reveals.cancel_all();
                self.session.reset();
                Ok(vec![self.snapshot_update()])
            }
            UserCommand::SetLocale(locale) => {
                if self.session.catalog().map(|c| c.locale) == Some(locale) {
                    return Ok(vec![UiUpdate::Notice(format!("Locale is already {locale}"))]);
                }
                self.locale = locale;
                Ok(vec![self.load_catalog()])
            }
            UserCommand::SetVolume(volume) => {
                if !(0.0..=1.0).contains(&volume) {
                    return Ok(vec![UiUpdate::Rejected {
                        action: "set volume".into(),
                        reason: format!("volume must be between 0.0 and 1.0, got {volume}"),
                    }]);
                }
                self.master_volume = volume;
                info!("Master volume set to {:.2}", volume);
                Ok(vec![UiUpdate::Notice(format!(
                    "Volume {}%",
                    (volume * 100.0).round()
                ))])
            }
            UserCommand::MysteryStart => {
                let catalog = self.session.catalog().ok_or(DraftError::CatalogNotReady)?;
                let round = MysteryRound::start(&catalog.champions, &mut self.rng)?;
                let (champion, kind) = (round.voiced().clone(), round.kind());
                let view = round.view();
                self.mystery = Some(round);
                self.play(&champion, kind);
                Ok(vec![UiUpdate::Mystery(view)])
            }
            UserCommand::MysteryReplay => {
                let Some(round) = &self.mystery else {
                    return Ok(vec![UiUpdate::Notice("No mystery round running".into())]);
                };
                let (champion, kind) = (round.voiced().clone(), round.kind());
                self.play(&champion, kind);
                Ok(vec![])
            }
            UserCommand::MysteryReveal => {
                let Some(round) = self.mystery.as_mut() else {
                    return Ok(vec![UiUpdate::Notice("No mystery round running".into())]);
                };
                round.reveal();
                Ok(vec![UiUpdate::Mystery(round.view())])
            }
            UserCommand::MysteryGuess(guess) => {
                let Some(round) = self.mystery.as_mut() else {
                    return Ok(vec![UiUpdate::Notice("No mystery round running".into())]);
                };
                if round.is_correct(&guess) {
                    let name = round.reveal().name.clone();
                    Ok(vec![
                        UiUpdate::Notice(format!("Correct, it was {name}")),
                        UiUpdate::Mystery(round.view()),
                    ])
                } else {
                    Ok(vec![UiUpdate::Notice(format!("Not {}", guess.trim()))])
                }
            }
            UserCommand::MysteryClose => match self.mystery.take() {
                Some(mut round) => {
                    round.reveal();
                    Ok(vec![UiUpdate::Mystery(MysteryView {
                        active: false,
                        ..round.view()
                    })])
                }
                None => Ok(vec![]),
            },
            UserCommand::Quit => Ok(vec![]),
        }
    }

    fn after_draw(&mut self, generation: u64) {
        self.reveals
            .schedule_reveals(generation, self.session.slots().len());
        if let Some(catalog) = self.session.catalog() {
            for slot in self.session.slots() {
                self.voice.preload(VoiceCue::new(
                    &slot.champion,
                    catalog.locale,
                    CueKind::Choice,
                    voice_volume(self.master_volume),
                ));
            }
        }
    }

    fn play(&self, champion: &rdraft_core::draft::ChampionRef, kind: CueKind) {
        let locale = self
            .session
            .catalog()
            .map(|c| c.locale)
            .unwrap_or(self.locale);
        self.voice.play(VoiceCue::new(
            champion,
            locale,
            kind,
            voice_volume(self.master_volume),
        ));
    }

    pub fn shutdown(&mut self) {
        self.reveals.cancel_all();
        if let Some(handle) = self.catalog_task.take() {
            handle.abort();
        }
    }
}

fn command_name(cmd: &UserCommand) -> &'static str {
    match cmd {
        UserCommand::AddPlayer { .. } => "add player",
        UserCommand::RemovePlayer(_) => "remove player",
        UserCommand::StartDraw => "start draw",
        UserCommand::SelectSlot(_) => "select slot",
        UserCommand::CancelSelection => "cancel selection",
        UserCommand::AssignLane(_) => "assign lane",
        UserCommand::Reroll(_) => "reroll",
        UserCommand::RestartDraw => "restart draw",
        UserCommand::Reset => "reset",
        UserCommand::SetLocale(_) => "set locale",
        UserCommand::SetVolume(_) => "set volume",
        UserCommand::MysteryStart => "start mystery",
        UserCommand::MysteryReveal => "reveal mystery",
        UserCommand::MysteryReplay => "replay mystery",
        UserCommand::MysteryGuess(_) => "guess mystery",
        UserCommand::MysteryClose => "close mystery",
        UserCommand::Quit => "quit",
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application event loop.
///
/// Listens on three channels using `tokio::select!`:
/// 1. User commands from the presentation layer
/// 2. Catalog fetch results
/// 3. Reveal and roulette timer events
///
/// Pushes UI updates through `ui_tx`. The initial catalog load is started
/// here.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut catalog_rx: mpsc::Receiver<CatalogEvent>,
    mut reveal_rx: mpsc::Receiver<RevealEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let loading = state.load_catalog();
    let _ = ui_tx.send(loading).await;
    let _ = ui_tx.send(state.snapshot_update()).await;

    loop {
        let updates = tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => state.handle_command(cmd),
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            Some(event) = catalog_rx.recv() => state.handle_catalog_event(event),

            Some(event) = reveal_rx.recv() => state.handle_reveal_event(event),
        };

        for update in updates {
            if ui_tx.send(update).await.is_err() {
                info!("UI channel closed, shutting down");
                state.shutdown();
                return Ok(());
            }
        }
    }

    state.shutdown();
    info!("Application event loop exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdraft_core::catalog::StaticCatalog;
    use rdraft_core::draft::{ChampionRef, Lane, SlotUid};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        played: Mutex<Vec<VoiceCue>>,
        stings: Mutex<usize>,
    }

    impl VoiceSink for RecordingSink {
        fn play(&self, cue: VoiceCue) {
            self.played.lock().unwrap().push(cue);
        }

        fn reveal_sting(&self, _volume: f32) {
            *self.stings.lock().unwrap() += 1;
        }
    }

    fn champions(n: usize) -> Vec<ChampionRef> {
        (0..n)
            .map(|i| ChampionRef::new(format!("C{i}"), format!("{}", 10 + i), format!("Champ {i}"), format!("C{i}.png")))
            .collect()
    }

    struct Harness {
        state: AppState,
        sink: Arc<RecordingSink>,
        catalog_rx: mpsc::Receiver<CatalogEvent>,
        reveal_rx: mpsc::Receiver<RevealEvent>,
    }

    fn harness() -> Harness {
        let (catalog_tx, catalog_rx) = mpsc::channel(8);
        let (reveal_tx, reveal_rx) = mpsc::channel(64);
        let sink = Arc::new(RecordingSink::default());
        let mut config = Config::default();
        config.reveal.roulette_ticks = 2;
        let state = AppState::new(
            config,
            RngSource::seeded(99),
            Arc::new(StaticCatalog::new("14.1.1", champions(10))),
            catalog_tx,
            reveal_tx,
            sink.clone(),
        );
        Harness {
            state,
            sink,
            catalog_rx,
            reveal_rx,
        }
    }

    impl Harness {
        async fn load(&mut self) {
            self.state.load_catalog();
            let event = self.catalog_rx.recv().await.unwrap();
            self.state.handle_catalog_event(event);
        }

        fn add(&mut self, name: &str) {
            self.state.handle_command(UserCommand::AddPlayer {
                name: name.into(),
                avatar: Some(1),
            });
        }

        /// Drain timer events until every slot is revealed.
        async fn reveal_all(&mut self) {
            while self.state.session.phase() == Phase::Drawing {
                let event = self.reveal_rx.recv().await.unwrap();
                self.state.handle_reveal_event(event);
            }
        }
    }

    fn rejected(updates: &[UiUpdate]) -> bool {
        matches!(updates, [UiUpdate::Rejected { .. }])
    }

    #[tokio::test]
    async fn draw_before_catalog_is_rejected() {
        let mut h = harness();
        h.add("A");
        h.add("B");
        let updates = h.state.handle_command(UserCommand::StartDraw);
        match updates.as_slice() {
            [UiUpdate::Rejected { action, reason }] => {
                assert_eq!(action, "start draw");
                assert!(reason.contains("not loaded"));
            }
            other => panic!("expected rejection, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn catalog_load_reports_ready() {
        let mut h = harness();
        let loading = h.state.load_catalog();
        assert_eq!(loading, UiUpdate::Catalog(CatalogStatus::Loading { locale: Locale::Fr }));
        let event = h.catalog_rx.recv().await.unwrap();
        let updates = h.state.handle_catalog_event(event);
        assert_eq!(
            updates[0],
            UiUpdate::Catalog(CatalogStatus::Ready {
                version: "14.1.1".into(),
                locale: Locale::Fr,
                champions: 10
            })
        );
        assert!(h.state.session.catalog().is_some());
    }

    /// Fails the first `failures` loads, then serves a static catalog.
    struct FlakyCatalog {
        failures: AtomicUsize,
        inner: StaticCatalog,
    }

    #[async_trait]
    impl CatalogProvider for FlakyCatalog {
        async fn latest_version(&self) -> Result<String, CatalogError> {
            self.inner.latest_version().await
        }

        async fn catalog(&self, locale: Locale) -> Result<Catalog, CatalogError> {
            let left = self.failures.load(Ordering::SeqCst);
            if locale == Locale::De && left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                return Err(CatalogError::NoVersions);
            }
            self.inner.catalog(locale).await
        }
    }

    #[tokio::test]
    async fn failed_locale_switch_can_be_retried() {
        let (catalog_tx, mut catalog_rx) = mpsc::channel(8);
        let (reveal_tx, _reveal_rx) = mpsc::channel(8);
        let provider = FlakyCatalog {
            failures: AtomicUsize::new(1),
            inner: StaticCatalog::new("14.1.1", champions(4)),
        };
        let mut state = AppState::new(
            Config::default(),
            RngSource::seeded(5),
            Arc::new(provider),
            catalog_tx,
            reveal_tx,
            Arc::new(RecordingSink::default()),
        );
        state.load_catalog();
        let event = catalog_rx.recv().await.unwrap();
        state.handle_catalog_event(event);

        state.handle_command(UserCommand::SetLocale(Locale::De));
        let event = catalog_rx.recv().await.unwrap();
        let updates = state.handle_catalog_event(event);
        assert_eq!(
            updates,
            vec![UiUpdate::Catalog(CatalogStatus::Failed {
                message: "version list is empty".into()
            })]
        );
        assert_eq!(state.locale, Locale::Fr);
        assert_eq!(state.session.catalog().map(|c| c.locale), Some(Locale::Fr));

        let retry = state.handle_command(UserCommand::SetLocale(Locale::De));
        assert_eq!(retry, vec![UiUpdate::Catalog(CatalogStatus::Loading { locale: Locale::De })]);
        let event = catalog_rx.recv().await.unwrap();
        state.handle_catalog_event(event);
        assert_eq!(state.locale, Locale::De);
        assert_eq!(state.session.catalog().map(|c| c.locale), Some(Locale::De));

        let again = state.handle_command(UserCommand::SetLocale(Locale::De));
        assert!(matches!(again.as_slice(), [UiUpdate::Notice(_)]));
    }

    #[tokio::test]
    async fn superseded_catalog_load_is_ignored() {
        let mut h = harness();
        h.state.load_catalog();
        let first = h.catalog_rx.recv().await.unwrap();
        h.state.handle_command(UserCommand::SetLocale(Locale::De));
        assert!(h.state.handle_catalog_event(first).is_empty());

        let second = h.catalog_rx.recv().await.unwrap();
        h.state.handle_catalog_event(second);
        assert_eq!(h.state.session.catalog().map(|c| c.locale), Some(Locale::De));
    }

    #[tokio::test(start_paused = true)]
    async fn full_draft_flow_plays_voice_lines() {
        let mut h = harness();
        h.load().await;
        for name in ["A", "B", "C"] {
            h.add(name);
        }
        let updates = h.state.handle_command(UserCommand::StartDraw);
        assert!(matches!(updates.as_slice(), [UiUpdate::Snapshot(_)]));
        h.reveal_all().await;
        assert_eq!(*h.sink.stings.lock().unwrap(), 3);

        for lane in [Lane::Top, Lane::Mid, Lane::Support] {
            let uid = h.state.session.slots().iter().find(|s| !s.is_assigned()).map(|s| s.uid).unwrap();
            assert!(!rejected(&h.state.handle_command(UserCommand::SelectSlot(uid))));
            assert!(!rejected(&h.state.handle_command(UserCommand::AssignLane(lane))));
        }
        assert_eq!(h.state.session.phase(), Phase::Complete);

        let played = h.sink.played.lock().unwrap();
        assert_eq!(played.len(), 3);
        assert!(played.iter().all(|c| c.kind == CueKind::Choice && c.locale == Locale::Fr));
        assert!((played[0].volume - 0.25).abs() < f32::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn roulette_settles_on_current_player() {
        let mut h = harness();
        h.load().await;
        h.add("A");
        h.add("B");
        h.state.handle_command(UserCommand::StartDraw);
        h.reveal_all().await;

        let current = h.state.session.current_player().unwrap().name.clone();
        loop {
            let event = h.reveal_rx.recv().await.unwrap();
            if let [UiUpdate::Roulette { name, settled: true }] = h.state.handle_reveal_event(event).as_slice() {
                assert_eq!(name, &current);
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reset_discards_queued_reveals() {
        let mut h = harness();
        h.load().await;
        h.add("A");
        h.add("B");
        h.state.handle_command(UserCommand::StartDraw);
        let stale = RevealEvent::SlotRevealed {
            generation: h.state.session.generation(),
        };
        h.state.handle_command(UserCommand::Reset);
        assert!(h.state.handle_reveal_event(stale).is_empty());
        assert_eq!(h.state.session.phase(), Phase::Registering);
        assert_eq!(h.state.session.revealed_count(), 0);
    }

    #[tokio::test]
    async fn out_of_turn_commands_are_rejected_without_change() {
        let mut h = harness();
        h.load().await;
        h.add("A");
        let before = h.state.build_snapshot();
        assert!(rejected(&h.state.handle_command(UserCommand::AssignLane(Lane::Top))));
        assert!(rejected(&h.state.handle_command(UserCommand::SelectSlot(SlotUid { draw: 1, index: 0 }))));
        assert!(rejected(&h.state.handle_command(UserCommand::StartDraw)));
        assert!(rejected(&h.state.handle_command(UserCommand::RemovePlayer(4))));
        assert_eq!(h.state.build_snapshot(), before);
    }

    #[tokio::test]
    async fn volume_is_validated() {
        let mut h = harness();
        assert!(rejected(&h.state.handle_command(UserCommand::SetVolume(1.5))));
        assert!((h.state.master_volume - 0.5).abs() < f32::EPSILON);
        h.state.handle_command(UserCommand::SetVolume(0.2));
        assert!((h.state.master_volume - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn mystery_round_plays_and_reveals() {
        let mut h = harness();
        assert!(rejected(&h.state.handle_command(UserCommand::MysteryStart)));
        h.load().await;

        let updates = h.state.handle_command(UserCommand::MysteryStart);
        let view = match updates.as_slice() {
            [UiUpdate::Mystery(view)] => view.clone(),
            other => panic!("expected mystery view, got: {other:?}"),
        };
        assert!(view.active && view.champion.is_none());
        let voiced = h.sink.played.lock().unwrap()[0].champion_id.clone();

        h.state.handle_command(UserCommand::MysteryReplay);
        assert_eq!(h.sink.played.lock().unwrap().len(), 2);

        let updates = h.state.handle_command(UserCommand::MysteryGuess(voiced.clone()));
        assert!(matches!(updates.last(), Some(UiUpdate::Mystery(v)) if v.champion.as_ref().map(|c| &c.id) == Some(&voiced)));

        let updates = h.state.handle_command(UserCommand::MysteryClose);
        assert!(matches!(updates.as_slice(), [UiUpdate::Mystery(v)] if !v.active));
        assert!(h.state.mystery.is_none());
    }

    #[tokio::test]
    async fn event_loop_handles_quit_command() {
        let h = harness();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (_catalog_tx, catalog_rx) = mpsc::channel(16);
        let (_reveal_tx, reveal_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, catalog_rx, reveal_rx, ui_tx, h.state));
        cmd_tx.send(UserCommand::Quit).await.unwrap();

        let result = handle.await.unwrap();
        assert!(result.is_ok());
        assert!(matches!(
            ui_rx.recv().await,
            Some(UiUpdate::Catalog(CatalogStatus::Loading { .. }))
        ));
    }
}
