// Local view state for the line-oriented front end.
//
// Holds the latest snapshot so slot numbers typed by the user can be mapped
// back to slot uids, and turns each UiUpdate into lines to print.

use rdraft_app::assets::AssetResolver;
use rdraft_core::protocol::{CatalogStatus, MysteryView, SessionSnapshot, UiUpdate};

use crate::render;

pub struct ViewState {
    pub snapshot: Option<SessionSnapshot>,
    pub catalog: Option<CatalogStatus>,
    /// The running mystery round, cleared when it closes.
    pub mystery: Option<MysteryView>,
    pub assets: AssetResolver,
}

impl ViewState {
    pub fn new(assets: AssetResolver) -> Self {
        ViewState {
            snapshot: None,
            catalog: None,
            mystery: None,
            assets,
        }
    }

    /// Board, catalog state and any running mystery round, for `status`.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(status) = &self.catalog {
            lines.push(render::render_catalog_status(status));
        }
        match &self.snapshot {
            Some(snap) => lines.push(render::render_snapshot(snap)),
            None => lines.push("* waiting for the session".to_string()),
        }
        if let Some(mystery) = &self.mystery {
            lines.push(render::render_mystery(mystery));
        }
        lines
    }

    /// Apply an update and return the lines to print for it.
    pub fn apply_ui_update(&mut self, update: UiUpdate) -> Vec<String> {
        match update {
            UiUpdate::Snapshot(snapshot) => {
                let lines = vec![render::render_snapshot(&snapshot)];
                self.snapshot = Some(*snapshot);
                lines
            }
            UiUpdate::Catalog(status) => {
                let line = render::render_catalog_status(&status);
                self.catalog = Some(status);
                vec![line]
            }
            UiUpdate::Roulette { name, settled } => {
                // Intermediate frames are too fast for a line-oriented view.
                if settled {
                    vec![format!(">>> {name}, your pick! <<<")]
                } else {
                    vec![]
                }
            }
            UiUpdate::Rejected { action, reason } => {
                vec![format!("! cannot {action}: {reason}")]
            }
            UiUpdate::Mystery(view) => {
                let line = render::render_mystery(&view);
                self.mystery = view.active.then_some(view);
                vec![line]
            }
            UiUpdate::Notice(text) => vec![format!("* {text}")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdraft_core::catalog::Locale;
    use rdraft_core::config::Config;
    use rdraft_core::draft::{DraftSession, Phase};
    use rdraft_core::protocol::CueKind;

    fn view() -> ViewState {
        ViewState::new(AssetResolver::from_config(&Config::default().catalog))
    }

    #[test]
    fn snapshot_is_kept_for_input_mapping() {
        let mut view = view();
        let lines = view.apply_ui_update(UiUpdate::Snapshot(Box::new(DraftSession::new().snapshot())));
        assert_eq!(lines.len(), 1);
        assert_eq!(view.snapshot.as_ref().map(|s| s.phase), Some(Phase::Registering));
    }

    #[test]
    fn only_settled_roulette_frames_print() {
        let mut view = view();
        assert!(view
            .apply_ui_update(UiUpdate::Roulette { name: "Ana".into(), settled: false })
            .is_empty());
        let lines = view.apply_ui_update(UiUpdate::Roulette { name: "Ben".into(), settled: true });
        assert_eq!(lines, vec![">>> Ben, your pick! <<<".to_string()]);
    }

    #[test]
    fn status_shows_catalog_board_and_mystery() {
        let mut view = view();
        assert_eq!(view.status_lines(), vec!["* waiting for the session".to_string()]);

        view.apply_ui_update(UiUpdate::Catalog(CatalogStatus::Loading { locale: Locale::Fr }));
        view.apply_ui_update(UiUpdate::Catalog(CatalogStatus::Ready {
            version: "14.24.1".into(),
            locale: Locale::Fr,
            champions: 170,
        }));
        view.apply_ui_update(UiUpdate::Snapshot(Box::new(DraftSession::new().snapshot())));
        view.apply_ui_update(UiUpdate::Mystery(MysteryView {
            kind: CueKind::Choice,
            champion: None,
            active: true,
        }));

        let lines = view.status_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "* 170 champions ready (patch 14.24.1, fr)");
        assert!(lines[1].starts_with("== Players 0/5 =="));
        assert_eq!(lines[2], "? Mystery pick line playing. Who is it?");
    }

    #[test]
    fn closed_mystery_is_forgotten() {
        let mut view = view();
        view.apply_ui_update(UiUpdate::Mystery(MysteryView {
            kind: CueKind::Ban,
            champion: None,
            active: true,
        }));
        assert!(view.mystery.is_some());
        view.apply_ui_update(UiUpdate::Mystery(MysteryView {
            kind: CueKind::Ban,
            champion: None,
            active: false,
        }));
        assert!(view.mystery.is_none());
    }

    #[test]
    fn rejections_are_prefixed() {
        let mut view = view();
        let lines = view.apply_ui_update(UiUpdate::Rejected {
            action: "reroll".into(),
            reason: "no unused champion is left to reroll into".into(),
        });
        assert_eq!(lines, vec!["! cannot reroll: no unused champion is left to reroll into".to_string()]);
    }
}
