// Plain-text rendering of snapshots and status lines.

use std::fmt::Write;

use rdraft_app::assets::AssetResolver;
use rdraft_core::draft::{Phase, SlotView};
use rdraft_core::protocol::{CatalogStatus, CueKind, MysteryView, SessionSnapshot};

pub const HELP: &str = "\
Commands:
  add <name> [icon]     register a player (random icon if omitted)
  remove <n>            remove player n
  draw                  draw one champion per player
  pick <n>              current player takes slot n
  cancel                drop the current pick
  lane <top|jgl|mid|adc|supp>
                        confirm the lane for the picked slot
  reroll <n>            swap slot n for an unused champion
  restart               redraw for the same players
  reset                 clear everything
  info <n>              show art and voice links for slot n
  lang <code>           fr en es de it pt ru tr ja ko ar
  volume <0-100>        master volume
  mystery [reveal|replay|close|guess <name>]
  status                print the board
  quit";

pub fn render_snapshot(snap: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", headline(snap));

    if snap.phase == Phase::Registering {
        if snap.roster.is_empty() {
            let _ = writeln!(out, "  (no players yet)");
        }
        for (i, player) in snap.roster.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} [icon {}]", i + 1, player.name, player.avatar);
        }
        return out.trim_end().to_string();
    }

    for view in &snap.slots {
        let _ = writeln!(out, "  {}", render_slot(view));
    }

    if !snap.turn_order.is_empty() {
        let order: Vec<String> = snap
            .turn_order
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if i < snap.turn_index {
                    format!("({})", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "  order: {}", order.join(" > "));
    }
    if matches!(snap.phase, Phase::AwaitingPick | Phase::AssigningLane { .. }) {
        let lanes: Vec<&str> = snap.available_lanes.iter().map(|l| l.code()).collect();
        let _ = writeln!(out, "  free lanes: {}", lanes.join(" "));
    }
    if snap.phase == Phase::Complete {
        let _ = writeln!(out, "  lineup:");
        for view in snap.lineup.iter().filter_map(|uid| snap.slot(*uid)) {
            let _ = writeln!(
                out,
                "    {:<4} {:<16} {}",
                view.lane.map(|l| l.code()).unwrap_or(""),
                view.player.as_ref().map(|p| p.name.as_str()).unwrap_or(""),
                view.champion.as_ref().map(|c| c.name.as_str()).unwrap_or("")
            );
        }
    }
    out.trim_end().to_string()
}

fn headline(snap: &SessionSnapshot) -> String {
    match (&snap.phase, &snap.current_player) {
        (Phase::Registering, _) => format!("Players {}/5", snap.roster.len()),
        (Phase::Drawing, _) => {
            let shown = snap.slots.iter().filter(|v| v.revealed).count();
            format!("Revealing {}/{}", shown, snap.slots.len())
        }
        (Phase::AwaitingPick, Some(p)) => format!("{} picks a champion", p.name),
        (Phase::AssigningLane { .. }, Some(p)) => format!("{} chooses a lane", p.name),
        (Phase::Complete, _) => "Draft complete".to_string(),
        (phase, None) => phase.to_string(),
    }
}

fn render_slot(view: &SlotView) -> String {
    let marker = if view.selected { '>' } else { ' ' };
    let champion = match &view.champion {
        Some(c) if view.revealed => c.name.clone(),
        _ => "???".to_string(),
    };
    let mut line = format!("{marker}{}. {champion}", view.index + 1);
    if let (Some(player), Some(lane)) = (&view.player, view.lane) {
        let _ = write!(line, " - {} ({})", player.name, lane.code());
    }
    if view.rerolls > 0 {
        let _ = write!(line, " [rerolled x{}]", view.rerolls);
    }
    line
}

/// Art, lane icon and voice-line links for a revealed slot.
pub fn render_slot_detail(
    view: &SlotView,
    snap: &SessionSnapshot,
    assets: &AssetResolver,
) -> String {
    let Some(champion) = view.champion.as_ref().filter(|_| view.revealed) else {
        return format!("slot {} is not revealed yet", view.index + 1);
    };
    let mut out = format!("{} ({})", champion.name, champion.id);
    if let Some(version) = &snap.catalog_version {
        let _ = write!(out, "\n  tile:    {}", assets.champion_tile(version, champion));
    }
    let _ = write!(out, "\n  splash:  {}", assets.loading_splash(champion));
    if let Some(lane) = view.lane {
        let _ = write!(out, "\n  lane:    {}", assets.lane_icon(lane));
    }
    if let (Some(player), Some(version)) = (&view.player, &snap.catalog_version) {
        let _ = write!(out, "\n  player:  {}", assets.profile_icon(version, player.avatar));
    }
    if let Some(locale) = snap.locale {
        let cue = rdraft_core::protocol::VoiceCue::new(champion, locale, CueKind::Choice, 0.0);
        let _ = write!(out, "\n  voice:   {}", assets.voice_line(&cue));
    }
    out
}

pub fn render_catalog_status(status: &CatalogStatus) -> String {
    match status {
        CatalogStatus::Loading { locale } => format!("* loading champions ({locale})..."),
        CatalogStatus::Ready {
            version,
            locale,
            champions,
        } => format!("* {champions} champions ready (patch {version}, {locale})"),
        CatalogStatus::Failed { message } => format!("! champion list unavailable: {message}"),
    }
}

pub fn render_mystery(view: &MysteryView) -> String {
    let kind = match view.kind {
        CueKind::Choice => "pick",
        CueKind::Ban => "ban",
    };
    match (&view.champion, view.active) {
        (None, _) => format!("? Mystery {kind} line playing. Who is it?"),
        (Some(c), true) => format!("? It was {} ({kind} line)", c.name),
        (Some(c), false) => format!("? Mystery closed. It was {}", c.name),
    }
}
