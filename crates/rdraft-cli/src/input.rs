// Line input parsing.
//
// Translates typed lines into UserCommand messages for the app orchestrator,
// or into local actions answered from the ViewState. Slot and player numbers
// are 1-based on screen.

use rdraft_core::catalog::Locale;
use rdraft_core::draft::Lane;
use rdraft_core::protocol::UserCommand;

use crate::view::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(UserCommand),
    Help,
    Status,
    /// Show asset links for the slot at this index.
    Info(usize),
    /// Nothing to do (blank line).
    Empty,
    /// Could not parse; the message explains why.
    Invalid(String),
}

pub fn parse_line(line: &str, view: &ViewState) -> Input {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" => Input::Empty,
        "help" | "?" => Input::Help,
        "status" | "ls" => Input::Status,
        "quit" | "exit" | "q" => Input::Command(UserCommand::Quit),
        "add" => parse_add(rest),
        "remove" | "rm" => match parse_number(rest) {
            Ok(n) => Input::Command(UserCommand::RemovePlayer(n)),
            Err(msg) => Input::Invalid(msg),
        },
        "draw" | "start" => Input::Command(UserCommand::StartDraw),
        "pick" => match parse_number(rest) {
            Ok(index) => slot_uid(view, index)
                .map(|uid| Input::Command(UserCommand::SelectSlot(uid)))
                .unwrap_or_else(|| Input::Invalid(format!("there is no slot {rest}"))),
            Err(msg) => Input::Invalid(msg),
        },
        "cancel" => Input::Command(UserCommand::CancelSelection),
        "lane" => match Lane::from_code(rest) {
            Some(lane) => Input::Command(UserCommand::AssignLane(lane)),
            None => Input::Invalid(format!("unknown lane '{rest}'")),
        },
        "reroll" => match parse_number(rest) {
            Ok(n) => Input::Command(UserCommand::Reroll(n)),
            Err(msg) => Input::Invalid(msg),
        },
        "info" => match parse_number(rest) {
            Ok(n) => Input::Info(n),
            Err(msg) => Input::Invalid(msg),
        },
        "restart" | "redraw" => Input::Command(UserCommand::RestartDraw),
        "reset" => Input::Command(UserCommand::Reset),
        "lang" | "locale" => match Locale::from_code(rest) {
            Some(locale) => Input::Command(UserCommand::SetLocale(locale)),
            None => Input::Invalid(format!("unknown language '{rest}'")),
        },
        "volume" | "vol" => match rest.parse::<u32>() {
            Ok(percent) if percent <= 100 => {
                Input::Command(UserCommand::SetVolume(percent as f32 / 100.0))
            }
            _ => Input::Invalid("volume takes a number from 0 to 100".into()),
        },
        "mystery" => parse_mystery(rest),
        other => Input::Invalid(format!("unknown command '{other}', try 'help'")),
    }
}

fn parse_add(rest: &str) -> Input {
    if rest.is_empty() {
        return Input::Invalid("add needs a player name".into());
    }
    // A trailing number is the profile icon id.
    let (name, avatar) = match rest.rsplit_once(char::is_whitespace) {
        Some((name, icon)) => match icon.parse::<u32>() {
            Ok(id) => (name.trim(), Some(id)),
            Err(_) => (rest, None),
        },
        None => (rest, None),
    };
    Input::Command(UserCommand::AddPlayer {
        name: name.to_string(),
        avatar,
    })
}

fn parse_mystery(rest: &str) -> Input {
    let (sub, arg) = match rest.split_once(char::is_whitespace) {
        Some((sub, arg)) => (sub, arg.trim()),
        None => (rest, ""),
    };
    let cmd = match sub.to_lowercase().as_str() {
        "" | "start" => UserCommand::MysteryStart,
        "reveal" => UserCommand::MysteryReveal,
        "replay" => UserCommand::MysteryReplay,
        "close" => UserCommand::MysteryClose,
        "guess" if !arg.is_empty() => UserCommand::MysteryGuess(arg.to_string()),
        "guess" => return Input::Invalid("guess needs a champion name".into()),
        other => return Input::Invalid(format!("unknown mystery action '{other}'")),
    };
    Input::Command(cmd)
}

/// Parse a 1-based number into a 0-based index.
fn parse_number(text: &str) -> Result<usize, String> {
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a number from 1, got '{text}'")),
    }
}

fn slot_uid(view: &ViewState, index: usize) -> Option<rdraft_core::draft::SlotUid> {
    view.snapshot.as_ref()?.slots.get(index).map(|s| s.uid)
}
