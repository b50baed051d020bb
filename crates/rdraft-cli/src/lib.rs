// Line-oriented front end for the draft session.
//
// Reads commands from an input stream, forwards them to the app orchestrator
// and prints every UiUpdate it receives back.

pub mod input;
pub mod render;
pub mod view;

use rdraft_app::assets::AssetResolver;
use rdraft_core::protocol::{UiUpdate, UserCommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::input::Input;
use crate::view::ViewState;

/// Run against the process stdin and stdout until the user quits or the
/// app closes the update channel.
pub async fn run(
    ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    assets: AssetResolver,
) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_with(stdin, stdout, ui_rx, cmd_tx, assets).await
}

pub async fn run_with<R, W>(
    reader: R,
    mut writer: W,
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    assets: AssetResolver,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut view = ViewState::new(assets);
    let mut lines = reader.lines();
    let mut input_open = true;

    write_lines(&mut writer, &["Type 'help' for commands.".to_string()]).await?;

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(update) => {
                        let out = view.apply_ui_update(update);
                        write_lines(&mut writer, &out).await?;
                    }
                    None => {
                        info!("UI channel closed, leaving input loop");
                        break;
                    }
                }
            }

            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        let (quit, out) = handle_input(&line, &view, &cmd_tx).await;
                        write_lines(&mut writer, &out).await?;
                        if quit {
                            break;
                        }
                    }
                    None => {
                        // End of input behaves like quit.
                        input_open = false;
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                    }
                }
            }
        }
    }

    writer.flush().await?;
    Ok(())
}

/// Returns whether the loop should stop, plus any lines answered locally.
async fn handle_input(
    line: &str,
    view: &ViewState,
    cmd_tx: &mpsc::Sender<UserCommand>,
) -> (bool, Vec<String>) {
    match input::parse_line(line, view) {
        Input::Empty => (false, vec![]),
        Input::Help => (false, vec![render::HELP.to_string()]),
        Input::Status => (false, view.status_lines()),
        Input::Info(index) => {
            let text = match &view.snapshot {
                Some(snap) => match snap.slots.get(index) {
                    Some(slot) => render::render_slot_detail(slot, snap, &view.assets),
                    None => format!("! there is no slot {}", index + 1),
                },
                None => "* nothing drawn yet".to_string(),
            };
            (false, vec![text])
        }
        Input::Invalid(message) => (false, vec![format!("! {message}")]),
        Input::Command(cmd) => {
            debug!("Sending command: {:?}", cmd);
            let quit = cmd == UserCommand::Quit;
            if cmd_tx.send(cmd).await.is_err() {
                return (true, vec!["! the session has stopped".to_string()]);
            }
            (quit, vec![])
        }
    }
}

async fn write_lines<W: AsyncWrite + Unpin>(writer: &mut W, lines: &[String]) -> anyhow::Result<()> {
    for line in lines {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}
