use anyhow::Context;
use clap::Parser;
use serina_board::core::{
    init_tracing, load_settings_from, save_settings_to, settings_path,
};
use serina_board::game::resources::{promotion_letters, PromotionPrompt};
use serina_board::game::types::{Side, Square};
use serina_board::game::{ClickOutcome, GameError};
use serina_board::networking::{
    AnalysisRequest, AnalysisResult, GameSession, HttpPositionClient, SessionEvent,
};
use serina_board::rendering::{render_board, render_history, BoardStyle};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Terminal board client for a remote chess position service
#[derive(Parser, Debug)]
#[command(name = "serina-board", version, about)]
struct Cli {
    /// Position service base URL (overrides settings and SERINA_SERVER_URL)
    #[arg(long)]
    server: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Settings file to use instead of the platform config dir
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Tracing filter when RUST_LOG is unset
    #[arg(long)]
    log: Option<String>,

    /// Draw the board from Black's side
    #[arg(long)]
    flipped: bool,

    /// Draw pieces as chess glyphs
    #[arg(long)]
    unicode: bool,

    /// Do not mark reachable squares
    #[arg(long)]
    no_hints: bool,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

/// Asks on stdin for the promotion piece
struct StdinPrompt;

impl PromotionPrompt for StdinPrompt {
    fn choose(&mut self, side: Side, origin: Square, destination: Square) -> Option<String> {
        print!(
            "Promote {}{} to ({}), empty to cancel: ",
            origin,
            destination,
            promotion_letters(side)
        );
        io::stdout().flush().ok()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).ok()?;
        let answer = answer.trim();
        if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        }
    }
}

const HELP: &str = "\
Commands:
  <square>           click a square (e.g. e2)
  move <from> <to>   two clicks in one line
  start              load the starting position
  fen <FEN>          load a position
  flip               mirror the board
  perft <depth>      count leaf nodes
  search <depth>     ask the engine for a move
  history            show the move list
  board              redraw the board
  help               this text
  quit               exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let path = cli.settings.clone().unwrap_or_else(settings_path);
    let loaded = load_settings_from(&path);
    let mut settings = loaded.as_ref().cloned().unwrap_or_default();

    init_tracing(cli.log.as_deref().unwrap_or(&settings.log_filter))
        .context("failed to initialize logging")?;
    if let Err(e) = &loaded {
        warn!("[SETTINGS] Failed to load settings at {:?}: {}. Using defaults.", path, e);
    }

    settings.apply_env();
    settings.override_server_url(cli.server.clone());
    if let Some(timeout) = cli.timeout {
        settings.request_timeout_secs = timeout;
    }
    settings.flipped |= cli.flipped;
    settings.unicode_pieces |= cli.unicode;
    settings.show_hints &= !cli.no_hints;

    if cli.save_settings {
        save_settings_to(&settings, &path).context("failed to save settings")?;
    }

    let base = settings.server_url()?;
    let client = HttpPositionClient::new(base.as_str(), settings.request_timeout())
        .context("failed to build HTTP client")?;
    let mut session = GameSession::new(Arc::new(client));
    let style = BoardStyle {
        flipped: settings.flipped,
        unicode: settings.unicode_pieces,
        show_hints: settings.show_hints,
    };

    info!("Connecting to {}", base);
    session.refresh();
    settle(&mut session).await;
    show_board(&session, style);
    println!("{}", HELP);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["help"] => println!("{}", HELP),
            ["board"] => show_board(&session, style),
            ["history"] => print!("{}", render_history(session.controller().history())),
            ["start"] => {
                if session.refresh() {
                    settle(&mut session).await;
                    show_board(&session, style);
                }
            }
            ["flip"] => {
                if session.flip() {
                    settle(&mut session).await;
                    show_board(&session, style);
                }
            }
            ["fen", fen @ ..] if !fen.is_empty() => {
                if session.set_position(fen.join(" ")) {
                    settle(&mut session).await;
                    show_board(&session, style);
                }
            }
            ["perft", depth] => match depth.parse::<u32>() {
                Ok(depth) => analyse(&session, AnalysisRequest::Perft { depth }).await,
                Err(_) => println!("Depth must be a number"),
            },
            ["search", depth] => match depth.parse::<u32>() {
                Ok(depth) => analyse(&session, AnalysisRequest::Search { depth }).await,
                Err(_) => println!("Depth must be a number"),
            },
            ["move", from, to] => {
                for square in [from, to] {
                    if !click(&mut session, square, style).await {
                        break;
                    }
                }
            }
            [square] => {
                click(&mut session, square, style).await;
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }

    Ok(())
}

/// Click one square and report; false when the line should stop
async fn click(
    session: &mut GameSession<HttpPositionClient>,
    input: &str,
    style: BoardStyle,
) -> bool {
    let square: Square = match input.parse() {
        Ok(square) => square,
        Err(e) => {
            println!("{}", e);
            return false;
        }
    };

    match session.click(square, &mut StdinPrompt) {
        Ok(ClickOutcome::Selected { piece, origin, .. }) => {
            println!("Selected {} on {}", piece, origin);
            show_board(session, style);
            true
        }
        Ok(ClickOutcome::Deselected) => {
            show_board(session, style);
            true
        }
        Ok(ClickOutcome::MoveResolved { token, .. }) => {
            println!("Playing {}", token);
            settle(session).await;
            show_board(session, style);
            true
        }
        Ok(ClickOutcome::Ignored) => true,
        Ok(ClickOutcome::Busy) => {
            println!("Waiting for the service");
            false
        }
        Ok(ClickOutcome::Rejected(e)) => {
            println!("{}", e);
            show_board(session, style);
            false
        }
        Ok(ClickOutcome::Retained(e)) => {
            println!("{}; piece still selected", e);
            false
        }
        Err(GameError::NotInitialized) => {
            println!("Board not loaded yet, loading...");
            settle(session).await;
            show_board(session, style);
            false
        }
        Err(e) => {
            println!("{}", e);
            false
        }
    }
}

async fn settle(session: &mut GameSession<HttpPositionClient>) {
    if let Some(SessionEvent::Failed { request, error }) = session.settle().await {
        println!("Could not {}: {}", request, error);
    }
}

async fn analyse(session: &GameSession<HttpPositionClient>, request: AnalysisRequest) {
    match session.analyse(request).await {
        Ok(AnalysisResult::Perft {
            counts,
            total,
            elapsed,
        }) => {
            for (token, nodes) in &counts {
                println!("{:<8}{}", token, nodes);
            }
            println!("Total: {} nodes in {} ms", total, elapsed.as_millis());
        }
        Ok(AnalysisResult::Search { best_move, elapsed }) => {
            println!("Best move: {} ({} ms)", best_move, elapsed.as_millis());
        }
        Err(e) => println!("Analysis failed: {}", e),
    }
}

fn show_board(session: &GameSession<HttpPositionClient>, style: BoardStyle) {
    let controller = session.controller();
    match controller.board().current() {
        Ok(snapshot) => print!("{}", render_board(snapshot, controller.selection(), style)),
        Err(e) => println!("{}", e),
    }
}
