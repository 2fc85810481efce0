//! Terminal chess
//!
//! Play against the computer or hotseat, review earlier positions, take
//! moves back, ask for hints and save games to resume later.

mod board;
mod commands;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chess_core::{move_to_uci, parse_san, Color};
use clap::Parser;
use opponent::Difficulty;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use board::{BoardView, Overlay};
use commands::{parse_command, Command, HELP};
use timeline::{
    GameConfig, GameDriver, GameMode, PlayerColor, PlayerStats, SaveList, SelectOutcome,
    Timeline, TimelineEvent,
};

#[derive(Parser, Debug)]
#[command(name = "chess_play", version, about = "Play chess in the terminal")]
struct Args {
    /// Game config file (TOML); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ai, local or tutorial
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<GameMode>,

    /// easy, medium, hard or master
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// white, black or random
    #[arg(long, value_parser = parse_color)]
    color: Option<PlayerColor>,

    /// Show move hints
    #[arg(long)]
    hints: bool,

    /// Seed for reproducible computer moves
    #[arg(long)]
    seed: Option<u64>,

    /// Resume the Nth saved game (1 = newest)
    #[arg(long)]
    resume: Option<usize>,

    /// Pause before the computer moves, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    #[arg(long, default_value = "saves.json")]
    saves: PathBuf,

    #[arg(long, default_value = "stats.json")]
    stats: PathBuf,
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "ai" | "computer" => Ok(GameMode::Ai),
        "local" | "hotseat" => Ok(GameMode::Local),
        "tutorial" => Ok(GameMode::Tutorial),
        _ => Err(format!("unknown mode '{s}'")),
    }
}

fn parse_color(s: &str) -> Result<PlayerColor, String> {
    match s.to_ascii_lowercase().as_str() {
        "white" | "w" => Ok(PlayerColor::White),
        "black" | "b" => Ok(PlayerColor::Black),
        "random" => Ok(PlayerColor::Random),
        _ => Err(format!("unknown color '{s}'")),
    }
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = Some(difficulty);
    }
    if let Some(color) = args.color {
        config.player_color = color;
    }
    if args.hints {
        config.hints = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(n) = args.resume {
        let saves = SaveList::load_or_default(&args.saves)?;
        let Some(saved) = n.checked_sub(1).and_then(|i| saves.games.get(i)) else {
            bail!("no saved game #{n} in {}", args.saves.display());
        };
        config = GameConfig::resume(saved, &config);
    }
    Ok(config)
}

struct Session {
    driver: GameDriver,
    config: GameConfig,
    args: Args,
}

impl Session {
    async fn show_board(&self) {
        let (text, status) = self
            .driver
            .read(|t| {
                let overlay = Overlay {
                    last_move: t.last_move().map(|m| (m.from, m.to)),
                    hint: t.hint(),
                    selected: t.selected_square(),
                    targets: t.selected_targets(),
                };
                let position = t.displayed_position();
                let flipped = t.mode() == GameMode::Ai && t.human_color() == Color::Black;
                let board = BoardView::new(&position, &overlay, flipped).render();
                let where_ = match t.cursor() {
                    _ if t.is_live() => "live".to_string(),
                    Some(i) => format!("reviewing ply {} of {}", i + 1, t.len()),
                    None => format!("reviewing start of {}", t.len()),
                };
                let status = format!(
                    "move {} | {} to move | {} | {} | {}",
                    t.move_number(),
                    position.side_to_move,
                    where_,
                    t.status(),
                    t.clock().formatted()
                );
                (board, status)
            })
            .await;
        println!("\n{text}{status}");
    }

    /// Returns false when the user quits.
    async fn handle_line(&mut self, line: &str) -> Result<bool> {
        let cmd = match parse_command(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{e} (type help)");
                return Ok(true);
            }
        };
        match cmd {
            Command::Quit => return Ok(false),
            Command::Help => println!("{HELP}"),
            Command::Board => self.show_board().await,
            Command::Fen => println!("{}", self.driver.read(Timeline::displayed_fen).await),
            Command::History => {
                let sans = self.driver.read(Timeline::san_history).await;
                for (i, pair) in sans.chunks(2).enumerate() {
                    println!("{:>3}. {}", i + 1, pair.join(" "));
                }
            }
            Command::Move(text) => {
                let result = self
                    .driver
                    .update(|t| {
                        let mv = parse_san(&t.displayed_position(), &text)
                            .map_err(|e| e.to_string())?;
                        t.make_move(mv).map_err(|e| e.to_string())
                    })
                    .await;
                if let Err(e) = result {
                    println!("{e}");
                }
            }
            Command::Select(sq) => match self.driver.select_square(sq).await {
                SelectOutcome::Ignored => println!("not accepting input right now"),
                SelectOutcome::Selected { .. } | SelectOutcome::Cleared => {
                    self.show_board().await
                }
                SelectOutcome::Moved(_) | SelectOutcome::PromotionPending(_) => {}
            },
            Command::Promote(kind) => {
                if let Err(e) = self.driver.resolve_promotion(kind).await {
                    println!("{e}");
                }
            }
            Command::CancelPromotion => {
                if !self.driver.cancel_promotion().await {
                    println!("no promotion pending");
                }
            }
            Command::Undo => {
                if !self.driver.undo().await {
                    println!("nothing to undo");
                }
            }
            Command::View(ply) => {
                if self.driver.set_cursor(ply.map(|p| p - 1)).await {
                    self.show_board().await;
                } else {
                    println!("no such ply");
                }
            }
            Command::Back => {
                let target = self
                    .driver
                    .read(|t| t.cursor().map(|c| c.checked_sub(1)))
                    .await;
                match target {
                    Some(prev) => {
                        self.driver.set_cursor(prev).await;
                        self.show_board().await;
                    }
                    None => println!("already at the start"),
                }
            }
            Command::Forward => {
                let next = self
                    .driver
                    .read(|t| {
                        let next = t.cursor().map_or(0, |c| c + 1);
                        (next < t.len()).then_some(next)
                    })
                    .await;
                match next {
                    Some(next) => {
                        self.driver.set_cursor(Some(next)).await;
                        self.show_board().await;
                    }
                    None => println!("already at the latest move"),
                }
            }
            Command::Live => {
                self.driver.go_live().await;
                self.show_board().await;
            }
            Command::Hints(on) => self.driver.set_hints(on).await,
            Command::Save => {
                let record = self.driver.read(Timeline::save_record).await;
                let mut saves = SaveList::load_or_default(&self.args.saves)?;
                saves.add(record);
                saves
                    .save(&self.args.saves)
                    .with_context(|| format!("writing {}", self.args.saves.display()))?;
                println!("saved to {}", self.args.saves.display());
            }
            Command::Saves => {
                let saves = SaveList::load_or_default(&self.args.saves)?;
                if saves.is_empty() {
                    println!("no saved games");
                }
                for (i, g) in saves.games.iter().enumerate() {
                    println!(
                        "{:>2}. {} | {} | {} | {} plies",
                        i + 1,
                        g.date.format("%Y-%m-%d %H:%M"),
                        g.duration,
                        g.mode,
                        g.history.len()
                    );
                }
            }
            Command::Stats => {
                let stats = PlayerStats::load_or_default(&self.args.stats)?;
                println!(
                    "rating {} | played {} | won {} | lost {} | drawn {}",
                    stats.rating, stats.played, stats.won, stats.lost, stats.drawn
                );
                for (opening, n) in stats.top_openings().into_iter().take(5) {
                    println!("  {n:>3}  {opening}");
                }
            }
            Command::NewGame => {
                self.driver
                    .replace(Timeline::new(self.config.new_game()))
                    .await;
            }
        }
        Ok(true)
    }

    async fn handle_event(&self, event: TimelineEvent) -> Result<()> {
        match event {
            TimelineEvent::PositionChanged { .. } => {
                let last = self
                    .driver
                    .read(|t| t.history().last().map(|r| (r.color, r.san.clone())))
                    .await;
                if let Some((color, san)) = last {
                    println!("{color} played {san}");
                }
                self.show_board().await;
            }
            TimelineEvent::GameOver { status, .. } => {
                println!("game over: {status}");
                self.record_result().await?;
            }
            TimelineEvent::HintAvailable { from, to } => {
                println!("hint: {}", move_to_uci(chess_core::Move::new(from, to)));
            }
            TimelineEvent::HintCleared => {}
            TimelineEvent::PromotionPending { .. } => {
                println!("promote to? (promote q|r|b|n, or cancel)");
            }
            TimelineEvent::PromotionResolved { piece: None } => println!("promotion cancelled"),
            TimelineEvent::PromotionResolved { .. } => {}
        }
        Ok(())
    }

    async fn record_result(&self) -> Result<()> {
        let mut stats = PlayerStats::load_or_default(&self.args.stats)?;
        let counted = self.driver.read(|t| t.record_result(&mut stats)).await;
        if counted {
            stats
                .save(&self.args.stats)
                .with_context(|| format!("writing {}", self.args.stats.display()))?;
            println!("rating now {}", stats.rating);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(mode = %config.mode_label(), resume = config.is_resume(), "starting");

    let timeline = Timeline::new(config.clone());
    let (driver, mut events) =
        GameDriver::spawn(timeline, Duration::from_millis(args.delay_ms));
    let mut session = Session {
        driver,
        config,
        args,
    };

    // stdin is read on its own thread so the computer can move meanwhile
    let (line_tx, mut lines) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("type help for commands");
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                if let Err(e) = session.handle_event(event).await {
                    warn!(error = %e, "event handling failed");
                }
            }
            line = lines.recv() => {
                let Some(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                if !session.handle_line(&line).await? {
                    break;
                }
            }
        }
    }

    session.driver.shutdown().await;
    Ok(())
}
