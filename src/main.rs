use std::collections::HashMap;
use std::io::IsTerminal;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::event::KeyCode;
use ratatui::style::Color;
use robo_grid::agent::{DecisionSource, FixedAgent, RandomAgent};
use robo_grid::game::{ChainAction, ChainWalk, ChainWalkConfig};
use robo_grid::input::KeyBindings;
use robo_grid::modes::RoboUi;
use robo_grid::render::CanvasError;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "robo-grid")]
#[command(version, about = "Chain walk played by a robot, a human, or both")]
struct Cli {
    /// Who plays
    #[arg(long, default_value = "robot")]
    mode: PlayMode,

    /// Robot policy used in robot mode
    #[arg(long, default_value = "fixed")]
    agent: AgentKind,

    /// Milliseconds to wait for a key each tick
    #[arg(long, default_value = "200")]
    delay_ms: u64,

    /// Chain width
    #[arg(long, default_value = "23")]
    width: usize,

    /// Starting column of the player
    #[arg(long, default_value = "1")]
    start: usize,

    /// Seed for the random agent
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum PlayMode {
    /// Robot moves whenever no key is pressed; any arrow key takes over
    Robot,
    /// Plain human play; an idle tick stands still
    Human,
}

#[derive(Clone, ValueEnum)]
enum AgentKind {
    /// Always walk right
    Fixed,
    /// Pick left, right or stay uniformly at random
    Random,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut game = ChainWalk::new(ChainWalkConfig::new(cli.width, cli.start))?;
    let bindings = KeyBindings::new()
        .bind(KeyCode::Left, ChainAction::Left)
        .bind(KeyCode::Right, ChainAction::Right);

    let ui = match cli.mode {
        PlayMode::Robot => RoboUi::new(bindings).with_agent(build_agent(&cli)?),
        PlayMode::Human => RoboUi::new(bindings.bind_idle(ChainAction::Stay)),
    };
    let mut ui = ui
        .with_delay(Duration::from_millis(cli.delay_ms))
        .with_colours(
            Some(HashMap::from([('P', Color::Cyan), ('.', Color::DarkGray)])),
            None,
        );

    match ui.play(&mut game).await {
        Err(err) if CanvasError::is_interrupt(&err) => {
            info!("Interrupted");
        }
        result => result?,
    }

    println!("Final score: {}", ui.total_return().unwrap_or(0.0));
    Ok(())
}

fn build_agent(cli: &Cli) -> Result<Box<dyn DecisionSource<ChainAction>>> {
    let agent: Box<dyn DecisionSource<ChainAction>> = match cli.agent {
        AgentKind::Fixed => Box::new(FixedAgent::new(ChainAction::Right)),
        AgentKind::Random => {
            let actions = ChainAction::all().to_vec();
            match cli.seed {
                Some(seed) => Box::new(RandomAgent::seeded(actions, seed)?),
                None => Box::new(RandomAgent::new(actions)?),
            }
        }
    };
    Ok(agent)
}

/// Logs go to stderr. The TUI owns the terminal while it runs, so logging is
/// switched off unless stderr is redirected, e.g.
/// `RUST_LOG=debug robo-grid 2>robo-grid.log`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::io::stderr().is_terminal()))
        .with_writer(std::io::stderr)
        .try_init();
}

fn log_filter(stderr_is_terminal: bool) -> EnvFilter {
    if stderr_is_terminal {
        EnvFilter::new("off")
    } else {
        EnvFilter::from_default_env()
    }
}
