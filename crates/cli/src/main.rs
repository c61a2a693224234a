use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use log::info;
use parlor_batch::{
    run_bathtub, run_chutes, write_json, BatchConfig, BATHTUB_TRIALS, CHUTES_TRIALS, DEFAULT_SEED,
};
use parlor_core::{
    BathtubAction, BathtubEngine, BathtubEvent, Card, ChutesEngine, RngState, Snapshot,
    TrialEngine,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "parlor", version)]
#[command(about = "Monte Carlo trials of Bathtub Solitaire and Chutes & Ladders")]
struct Args {
    #[command(subcommand)]
    game: Game,

    /// Seed for the random stream shared by all trials of a batch
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Play a single trial and print every step instead of running a batch
    #[arg(long, global = true)]
    trace: bool,

    /// Also write the batch summary as JSON to this path
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Game {
    /// Bathtub Solitaire win rate
    Bathtub {
        #[arg(long, default_value_t = BATHTUB_TRIALS)]
        trials: u64,
    },
    /// Chutes & Ladders roll counts on the classic board
    Chutes {
        #[arg(long, default_value_t = CHUTES_TRIALS)]
        trials: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.game {
        Game::Bathtub { trials } => {
            if args.trace {
                return trace_bathtub(args.seed);
            }
            let config = BatchConfig::bathtub().with_trials(trials).with_seed(args.seed);
            let summary = run_bathtub(&config).context("bathtub batch")?;
            println!("{}", summary.to_text_report());
            if let Some(path) = args.json.as_deref() {
                write_json(path, &summary)
                    .with_context(|| format!("write {}", path.display()))?;
                info!("summary written to {}", path.display());
            }
        }
        Game::Chutes { trials } => {
            let engine = ChutesEngine::default();
            if args.trace {
                return trace_chutes(&engine, args.seed);
            }
            let config = BatchConfig::chutes().with_trials(trials).with_seed(args.seed);
            let summary = run_chutes(&engine, &config).context("chutes batch")?;
            println!("{}", summary.to_text_report());
            if let Some(path) = args.json.as_deref() {
                write_json(path, &summary)
                    .with_context(|| format!("write {}", path.display()))?;
                info!("summary written to {}", path.display());
            }
        }
    }
    Ok(())
}

fn trace_bathtub(seed: u64) -> Result<()> {
    let mut events = Vec::new();
    let result = BathtubEngine::new()
        .run_trial_traced(&mut RngState::from_seed(seed), &mut events)
        .context("bathtub trial")?;
    for event in &events {
        println!("{}", render_event(event));
    }
    println!("Cards left: {}", result.cards_left);
    Ok(())
}

fn trace_chutes(engine: &ChutesEngine, seed: u64) -> Result<()> {
    let result = engine
        .run_trial(&mut RngState::from_seed(seed))
        .context("chutes trial")?;
    println!("Rolls: {:?}", result.roll_history);
    println!("Positions: {:?}", result.positions);
    println!(
        "{} rolls, {} chutes, {} ladders",
        result.rolls, result.chutes, result.ladders
    );
    Ok(())
}

fn render_card(card: &Card) -> ColoredString {
    let text = card.to_string();
    if card.suit.is_red() {
        text.red()
    } else {
        text.blue()
    }
}

fn render_state(state: &Snapshot) -> String {
    let cards = state
        .hand
        .iter()
        .map(|card| render_card(card).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("({:2}.{:2}): [{}]", state.hand.len(), state.deck_len, cards)
}

fn render_event(event: &BathtubEvent) -> String {
    let label = match &event.action {
        BathtubAction::Drew(card) => format!("[Draw {card}]").on_magenta(),
        BathtubAction::DroppedFour(_) => "[Drop 4]".on_green(),
        BathtubAction::DroppedMiddle(_) => "[Drop mid 2]".on_cyan(),
        BathtubAction::Stalled => "[Stall]".on_yellow(),
        BathtubAction::Finished => "[END]".on_red(),
    };
    format!("{}: {}", render_state(&event.state), label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::{Rank, Suit};

    #[test]
    fn parses_game_and_global_flags() {
        let args = Args::try_parse_from(["parlor", "chutes", "--trials", "10", "--seed", "4"])
            .expect("parse");
        assert_eq!(args.seed, 4);
        assert!(!args.trace);
        assert!(matches!(args.game, Game::Chutes { trials: 10 }));
    }

    #[test]
    fn game_defaults_follow_batch_sizes() {
        let args = Args::try_parse_from(["parlor", "bathtub", "--trace"]).expect("parse");
        assert!(args.trace);
        assert_eq!(args.seed, DEFAULT_SEED);
        assert!(matches!(args.game, Game::Bathtub { trials } if trials == BATHTUB_TRIALS));
    }

    #[test]
    fn state_shows_hand_and_deck_sizes() {
        colored::control::set_override(false);
        let state = Snapshot {
            hand: vec![
                Card::new(Suit::Hearts, Rank::Two),
                Card::new(Suit::Spades, Rank::Jack),
            ],
            deck_len: 7,
            discarded: 43,
        };
        assert_eq!(render_state(&state), "( 2. 7): [♥2, ♠J]");
    }
}
