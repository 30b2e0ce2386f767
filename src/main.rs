use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use connect_four_env::ai::{Agent, GreedyAgent, HumanAgent, RandomAgent};
use connect_four_env::config::{AppConfig, GameConfig};
use connect_four_env::game::Symbol;
use connect_four_env::reward::RewardWeights;
use connect_four_env::session::{Match, TrainEnv};
use connect_four_env::training::trainer::Trainer;

/// Connect Four: play, evaluate players, or run the training loop.
#[derive(Parser)]
#[command(name = "connect4", about = "Connect Four game and training environment")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Skip board rendering and lower the default log level to warn
    #[arg(long)]
    headless: bool,

    /// Fixed RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a single game
    Play {
        #[arg(long, value_enum, default_value = "human")]
        player1: PlayerKind,

        #[arg(long, value_enum, default_value = "random")]
        player2: PlayerKind,

        /// Which player moves first
        #[arg(long, value_enum)]
        start: Option<Start>,
    },

    /// Play many games and report win/loss/draw ratios for player 1
    Evaluate {
        #[arg(long, value_enum, default_value = "greedy")]
        player1: PlayerKind,

        #[arg(long, value_enum, default_value = "random")]
        player2: PlayerKind,

        /// Override number of games
        #[arg(long)]
        games: Option<usize>,

        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the training loop against a built-in opponent
    Train {
        #[arg(long, value_enum, default_value = "random")]
        learner: PlayerKind,

        #[arg(long, value_enum, default_value = "random")]
        opponent: PlayerKind,

        /// Override number of training episodes
        #[arg(long)]
        episodes: Option<usize>,
    },

    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Human,
    Random,
    Greedy,
}

#[derive(Clone, Copy, ValueEnum)]
enum Start {
    Player1,
    Player2,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.headless { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if matches!(cli.command, Command::DefaultConfig) {
        let toml = AppConfig::default_toml().context("serializing default config")?;
        print!("{toml}");
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.headless {
        config.game.headless = true;
    }
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }

    match cli.command {
        Command::Play {
            player1,
            player2,
            start,
        } => {
            if let Some(start) = start {
                config.game.starting = match start {
                    Start::Player1 => Symbol::A,
                    Start::Player2 => Symbol::B,
                };
            }
            config.validate().context("validating config")?;
            let mut game = seat_players(&config, player1, player2);
            let result = game.play_game().context("playing game")?;
            println!("{}", game.render());
            match result.winner {
                Some(symbol) => println!("Player {} wins!", config.game.glyphs()[symbol.index()]),
                None => println!("It's a draw."),
            }
        }
        Command::Evaluate {
            player1,
            player2,
            games,
            json,
        } => {
            if player1 == PlayerKind::Human || player2 == PlayerKind::Human {
                bail!("evaluation needs two automatic players");
            }
            if let Some(games) = games {
                config.evaluation.games = games;
            }
            config.game.headless = true;
            config.validate().context("validating config")?;

            let mut game = seat_players(&config, player1, player2);
            let stats = game
                .evaluate_run(config.evaluation.games, Symbol::A)
                .context("running evaluation")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats).context("serializing stats")?);
            } else {
                println!("{stats}");
            }
        }
        Command::Train {
            learner,
            opponent,
            episodes,
        } => {
            if learner == PlayerKind::Human || opponent == PlayerKind::Human {
                bail!("training needs automatic players");
            }
            if let Some(episodes) = episodes {
                config.training.num_episodes = episodes;
            }
            config.validate().context("validating config")?;

            let mut env = TrainEnv::new(
                build_player(opponent, &config.game, Symbol::B, &config.shaping, config.game.seed),
                config.shaping.clone(),
                config.rewards.clone(),
                config.game.seed,
            );
            let mut learner = build_player(
                learner,
                &config.game,
                Symbol::A,
                &config.shaping,
                config.game.seed.map(|s| s.wrapping_add(1)),
            );
            let trainer = Trainer::new(config.training.clone());
            trainer
                .train(&mut env, learner.as_mut())
                .context("training")?;
        }
        Command::DefaultConfig => {}
    }

    Ok(())
}

fn seat_players(config: &AppConfig, player1: PlayerKind, player2: PlayerKind) -> Match {
    let seed = config.game.seed;
    Match::new(
        config.game.clone(),
        config.rewards.clone(),
        build_player(player1, &config.game, Symbol::A, &config.shaping, seed),
        build_player(
            player2,
            &config.game,
            Symbol::B,
            &config.shaping,
            seed.map(|s| s.wrapping_add(1)),
        ),
    )
}

fn build_player(
    kind: PlayerKind,
    game: &GameConfig,
    symbol: Symbol,
    weights: &RewardWeights,
    seed: Option<u64>,
) -> Box<dyn Agent> {
    match kind {
        PlayerKind::Human => {
            let name = format!("Player {}", symbol.index() + 1);
            Box::new(HumanAgent::stdio(name, game.glyphs_for(symbol)))
        }
        PlayerKind::Random => match seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed)),
            None => Box::new(RandomAgent::new()),
        },
        PlayerKind::Greedy => Box::new(GreedyAgent::new(weights.clone())),
    }
}
