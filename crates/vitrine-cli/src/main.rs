//! vitrine CLI: interactive culture quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use vitrine_core::preferences::Language;

mod commands;
mod config;
mod messages;

use commands::duel::DuelArgs;
use commands::lang::LangAction;
use commands::trivia::TriviaArgs;

#[derive(Parser)]
#[command(
    name = "vitrine",
    version,
    about = "Personality quizzes, duels and trivia about French culture"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the philosopher whose traits match your answers
    Profile {
        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Rank items by picking favourites from pairs
    Duel {
        /// Content kind: philosopher, painting, location, leader, innovation
        #[arg(long, default_value = "philosopher")]
        kind: String,

        /// Only include items of this category
        #[arg(long)]
        category: Option<String>,

        /// Number of comparisons (overrides the config file)
        #[arg(long)]
        rounds: Option<u32>,

        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Take a multiple-choice culture quiz
    Trivia {
        /// Quiz ID (omit to choose from a list)
        #[arg(long)]
        quiz: Option<String>,

        /// Seed for a reproducible option order
        #[arg(long)]
        seed: Option<u64>,

        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// List available trivia quizzes
    Quizzes {
        /// Filter by category ("All" for everything)
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Browse the content gallery
    Browse {
        /// Content kind: philosopher, painting, location, leader, innovation
        kind: String,

        /// Filter by category ("All" for everything)
        #[arg(long)]
        category: Option<String>,

        /// Show the details of one item
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Validate the data files
    Validate,

    /// Show or change the interface language
    Lang {
        #[command(subcommand)]
        action: Option<LangCommand>,
    },

    /// Create a starter config file
    Init,
}

#[derive(Subcommand)]
enum LangCommand {
    /// Print the current language
    Show,
    /// Set the language (en or ja)
    Set { language: Language },
    /// Switch between English and Japanese
    Toggle,
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Init = cli.command {
        return commands::init::execute();
    }

    let mut config = config::load_config_from(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_dir = data;
    }

    match cli.command {
        Commands::Profile { json } => commands::profile::execute(&config, json),
        Commands::Duel {
            kind,
            category,
            rounds,
            seed,
            json,
        } => commands::duel::execute(
            &config,
            DuelArgs {
                kind,
                category,
                rounds,
                seed,
                json,
            },
        ),
        Commands::Trivia { quiz, seed, json } => {
            commands::trivia::execute(&config, TriviaArgs { quiz, seed, json })
        }
        Commands::Quizzes { category, json } => commands::quizzes::execute(&config, category, json),
        Commands::Browse {
            kind,
            category,
            id,
            json,
        } => commands::browse::execute(&config, kind, category, id, json),
        Commands::Validate => commands::validate::execute(&config),
        Commands::Lang { action } => {
            let action = match action {
                None | Some(LangCommand::Show) => LangAction::Show,
                Some(LangCommand::Set { language }) => LangAction::Set(language),
                Some(LangCommand::Toggle) => LangAction::Toggle,
            };
            commands::lang::execute(&config, action)
        }
        Commands::Init => commands::init::execute(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vitrine=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
