use clap::{Parser, Subcommand, ValueEnum};
use eyre::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskboard::{BoardConfig, Notifier, Outcome, Renderer, Session, StatusValidation, Store};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Taskboard CLI - In-memory Kanban board with configurable status columns")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Board config file (default: <config dir>/taskboard/board.yaml if it exists)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in column set, used when no config file is given or found
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Reject statuses that no column displays
    #[arg(long)]
    strict: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// backlog, doing, review, done
    Four,
    /// todo, in-progress, done
    Three,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board
    Show {
        /// Seed the board with sample tasks first
        #[arg(long)]
        sample: bool,

        /// Print tasks as JSON instead of columns
        #[arg(long)]
        json: bool,
    },

    /// List the configured columns
    Columns,

    /// Read board commands from stdin until EOF or `quit`
    Shell {
        /// Seed the board with sample tasks first
        #[arg(long)]
        sample: bool,
    },
}

fn load_config(cli: &Cli) -> Result<BoardConfig> {
    let mut config = match (cli.preset, &cli.config) {
        (Some(Preset::Four), None) => BoardConfig::four_column(),
        (Some(Preset::Three), None) => BoardConfig::three_column(),
        (_, path) => BoardConfig::load_or_default(path.as_deref())?,
    };
    if cli.strict {
        config.validation = StatusValidation::Strict;
    }
    Ok(config)
}

fn run_shell(session: &Session, renderer: Renderer) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Type `help` for commands.");
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        let outcome = session.handle_line(&line);
        if let Some(toast) = session.notifier().current() {
            println!("{}", renderer.toast(&toast));
            session.notifier().hide();
        }

        match outcome {
            Outcome::Continue(text) if text.is_empty() => {}
            Outcome::Continue(text) => println!("{}", text.trim_end()),
            Outcome::Quit => break,
        }
        stdout.flush()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(&cli)?;
    config.validate()?;

    // One board for the whole process
    let store = Store::new(config);
    let renderer = if cli.no_color { Renderer::plain() } else { Renderer::default() };

    match cli.command {
        Commands::Show { sample, json } => {
            if sample {
                store.initialize_sample_data();
            }
            if json {
                let tasks = store.all_tasks().get();
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", renderer.board(&store));
            }
        }
        Commands::Columns => {
            print!("{}", renderer.columns(&store));
        }
        Commands::Shell { sample } => {
            if sample {
                store.initialize_sample_data();
            }
            let session = Session::new(store, Notifier::new(), renderer);
            run_shell(&session, renderer)?;
        }
    }

    Ok(())
}
