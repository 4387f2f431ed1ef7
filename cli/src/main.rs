use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use minegrid_core::{Game, GameError, Intent, MineGenerator, Outcome};
use web_time::Instant;

use command::{Command, HELP};
use form::NewGameForm;
use settings::Settings;

mod command;
mod form;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rows of the first game
    #[arg(long, allow_hyphen_values = true)]
    rows: Option<i64>,

    /// Columns of the first game
    #[arg(long, allow_hyphen_values = true)]
    columns: Option<i64>,

    /// Mines of the first game
    #[arg(long, allow_hyphen_values = true)]
    mines: Option<i64>,

    /// TOML file with default rows, columns, mines and seed
    #[arg(short, long, env = "MINEGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Print the session as JSON after every command
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let file = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(file.overridden_by(Settings {
            rows: self.rows,
            columns: self.columns,
            mines: self.mines,
            seed: self.seed,
        }))
    }
}

/// Runs one command. Game rule violations are shown to the player, not propagated.
fn run<G: MineGenerator>(
    game: &mut Game<G>,
    command: Command,
    out: &mut impl Write,
) -> io::Result<()> {
    let columns = game.session().column_count().unwrap_or(1);
    let result = match command {
        Command::Start(form) => match form.validate() {
            Ok(config) => game.start(config),
            Err(errors) => {
                for error in errors {
                    writeln!(out, "{error}")?;
                }
                return Ok(());
            }
        },
        Command::Open(target) => target.resolve(columns).and_then(|index| game.open(index)),
        Command::Flag(target) => target
            .resolve(columns)
            .and_then(|index| game.toggle_flag(index)),
        Command::Repeat => game.repeat(),
        Command::Reset => game.reset(),
        Command::Json => {
            let json = serde_json::to_string_pretty(game.session()).map_err(io::Error::other)?;
            return writeln!(out, "{json}");
        }
        Command::Help => return writeln!(out, "{HELP}"),
        Command::Show | Command::Quit => Ok(Outcome::NoChange),
    };

    match result {
        Ok(Outcome::Refused) => writeln!(out, "No flags left")?,
        Ok(outcome) => log::debug!("{:?} -> {:?}", command, outcome),
        Err(GameError::NoGame) => writeln!(out, "Start a game first")?,
        Err(error) => writeln!(out, "{error}")?,
    }
    render::render(game.session(), out)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = args.settings()?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut game = Game::new(seed);
    let mut out = io::stdout().lock();

    if let (Some(rows), Some(columns), Some(mines)) =
        (settings.rows, settings.columns, settings.mines)
    {
        let form = NewGameForm {
            rows,
            columns,
            mines,
        };
        run(&mut game, Command::Start(form), &mut out)?;
    } else {
        render::render(game.session(), &mut out)?;
    }

    let mut clock = Instant::now();
    for line in io::stdin().lock().lines() {
        let line = line.context("reading command")?;

        // the clock only runs while a game is in progress
        let now = Instant::now();
        if game.session().status().is_in_progress() {
            let delta_ms = now.duration_since(clock).as_millis() as u64;
            game.dispatch(Intent::Tick { delta_ms })?;
        }
        clock = now;

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => run(&mut game, command, &mut out)?,
            Err(message) => writeln!(out, "{message}")?,
        }
        if args.json {
            writeln!(out, "{}", serde_json::to_string(game.session())?)?;
        }
        out.flush()?;
    }

    Ok(())
}
