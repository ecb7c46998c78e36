use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Weekday;
use clap::{Parser, Subcommand};
use log::info;

use weekplan::availability::hour::Hour;
use weekplan::availability::model::{WeekSchedule, day_name, load_seed};
use weekplan::availability::selection::SelectOutcome;
use weekplan::grid::{DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR, GridConfig};
use weekplan::planner::Planner;
use weekplan::render::{day_grid, weekly_overview};

#[derive(Parser, Debug)]
#[command(
    name = "weekplan",
    version,
    about = "Weekly availability planner with hour-range booking"
)]
struct Cli {
    /// JSON file with the starting week.
    #[arg(long, conflicts_with = "demo")]
    seed: Option<PathBuf>,

    /// Start from the built-in example week.
    #[arg(long)]
    demo: bool,

    #[arg(long, default_value_t = DEFAULT_FIRST_HOUR)]
    first_hour: u8,

    #[arg(long, default_value_t = DEFAULT_LAST_HOUR)]
    last_hour: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the weekly overview.
    Week {
        #[arg(long)]
        json: bool,
    },
    /// Print the hour grid for one day.
    Day {
        #[arg(value_parser = parse_day)]
        day: Weekday,
    },
    /// Tap hours on a day's picker, then confirm (or cancel).
    Edit {
        #[arg(value_parser = parse_day)]
        day: Weekday,

        #[arg(long = "tap", required = true, num_args = 1..)]
        taps: Vec<Hour>,

        #[arg(long)]
        cancel: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let grid = GridConfig::new(cli.first_hour, cli.last_hour).context("invalid grid bounds")?;

    let schedule = match &cli.seed {
        Some(path) => {
            load_seed(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None if cli.demo => WeekSchedule::demo(),
        None => WeekSchedule::empty(),
    };
    let mut planner = Planner::new(schedule, grid);

    match cli.command {
        Command::Week { json } => {
            if json {
                let text = serde_json::to_string_pretty(&planner.schedule().snapshot())?;
                println!("{text}");
            } else {
                print!("{}", weekly_overview(planner.schedule()));
            }
        }
        Command::Day { day } => {
            print!(
                "{}",
                day_grid(planner.grid(), planner.schedule(), day, None)
            );
        }
        Command::Edit { day, taps, cancel } => run_edit(&mut planner, day, &taps, cancel)?,
    }
    Ok(())
}

fn run_edit(planner: &mut Planner, day: Weekday, taps: &[Hour], cancel: bool) -> Result<()> {
    planner.edit_day(day);
    for hour in taps {
        let outcome = planner.tap(*hour)?;
        match outcome {
            SelectOutcome::Booked => println!("{hour}: already booked"),
            SelectOutcome::Deselected => println!("{hour}: deselected"),
            SelectOutcome::Anchored => println!("{hour}: range started"),
            SelectOutcome::RangeFilled { added } => {
                println!("{hour}: range completed, {added} hour(s) added")
            }
        }
    }

    if let Some(session) = planner.edit_session() {
        print!(
            "{}",
            day_grid(planner.grid(), planner.schedule(), day, Some(session))
        );
    }

    if cancel {
        planner.back_to_weekly();
        info!("edit of {} cancelled", day_name(day));
        println!("Cancelled; {} unchanged.", day_name(day));
        return Ok(());
    }

    let Some(merged) = planner.confirm()? else {
        bail!("nothing selected on {}; nothing to confirm", day_name(day));
    };
    info!("{} now has {} booked hour(s)", day_name(day), merged.len());
    println!("Confirmed.");
    print!("{}", weekly_overview(planner.schedule()));
    Ok(())
}

fn parse_day(input: &str) -> Result<Weekday, String> {
    input
        .trim()
        .parse::<Weekday>()
        .map_err(|_| format!("unknown day '{input}', expected e.g. Mon or Monday"))
}
