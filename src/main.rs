#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result, anyhow};
use fruitmerge::app::App;
use fruitmerge::config::{self, Config};
use fruitmerge::merge::ContactOutcome;
use fruitmerge::session::Subscription;
use log::{error, info, warn};
use std::io::{self, BufRead, Write};
use std::time::Duration;

// Frame length used by `tick` when no duration is given
const DEFAULT_TICK: Duration = Duration::from_millis(16);

const HELP: &str = "commands: start | pause | resume | toggle | stop | restart | \
move <dx> <dy> | press | release | tick [secs] | contact <i> <j> | list | help | quit";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting fruitmerge");

    // Fall back to defaults if the file cannot be read
    if Config::force_reload() {
        info!(
            "Configuration loaded from {}",
            config::loader::get_config_file_path().display()
        );
    } else {
        error!("Failed to load configuration, continuing with defaults");
    }

    let mut app = App::try_from(Config::current()).context("cannot assemble game")?;
    let events = app.subscribe();

    println!("{HELP}");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match run_command(&mut app, command, args) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => warn!("{e}"),
        }

        print_events(&events);
        stdout.flush()?;
    }

    app.shutdown();
    info!("Goodbye");
    Ok(())
}

// Returns true when the host should exit
fn run_command(app: &mut App, command: &str, args: &[&str]) -> Result<bool> {
    match command {
        "start" => app.start(),
        "pause" => app.pause(),
        "resume" => app.resume(),
        "toggle" => app.toggle_pause(),
        "stop" => app.stop(),
        "restart" => app.restart(),
        "move" => {
            let dx = parse_arg::<f32>(args, 0, "dx")?;
            let dy = parse_arg::<f32>(args, 1, "dy").unwrap_or(0.0);
            app.set_movement(dx, dy);
        }
        "press" => app.press_start(),
        "release" => app.press_end(),
        "tick" => {
            let delta = match args.first() {
                Some(secs) => secs
                    .parse::<f32>()
                    .map_err(|e| anyhow!("bad duration '{secs}': {e}"))
                    .and_then(|s| {
                        Duration::try_from_secs_f32(s)
                            .map_err(|e| anyhow!("bad duration '{secs}': {e}"))
                    })?,
                None => DEFAULT_TICK,
            };
            let report = app.tick(delta);
            if let Some(entity) = report.dropped {
                println!("dropped {entity:?}");
            }
            for outcome in &report.contacts {
                if let ContactOutcome::Merged { successor, kind } = outcome {
                    println!("merged into {kind} ({successor:?})");
                }
            }
            let position = app.dropper_position();
            println!(
                "dropper at ({:.2}, {:.2}) holding {}",
                position.x,
                position.y,
                app.pending_kind()
            );
        }
        "contact" => {
            let fruits = app.fruits();
            let i = parse_arg::<usize>(args, 0, "i")?;
            let j = parse_arg::<usize>(args, 1, "j")?;
            let (a, b) = match (fruits.get(i), fruits.get(j)) {
                (Some(a), Some(b)) => (a.0, b.0),
                _ => return Err(anyhow!("no fruit at index {i} or {j}")),
            };
            app.report_contact(a, b);
        }
        "list" => {
            for (index, (entity, kind, position)) in app.fruits().iter().enumerate() {
                println!(
                    "{index:>3}: {kind} {entity:?} at ({:.2}, {:.2})",
                    position.x, position.y
                );
            }
            println!("next: {}", app.upcoming_kind());
        }
        "help" => println!("{HELP}"),
        "quit" | "exit" => return Ok(true),
        other => return Err(anyhow!("unknown command '{other}'")),
    }
    Ok(false)
}

fn parse_arg<T: std::str::FromStr>(args: &[&str], index: usize, name: &str) -> Result<T> {
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("missing argument <{name}>"))?;
    raw.parse::<T>()
        .map_err(|_| anyhow!("bad value '{raw}' for <{name}>"))
}

fn print_events(events: &Subscription) {
    for event in events.try_iter() {
        println!("event: {event:?}");
    }
}
