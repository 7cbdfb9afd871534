use crate::commands::*;
use crate::output::*;
use scatter_runtime::{Command, CommandOutcome, PipelineSettings, PollOutcome, PollTimer, Session};
use settings::SettingsError;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

pub fn handle_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run {
            pipeline,
            duration_ms,
        } => {
            let settings = load_settings(&pipeline)?;
            handle_run(settings, Duration::from_millis(duration_ms), cli.json)?;
        }
        Commands::Interactive { pipeline } => {
            let settings = load_settings(&pipeline)?;
            handle_interactive(settings, cli.json)?;
        }
        Commands::Config { command } => handle_config_command(command)?,
    }
    Ok(())
}

pub fn load_settings(args: &PipelineArgs) -> Result<PipelineSettings, SettingsError> {
    let mut settings = match &args.config {
        Some(path) => PipelineSettings::load_from_file(path)?,
        None => PipelineSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }
    if let Some(batch_size) = args.batch_size {
        settings.batch_size = batch_size;
    }
    if let Some(retry_delay_ms) = args.retry_delay_ms {
        settings.retry_delay_ms = retry_delay_ms;
    }
    if let Some(poll_period_ms) = args.poll_period_ms {
        settings.poll_period_ms = poll_period_ms;
    }
    settings.validate()?;
    Ok(settings)
}

fn handle_run(
    settings: PipelineSettings,
    duration: Duration,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(settings)?;
    print_outcome(&session.apply(Command::Start)?);
    let refreshed = session.run_for_duration(duration, |poller| print_display(poller, json));
    log::debug!("display refreshed {refreshed} times");
    print_outcome(&session.apply(Command::Stop)?);
    Ok(())
}

fn handle_interactive(
    settings: PipelineSettings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(settings)?;
    let (line_tx, line_rx) = mpsc::channel::<String>();

    // Detached: a blocked stdin read cannot be interrupted.
    thread::Builder::new()
        .name("scatter-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    print_info("Commands: start, pause, resume, stop, status, quit");
    let mut timer = PollTimer::new(session.poll_period());
    loop {
        match line_rx.recv_timeout(timer.remaining()) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        print_error(&err.to_string());
                        continue;
                    }
                };
                let outcome = session.apply(command)?;
                print_outcome(&outcome);
                if outcome == CommandOutcome::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if session.tick() == PollOutcome::Updated {
                    print_display(session.poller(), json);
                }
                timer.fired();
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if session.controller().status().is_running() {
        print_outcome(&session.apply(Command::Stop)?);
    }
    Ok(())
}

fn handle_config_command(command: ConfigCommands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ConfigCommands::Show { config } => {
            let settings = match config {
                Some(path) => PipelineSettings::load_from_file(path)?,
                None => PipelineSettings::default(),
            };
            print_settings(&settings);
        }
        ConfigCommands::Write { path } => {
            PipelineSettings::default().save_to_file(&path)?;
            print_info(&format!("Settings written to {}", path.display()));
        }
    }
    Ok(())
}
