use clap::Parser;
use clap::error::ErrorKind;
use std::io;
use task_cli::cli::{Cli, Command, collect_overrides};
use task_cli::menu::{Menu, MenuOutcome};
use task_cli::render::{StatusStyle, render_task_json, render_task_table, render_tasks_json};
use task_core::config::{Config, load_config_with_fallback, merge_overrides};
use task_core::error::AppError;
use task_core::task_api;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TASK_TRACKER_LOG";

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let loaded = load_config_with_fallback();
    let overrides = collect_overrides(&cli.config_override)?;
    let config = merge_overrides(&loaded.config, &overrides);

    init_logging(&config);
    if let Some(err) = loaded.error {
        tracing::warn!(error = %err, "ignoring configuration file");
    }

    Ok(config)
}

fn run_interactive(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let mut store = task_api::open_store(&cli.file)?;
    let style = StatusStyle::new(config.color);

    let stdin = io::stdin();
    let outcome = Menu::new(stdin.lock(), io::stdout(), io::stderr(), style).run(&mut store)?;

    if outcome == MenuOutcome::SaveAndExit {
        task_api::write_store(&store, &cli.file, config.save_mode())?;
        println!("Tasks saved to '{}'.", cli.file.display());
    }

    Ok(())
}

fn run_command(cli: &Cli, command: &Command, config: &Config) -> Result<(), AppError> {
    let style = StatusStyle::new(config.color);
    let mode = config.save_mode();

    match command {
        Command::Add { title, description } => {
            let task = task_api::add_task(&cli.file, title, description, mode)?;
            if cli.json {
                println!("{}", render_task_json(&task)?);
            } else {
                let message = format!("Added task: {}", task.title);
                println!("{}", style.paint(task.status, &message));
            }
        }
        Command::Status { title, status } => {
            let task = task_api::change_status(&cli.file, title, *status, mode)?;
            if cli.json {
                println!("{}", render_task_json(&task)?);
            } else {
                let message = format!(
                    "Status of task '{}' changed to '{}'.",
                    task.title,
                    task.status.label()
                );
                println!("{}", style.paint(task.status, &message));
            }
        }
        Command::Cancel { title } => {
            let task = task_api::cancel_task(&cli.file, title, mode)?;
            if cli.json {
                println!("{}", render_task_json(&task)?);
            } else {
                let message = format!("Task '{}' canceled.", task.title);
                println!("{}", style.paint(task.status, &message));
            }
        }
        Command::List => {
            let tasks = task_api::list_tasks(&cli.file)?;
            if cli.json {
                println!("{}", render_tasks_json(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                println!("{}", render_task_table(&tasks, style)?);
            }
        }
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = resolve_config(cli)?;
    match cli.command.as_ref() {
        Some(command) => run_command(cli, command, &config),
        None => run_interactive(cli, &config),
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
