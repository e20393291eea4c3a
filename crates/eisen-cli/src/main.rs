use clap::Parser;
use eisen_core::db;
use eisen_core::error::CoreError;
use eisen_core::promotion::PromotionEngine;
use eisen_core::repository::SqliteRepository;
use owo_colors::{OwoColorize, Style};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{} Invalid configuration in {} or EISEN_* variables: {}",
                "Error:".red().bold(),
                config::CONFIG_FILE,
                e
            );
            std::process::exit(1);
        }
    };
    init_logging(&config.log_level);

    if let Err(e) = run(cli, &config).await {
        handle_error(e);
        std::process::exit(1);
    }
}

fn init_logging(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

async fn run(cli: cli::Cli, config: &config::Config) -> anyhow::Result<()> {
    let engine = PromotionEngine::new(config.buffer_policy()?);
    let db_pool = db::establish_connection(&config.database_path).await?;
    let repository = SqliteRepository::new(db_pool, engine);
    debug!(command = ?cli.command, "running command");

    match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&repository, command).await,
        cli::Commands::List(command) => commands::list::list_tasks(&repository, command).await,
        cli::Commands::Show(command) => {
            commands::show::show_task(&repository, repository.engine(), command).await
        }
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command).await,
        cli::Commands::Do(command) => commands::r#do::do_task(&repository, command).await,
        cli::Commands::Move(command) => commands::r#move::move_task(&repository, command).await,
        cli::Commands::Pending(command) => {
            commands::pending::send_to_pending(&repository, command).await
        }
        cli::Commands::Schedule(command) => {
            commands::schedule::schedule_task(&repository, repository.engine(), command).await
        }
        cli::Commands::Accelerate(command) => {
            commands::accelerate::accelerate_task(&repository, command).await
        }
        cli::Commands::Promote => commands::promote::promote_tasks(&repository).await,
        cli::Commands::Delete(command) => {
            commands::delete::delete_task(&repository, command).await
        }
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} Not found: {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
