use clap::{Parser, ValueEnum};
use tracing::info;

use inventory_api::{
    config,
    migrator::{run_migration, MigrationDirection},
};

/// Apply or roll back the products schema
#[derive(Debug, Parser)]
#[command(name = "migration", version)]
struct Cli {
    /// What to do with the schema
    #[arg(value_enum, default_value_t = Direction::Up)]
    direction: Direction,

    /// Overrides the configured database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
    Fresh,
}

impl From<Direction> for MigrationDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MigrationDirection::Up,
            Direction::Down => MigrationDirection::Down,
            Direction::Fresh => MigrationDirection::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let database_url = match cli.database_url {
        Some(url) => {
            config::init_tracing("info", false);
            url
        }
        None => {
            let cfg = config::load_config()?;
            config::init_tracing(cfg.log_level(), cfg.log_json);
            cfg.database_url
        }
    };

    info!(direction = ?cli.direction, "Starting database migration");
    run_migration(&database_url, cli.direction.into()).await?;
    info!("Migration completed successfully");

    Ok(())
}
