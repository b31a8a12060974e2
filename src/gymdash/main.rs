use clap::Parser;
use colored::*;

use gymdash::api::{DashApi, ExerciseFilter, LevelFilter};
use gymdash::error::{DashError, Result};
use gymdash::transport::fixture::FixtureTransport;

mod args;
mod render;

use args::{Cli, Commands};

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // The binary ships with the bundled sample backend; a deployment
    // against the real query surface plugs its own Transport into
    // DashApi the same way.
    let api = DashApi::new(FixtureTransport::new());
    let (page, limit) = (cli.page, cli.limit);

    let result = match cli.command {
        Some(Commands::Dashboard) | None => api.dashboard().await?,
        Some(Commands::Activity) => api.activity(page, limit).await?,
        Some(Commands::Steps) => api.steps(page, limit).await?,
        Some(Commands::Challenges) => api.challenges(page, limit).await?,
        Some(Commands::Exercises { search, level }) => {
            let level = level.parse::<LevelFilter>().map_err(DashError::Api)?;
            let filter = ExerciseFilter { search, level };
            api.exercises(page, limit, &filter).await?
        }
        Some(Commands::Conversations) => api.conversations(page, limit).await?,
        Some(Commands::Collections { name }) => api.collection(&name, page, limit).await?,
        Some(Commands::Meta) => api.meta().await?,
    };

    render::print_view(&result);
    Ok(())
}
