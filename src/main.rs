use std::process::ExitCode;

use clap::Parser;
use movie_search_suite::cli::{self, Cli};
use movie_search_suite::shared::utils::init_logger;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logger();

    cli::run(&cli).await.into()
}
