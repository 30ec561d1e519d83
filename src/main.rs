use crate::commands::{Cli, Commands};
use crate::identify::{lookup_release, show_ids, show_toc};
use crate::util::process::SystemRunner;
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod cd;
mod commands;
mod discid;
mod error;
mod identify;
mod musicbrainz;
mod preferences;
mod toc;
mod util;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();
    let runner = SystemRunner;

    match cli.command {
        Commands::Toc(cmd) => show_toc(cmd, &runner).await?,
        Commands::Id(cmd) => show_ids(cmd, &runner).await?,
        Commands::Lookup(cmd) => lookup_release(pb.clone(), cmd, &runner).await?,
    }

    Ok(())
}
