use crate::commands::disc::{IdCommand, LookupCommand, TocCommand};
use clap::{Parser, Subcommand};

pub mod disc;

/// CLI for identifying audio CDs and finding their MusicBrainz release.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Toc(TocCommand),
    Id(IdCommand),
    Lookup(LookupCommand),
}
