use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tokenintel", about = "Multi-agent cryptocurrency token analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the token directory
    Search {
        /// Symbol or name fragment (at least 2 characters)
        query: String,
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Search for tokens and run the full analysis pipeline on the matches
    Analyze {
        /// Symbol or name fragment (at least 2 characters)
        query: String,
        /// Analyze at most this many matches
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Show the most recent analysis report
    Report,
    /// List recent reports with their decision tallies
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}
