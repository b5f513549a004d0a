#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, ExecuteStrategy, InfoStrategy, InitStrategy, SearchInput, SearchStrategy,
    ServeInput, ServeStrategy, VersionStrategy,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "querydesk")]
#[command(about = "Natural-language function router and documentation search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Route a query to a function call
    Execute {
        /// Free-text query
        query: String,
    },
    /// Answer a documentation question
    Search {
        /// Free-text question
        question: String,

        /// Answer from local rules only
        #[arg(long)]
        local: bool,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and loaded tables
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            ServeStrategy.execute(ServeInput { host, port }).await
        }
        Commands::Execute { query } => ExecuteStrategy.execute(query).await,
        Commands::Search { question, local } => {
            SearchStrategy
                .execute(SearchInput { question, local })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from(["querydesk", "search", "what is =>", "--local"]).unwrap();
        match cli.command {
            Commands::Search { question, local } => {
                assert_eq!(question, "what is =>");
                assert!(local);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["querydesk", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve { host: None, port: Some(9000) }
        ));
    }
}
