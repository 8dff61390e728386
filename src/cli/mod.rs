//! CLI module for the searchable map
//!
//! Provides subcommands over the search core:
//! - `recent`: inspect and edit the recent searches list
//! - `complete`, `resolve`, `annotate`: query completion and place resolution
//! - `look-around`: street-level scene lookup

pub mod look_around;
pub mod recent;
pub mod search;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::search::SearchCompletion;
use crate::infrastructure::logging;
use crate::{create_app_services, AppServices};

/// Searchable map - place search with recent searches and debounced completion
#[derive(Parser)]
#[command(name = "searchable-map")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage recent searches
    #[command(subcommand)]
    Recent(recent::RecentCommand),

    /// Print completions for a query fragment
    Complete(search::CompleteArgs),

    /// Resolve one completion of a query into places
    Resolve(search::ResolveArgs),

    /// Pin every completion of a query on the map
    Annotate(search::AnnotateArgs),

    /// Look up the street-level scene at a coordinate
    LookAround(look_around::LookAroundArgs),
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let services = bootstrap()?;

    match cli.command {
        Command::Recent(command) => recent::run(&services, command),
        Command::Complete(args) => search::complete(&services, args).await,
        Command::Resolve(args) => search::resolve(&services, args).await,
        Command::Annotate(args) => search::annotate(&services, args).await,
        Command::LookAround(args) => look_around::run(&services, args).await,
    }
}

fn bootstrap() -> anyhow::Result<AppServices> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    create_app_services(&config)
}

/// Renders highlighted ranges of a completion line in brackets
pub fn render_highlights(segments: &[(String, bool)]) -> String {
    segments
        .iter()
        .map(|(text, highlighted)| {
            if *highlighted {
                format!("[{}]", text)
            } else {
                text.clone()
            }
        })
        .collect()
}

pub(crate) fn render_completion(completion: &SearchCompletion) -> String {
    let title = render_highlights(&completion.title_segments());

    if completion.subtitle.is_empty() {
        title
    } else {
        format!("{}  {}", title, render_highlights(&completion.subtitle_segments()))
    }
}
