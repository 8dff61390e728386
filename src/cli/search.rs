//! Search commands - completion, resolution and annotation

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tracing::debug;

use super::render_completion;
use crate::domain::geo::{Coordinate, CoordinateSpan, SearchRegion};
use crate::domain::search::SearchCompletion;
use crate::infrastructure::services::CompletionStatus;
use crate::AppServices;

/// Extra time granted to the completion backend after the debounce period
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args, Debug, Clone)]
pub struct CompleteArgs {
    /// Query fragment as typed
    pub fragment: String,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Query fragment as typed
    pub fragment: String,

    /// Which completion to resolve
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

#[derive(Args, Debug, Clone)]
pub struct AnnotateArgs {
    /// Query fragment as typed
    pub fragment: String,

    /// Restrict resolution to a region centred here, as "LAT,LON"
    #[arg(long, value_parser = parse_coordinate)]
    pub near: Option<Coordinate>,

    /// Region span in degrees, used with --near
    #[arg(long, default_value_t = 0.1)]
    pub span: f64,
}

fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| "expected LAT,LON".to_string())?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {}", e))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude: {}", e))?;

    Coordinate::new(lat, lon).map_err(|e| e.to_string())
}

/// Feeds `fragment` to the search service and waits for its completions.
///
/// An empty list means the backend answered with nothing; a failed or silent
/// backend is an error.
async fn completions_for(services: &AppServices, fragment: &str) -> anyhow::Result<Vec<SearchCompletion>> {
    let search = services.search();
    search.complete_query(fragment);

    let wait = search.config().completion_debounce + COMPLETION_TIMEOUT;
    let status = tokio::time::timeout(wait, search.wait_until_settled())
        .await
        .with_context(|| format!("Completion backend did not respond for \"{}\"", fragment))?;

    match status {
        CompletionStatus::Failed => anyhow::bail!("Completion backend failed for \"{}\"", fragment),
        CompletionStatus::Pending => anyhow::bail!("Completion for \"{}\" was interrupted", fragment),
        CompletionStatus::Idle | CompletionStatus::Ready => Ok(search.suggestions()),
    }
}

/// Print completions for a fragment with matched text in brackets
pub async fn complete(services: &AppServices, args: CompleteArgs) -> anyhow::Result<()> {
    let completions = completions_for(services, &args.fragment).await?;

    if completions.is_empty() {
        if services.search().is_nothing_found() {
            println!("Nothing found for \"{}\"", args.fragment);
        }
        return Ok(());
    }

    for (index, completion) in completions.iter().enumerate() {
        println!("{:>3}  {}", index, render_completion(completion));
    }
    Ok(())
}

/// Resolve one completion and print its places
pub async fn resolve(services: &AppServices, args: ResolveArgs) -> anyhow::Result<()> {
    let completions = completions_for(services, &args.fragment).await?;

    let Some(completion) = completions.get(args.index) else {
        anyhow::bail!(
            "No completion at index {} for \"{}\" ({} available)",
            args.index,
            args.fragment,
            completions.len()
        );
    };

    let items = services.search().resolve(completion).await?;

    if items.is_empty() {
        println!("No places found for \"{}\"", completion.title);
        return Ok(());
    }

    for item in &items {
        println!("{}  {}  {}  ({})", item.name, item.subtitle(), item.coordinate, item.result_type);
    }
    Ok(())
}

/// Submit a search: record the fragment as a recent search and pin every
/// completion, optionally inside a region
pub async fn annotate(services: &AppServices, args: AnnotateArgs) -> anyhow::Result<()> {
    if !args.fragment.trim().is_empty() {
        services.recents.add(args.fragment.clone());
    }

    let completions = completions_for(services, &args.fragment).await?;

    let annotations = match args.near {
        Some(center) => {
            let region = SearchRegion::new(center, CoordinateSpan::new(args.span, args.span)?)?;
            let wait = services.search().config().completion_debounce + COMPLETION_TIMEOUT;

            match tokio::time::timeout(wait, services.annotations.search_this_area(region))
                .await
                .context("Completion backend did not respond for the new search area")?
            {
                Some(annotations) => annotations,
                None => {
                    debug!("Search area update rejected, keeping current pins");
                    services.annotations.annotations()
                }
            }
        }
        None => services.annotations.annotate_all(&completions).await,
    };

    if annotations.is_empty() {
        println!("No places to pin for \"{}\"", args.fragment);
        return Ok(());
    }

    for annotation in &annotations {
        println!("{}  {}  {}", annotation.coordinate, annotation.title, annotation.subtitle);
    }
    Ok(())
}
