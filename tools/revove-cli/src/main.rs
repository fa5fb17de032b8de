//! Revove terminal client
//!
//! Browse the places catalog, get place-name suggestions and search review
//! text for item mentions.

use anyhow::Context;
use clap::{Parser, Subcommand};
use revove_core::{
    build_review_query, highlight, load_env, result_note, suggest_places, ApiClient, ClientConfig,
    Pagination, Place, PlaceId, Segment, SelectedPlaces, REVIEW_PAGE_LIMIT,
};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL (overrides REVOVE_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of places
    Places {
        /// Page number, 1-based
        #[arg(short, long)]
        page: Option<String>,
    },
    /// Show a place with its recommendations
    Place {
        /// Place id
        id: PlaceId,
    },
    /// Suggest places for a partial name
    Suggest {
        /// What the user typed
        query: String,
    },
    /// Search review text for a keyword
    Reviews {
        /// Item or keyword, e.g. "latte"
        keyword: String,
        /// Only reviews of this place id
        #[arg(long)]
        place_id: Option<PlaceId>,
        /// Only reviews of places with this name (repeatable)
        #[arg(long = "place")]
        places: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if !load_env()? {
        debug!("no .env file, using process environment");
    }

    let config = match cli.api_base {
        Some(base) => ClientConfig::from_env().with_base_url(base),
        None => ClientConfig::from_env(),
    };
    debug!(base_url = %config.base_url, "using API");
    let client = ApiClient::new(config)?;

    match cli.command {
        Command::Places { page } => list_places(&client, page.as_deref()).await,
        Command::Place { id } => show_place(&client, id).await,
        Command::Suggest { query } => suggest(&client, &query).await,
        Command::Reviews {
            keyword,
            place_id,
            places,
        } => search_reviews(&client, &keyword, place_id, places).await,
    }
}

fn print_place(place: &Place) {
    let mut line = format!("#{:<5} {}", place.id, place.name);
    if !place.city.is_empty() {
        line.push_str(&format!("  [{}]", place.city));
    }
    if let Some(rating) = place.rating {
        line.push_str(&format!("  {:.1}*", rating));
    }
    if let Some(count) = place.review_count {
        line.push_str(&format!("  {} reviews", count));
    }
    println!("{}", line);
    if let Some(address) = place.display_address() {
        println!("       {}", address);
    }
}

async fn list_places(client: &ApiClient, raw_page: Option<&str>) -> anyhow::Result<()> {
    let page = revove_core::parse_page(raw_page);
    let data = client
        .fetch_places_page(page)
        .await
        .context("Unable to load places from the API")?;

    if data.results.is_empty() {
        println!("No places found.");
        return Ok(());
    }
    for place in &data.results {
        print_place(place);
    }

    let nav = Pagination::from_page(page, &data);
    if nav.show_controls() {
        let mut footer = nav.label();
        if let Some(prev) = nav.previous_page() {
            footer.push_str(&format!("  (previous: --page {})", prev));
        }
        if let Some(next) = nav.next_page() {
            footer.push_str(&format!("  (next: --page {})", next));
        }
        println!("\n{}", footer);
    }
    Ok(())
}

async fn show_place(client: &ApiClient, id: PlaceId) -> anyhow::Result<()> {
    let detail = client.fetch_place(id).await?;
    print_place(&detail.place);

    println!();
    if detail.recommendations.is_empty() {
        println!("No recommendations yet.");
        return Ok(());
    }
    println!("Recommendations:");
    for rec in &detail.recommendations {
        match rec.confidence_percent() {
            Some(pct) => println!("  {}. {} (confidence: {}%)", rec.rank, rec.text, pct),
            None => println!("  {}. {}", rec.rank, rec.text),
        }
        if !rec.source.is_empty() {
            println!("     source: {}", rec.source);
        }
    }
    Ok(())
}

async fn suggest(client: &ApiClient, query: &str) -> anyhow::Result<()> {
    let catalog = client.fetch_places().await.unwrap_or_else(|e| {
        warn!("Could not load place catalog, fuzzy fallback disabled: {}", e);
        Vec::new()
    });

    let suggestions = suggest_places(query, client, &catalog).await?;
    if suggestions.is_empty() {
        println!("No suggestions.");
    }
    for place in &suggestions {
        print_place(place);
    }
    Ok(())
}

async fn search_reviews(
    client: &ApiClient,
    keyword: &str,
    place_id: Option<PlaceId>,
    places: Vec<String>,
) -> anyhow::Result<()> {
    let (selected, unmatched) = resolve_places(client, &places).await;

    let Some(mut query) = build_review_query(keyword, &selected, "") else {
        println!("{}", result_note(0, REVIEW_PAGE_LIMIT));
        return Ok(());
    };
    query.place_id = place_id;
    query.place_names.extend(unmatched);

    let reviews = client
        .search_reviews(&query)
        .await
        .context("Something went wrong searching reviews")?;

    if reviews.is_empty() {
        println!("No reviews found for that keyword.");
    }
    for review in &reviews {
        let text: String = highlight(&review.text, &query.q)
            .iter()
            .map(|segment| match segment {
                Segment::Match(s) => format!("**{}**", s),
                Segment::Plain(s) => s.to_string(),
            })
            .collect();
        println!(
            "{} ({})  {}*\n  {}\n",
            review.place_name,
            review.created_date(),
            review.rating,
            text
        );
    }
    println!("{}", result_note(reviews.len(), REVIEW_PAGE_LIMIT));
    Ok(())
}

/// Match `--place` names against the catalog; names without an exact match
/// are passed through as typed
async fn resolve_places(client: &ApiClient, names: &[String]) -> (SelectedPlaces, Vec<String>) {
    let mut selected = SelectedPlaces::new();
    let mut unmatched = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let exact = match client.search_places_by_name(name).await {
            Ok(found) => found
                .into_iter()
                .find(|p| p.name.to_lowercase() == name.to_lowercase()),
            Err(e) => {
                warn!("Place lookup for {:?} failed: {}", name, e);
                None
            }
        };
        match exact {
            Some(place) => {
                selected.add(place);
            }
            None => unmatched.push(name.to_string()),
        }
    }
    (selected, unmatched)
}
