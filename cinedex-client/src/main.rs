use anyhow::{Context, bail};
use cinedex_client::{ClientConfig, DetailState, ListState, MovieDetailModel, MovieListModel};
use cinedex_core::model::{MovieId, MovieSummary};
use cinedex_core::{CatalogClient, Favorites, KeyValueStore, OfflineCache};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("cinedex_client", LevelFilter::Debug)
        .filter_module("cinedex_core", LevelFilter::Debug)
        .init();
}

const USAGE: &str = "usage: cinedex [search | detail <id> | favorite <id> | favorites]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let config = ClientConfig::from_environment()?;
    log::debug!("starting with {config:?}");

    let catalog: Arc<dyn CatalogClient> = Arc::new(config.catalog_client()?);
    let store: Arc<dyn KeyValueStore> = Arc::new(config.open_store()?);
    let favorites = Arc::new(Favorites::load(Arc::clone(&store)).await);

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("search") => {
            let cache = OfflineCache::new(store);
            run_search(catalog, cache, favorites, &config).await
        }
        Some("detail") => {
            let id = parse_id(args.next())?;
            show_detail(id, catalog).await
        }
        Some("favorite") => {
            let id = parse_id(args.next())?;
            toggle_favorite(id, catalog, &favorites).await
        }
        Some("favorites") => {
            for movie in favorites.list() {
                println!("{}", render_row(&movie, true));
            }
            Ok(())
        }
        Some(other) => bail!("unknown command {other:?}\n{USAGE}"),
    }
}

fn parse_id(raw: Option<String>) -> anyhow::Result<MovieId> {
    let raw = raw.context(USAGE)?;
    let id: u64 = raw.parse().with_context(|| format!("{raw:?} is not a movie id"))?;
    Ok(MovieId(id))
}

/// Every stdin line is treated as the new content of the search field.
/// `:refresh` re-issues the current query.
async fn run_search(
    catalog: Arc<dyn CatalogClient>,
    cache: OfflineCache,
    favorites: Arc<Favorites>,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    let model = MovieListModel::open(catalog, cache, config.debounce);
    model.subscribe(move |state| render_list(state, &favorites));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":refresh" => model.refresh().await,
            ":quit" => break,
            text => model.set_search_text(text),
        }
    }

    model.close();
    Ok(())
}

async fn show_detail(id: MovieId, catalog: Arc<dyn CatalogClient>) -> anyhow::Result<()> {
    let model = MovieDetailModel::new(id, catalog);
    model.ensure_loaded().await;

    match model.state() {
        DetailState::Loaded(detail) => {
            println!("{} ({})", detail.title(), detail.summary.release_year());
            println!("Released: {}", detail.formatted_release_date());
            println!("Runtime:  {}", detail.formatted_runtime());
            println!("Genres:   {}", detail.genres_text());
            println!(
                "Rating:   {:.1} ({} votes)",
                detail.summary.rating_average, detail.rating_count
            );
            if let Some(url) = detail.backdrop_url() {
                println!("Backdrop: {url}");
            }
            println!();
            println!("{}", detail.summary.synopsis);
            Ok(())
        }
        DetailState::Failed(message) => bail!(message),
        other => bail!("detail load ended in unexpected state {other:?}"),
    }
}

async fn toggle_favorite(
    id: MovieId,
    catalog: Arc<dyn CatalogClient>,
    favorites: &Favorites,
) -> anyhow::Result<()> {
    let detail = catalog.fetch_detail(id).await?;
    let now_favorite = favorites.toggle(detail.to_summary()).await?;
    let verb = if now_favorite { "Added" } else { "Removed" };
    println!("{verb} {} ({})", detail.title(), id);
    Ok(())
}

fn render_list(state: &ListState, favorites: &Favorites) {
    match state {
        ListState::Idle => {}
        ListState::Loading => println!("Loading…"),
        ListState::Failed(message) => println!("Error: {message}"),
        ListState::Loaded(movies) if movies.is_empty() => println!("No movies found"),
        ListState::Loaded(movies) => {
            for movie in movies {
                println!("{}", render_row(movie, favorites.is_favorite(movie.id)));
            }
        }
    }
}

fn render_row(movie: &MovieSummary, favorite: bool) -> String {
    let marker = if favorite { "♥" } else { " " };
    format!(
        "{marker} {:>8}  {} ({})  ★ {:.1}",
        movie.id.as_u64(),
        movie.title,
        movie.release_year(),
        movie.rating_average
    )
}
