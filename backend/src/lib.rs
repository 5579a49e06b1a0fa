mod cli;
mod config;
mod infrastructure;

use anyhow::{bail, Context};
use clap::Parser;
use spinlog_core::catalog::normalize;
use spinlog_core::domain::{AlbumSummary, CatalogAlbumId, CollectionId, EntryId, ListenDraft, LogId};
use spinlog_core::genres;
use spinlog_core::ports::CatalogSearch;
use spinlog_core::services::{
  recent_reviews, CollectionScreen, FavoritesService, ListenLogService, RankStore, RECENT_REVIEWS,
};
use spinlog_remote::{
  ApiClient, HttpCatalogSearch, HttpCollectionStore, HttpFavoritesStore, HttpListenLogStore, RemoteConfig,
};

use crate::cli::{Cli, Command, FavoritesAction, LogArgs, Pick};
use crate::config::ScreenConfig;
use infrastructure::logging;
use infrastructure::reporter::{render_candidates, render_collection, render_genres, ConsoleReporter};

/// Type alias to simplify the generic signature of the façade.
type ConcreteScreen = CollectionScreen<HttpCatalogSearch, HttpCollectionStore, ConsoleReporter>;

/// Every adapter and service the commands need, wired once per process.
struct AppState {
  client: ApiClient,
  catalog: HttpCatalogSearch,
  ranks: RankStore<HttpCollectionStore>,
  favorites: FavoritesService<HttpFavoritesStore>,
  logs: ListenLogService<HttpListenLogStore>,
  screen: ScreenConfig,
  verbose: bool,
}

impl AppState {
  fn wire(remote: RemoteConfig, screen: ScreenConfig, verbose: bool) -> anyhow::Result<Self> {
    // --- Dependency Injection Phase ---

    // 1. HTTP client shared by every adapter (base URL, token, timeout).
    let client = ApiClient::new(remote).context("building HTTP client")?;

    // 2. Port adapters
    let catalog = HttpCatalogSearch::new(client.clone());
    let collections = HttpCollectionStore::new(client.clone());

    // 3. Services
    let ranks = RankStore::new(collections);
    let favorites = FavoritesService::new(HttpFavoritesStore::new(client.clone()));
    let logs = ListenLogService::new(HttpListenLogStore::new(client.clone()));

    Ok(Self { client, catalog, ranks, favorites, logs, screen, verbose })
  }

  /// A fresh façade over `collection`; each one owns its own rank store and reporter.
  fn screen_for(&self, collection: &str) -> ConcreteScreen {
    CollectionScreen::new(
      CollectionId::new(collection),
      self.catalog.clone(),
      RankStore::new(HttpCollectionStore::new(self.client.clone())),
      ConsoleReporter::new(self.verbose),
    )
    .with_sync_failure_policy(self.screen.sync_failure)
  }

  async fn mounted(&self, collection: &str) -> anyhow::Result<ConcreteScreen> {
    let screen = self.screen_for(collection);
    screen.mount().await.with_context(|| format!("loading collection {collection}"))?;
    Ok(screen)
  }

  async fn search(&self, query: &str) -> anyhow::Result<Vec<AlbumSummary>> {
    let raw = self.catalog.search(query).await.context("catalog search")?;
    Ok(normalize(&raw.tracks.items)?)
  }

  async fn pick_album(&self, query: &str, pick: Pick) -> anyhow::Result<AlbumSummary> {
    let mut albums = self.search(query).await?;
    if pick.pick >= albums.len() {
      bail!("no result #{} for {query:?} ({} albums found)", pick.pick, albums.len());
    }
    Ok(albums.swap_remove(pick.pick))
  }

  async fn dispatch(&self, command: Command) -> anyhow::Result<()> {
    match command {
      Command::Search { query } => {
        let albums = self.search(&query).await?;
        if albums.is_empty() {
          println!("No albums found for {query:?}.");
        } else {
          print!("{}", render_candidates(&albums));
        }
      }

      Command::Show { collection } => {
        let screen = self.mounted(&collection).await?;
        print_screen(&screen)?;
      }

      Command::CreateList { title, description } => {
        let created = self.ranks.create(&title, &description).await?;
        println!("Created {} [{}]", created.title, created.id);
      }

      Command::Add { collection, query, pick } => {
        let screen = self.mounted(&collection).await?;
        screen.search(&query).await?;
        screen.add_candidate(pick.pick).await?;
        print_screen(&screen)?;
      }

      Command::Move { collection, from, to } => {
        if from == 0 || to == 0 {
          bail!("ranks start at 1");
        }
        let screen = self.mounted(&collection).await?;
        screen.toggle_reordering().await?;
        screen.reorder(from - 1, to - 1).await?;
        print_screen(&screen)?;
      }

      Command::Remove { collection, entry } => {
        let screen = self.mounted(&collection).await?;
        screen.remove(&EntryId::new(entry)).await?;
        print_screen(&screen)?;
      }

      Command::Genres { collection } => {
        let screen = self.mounted(&collection).await?;
        print!("{}", render_genres(&screen.genres()?));
      }

      Command::Favorites { action } => self.favorites(action).await?,

      Command::Log(args) => self.log(args).await?,

      Command::ForgetLog { id } => {
        self.logs.delete(&LogId::new(id)).await?;
        println!("Deleted.");
      }

      Command::Recent => self.recent().await?,
    }

    Ok(())
  }

  async fn favorites(&self, action: FavoritesAction) -> anyhow::Result<()> {
    let favorites = match action {
      FavoritesAction::List => self.favorites.load().await?,
      FavoritesAction::Add { query, pick } => {
        let album = self.pick_album(&query, pick).await?;
        let current = self.favorites.load().await?;
        self.favorites.add(&current, album).await?
      }
      FavoritesAction::Remove { album_id } => self.favorites.remove(&CatalogAlbumId::new(album_id)).await?,
    };

    if favorites.is_empty() {
      println!("No favorites yet.");
    }
    for album in &favorites.albums {
      println!("{} - {} ({})  {}", album.artist_name, album.name, album.release_date, album.id);
    }
    Ok(())
  }

  async fn log(&self, args: LogArgs) -> anyhow::Result<()> {
    let album = self.pick_album(&args.query, args.pick).await?;
    let draft = ListenDraft {
      album,
      rating: args.rating,
      review: args.review,
      favorite_track: args.favorite_track,
      relisten: args.relisten,
      listen_date: args.date.unwrap_or_else(|| chrono::Local::now().date_naive()),
    };

    let log = self.logs.record(draft).await?;
    println!("Logged {} - {} {} [{}]", log.album.artist_name, log.album.name, log.rating, log.id);
    Ok(())
  }

  async fn recent(&self) -> anyhow::Result<()> {
    let (logs, favorites) = futures::try_join!(self.logs.recent(), self.favorites.load())?;

    println!("Recent listens:");
    for log in &logs {
      let again = if log.relisten { " (again)" } else { "" };
      println!("  {} {} - {} {}{again}", log.listen_date, log.album.artist_name, log.album.name, log.rating);
    }

    println!("Recent reviews:");
    for log in recent_reviews(&logs, RECENT_REVIEWS) {
      println!("  {}: {}", log.album.name, log.review.as_deref().unwrap_or_default());
    }

    println!("Favorites:");
    for album in &favorites.albums {
      println!("  {} - {}", album.artist_name, album.name);
    }
    Ok(())
  }
}

fn print_screen(screen: &ConcreteScreen) -> anyhow::Result<()> {
  let snapshot = screen.snapshot()?;
  let collection = snapshot.collection.context("collection not loaded")?;
  print!("{}", render_collection(&collection, &genres::distribution(&collection.entries)));
  Ok(())
}

pub async fn run() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let screen = ScreenConfig::load().context("loading [screen] config")?;
  logging::init(&screen.log_filter)?;

  let mut remote = RemoteConfig::load().context("loading [remote] config")?;
  cli.apply_overrides(&mut remote);
  tracing::debug!(base_url = %remote.base_url, "remote configured");

  let app = AppState::wire(remote, screen, cli.verbose)?;
  app.dispatch(cli.command).await
}
