use async_trait::async_trait;
use spinlog_core::domain::{AlbumSummary, Collection};
use spinlog_core::genres::GenreBucket;
use spinlog_core::ports::ViewReporter;
use spinlog_core::services::ScreenState;
use spinlog_core::CoreError;
use tracing::debug;

/// `ViewReporter` que redibuja en la terminal.
///
/// Con `verbose` imprime cada cambio de colección y de candidatos; los errores van siempre a stderr.
#[derive(Clone, Default)]
pub struct ConsoleReporter {
  verbose: bool,
}

impl ConsoleReporter {
  pub fn new(verbose: bool) -> Self {
    Self { verbose }
  }
}

#[async_trait]
impl ViewReporter for ConsoleReporter {
  async fn state_changed(&self, state: &ScreenState) {
    debug!(?state, "screen state");
  }

  async fn collection_changed(&self, collection: &Collection, genres: &[GenreBucket]) {
    if self.verbose {
      print!("{}", render_collection(collection, genres));
    }
  }

  async fn candidates_changed(&self, candidates: &[AlbumSummary]) {
    if self.verbose && !candidates.is_empty() {
      print!("{}", render_candidates(candidates));
    }
  }

  async fn error(&self, error: &CoreError) {
    eprintln!("error: {error}");
  }
}

pub fn render_collection(collection: &Collection, genres: &[GenreBucket]) -> String {
  let mut out = format!("{} [{}]\n", collection.title, collection.id);
  if !collection.description.is_empty() {
    out.push_str(&format!("  {}\n", collection.description));
  }
  for entry in &collection.entries {
    let album = &entry.album;
    out.push_str(&format!(
      "{:>3}. {} - {} ({})  #{}\n",
      entry.rank, album.artist_name, album.name, album.release_date, entry.entry_id
    ));
  }
  out.push_str(&render_genres(genres));
  out
}

pub fn render_genres(genres: &[GenreBucket]) -> String {
  let parts: Vec<String> = genres.iter().map(|g| format!("{} ({})", g.genre, g.count)).collect();
  format!("genres: {}\n", parts.join(", "))
}

pub fn render_candidates(candidates: &[AlbumSummary]) -> String {
  candidates
    .iter()
    .enumerate()
    .map(|(i, a)| format!("[{i}] {} - {} ({})  {}\n", a.artist_name, a.name, a.release_date, a.id))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use spinlog_core::domain::{CatalogAlbumId, CollectionEntry, CollectionId, EntryId};

  fn album(id: &str, name: &str) -> AlbumSummary {
    AlbumSummary {
      id: CatalogAlbumId::new(id),
      name: name.into(),
      artist_name: "Portishead".into(),
      image_url: None,
      release_date: "1994-08-22".into(),
      external_url: None,
      genres: vec!["Trip Hop".into()],
    }
  }

  #[test]
  fn collection_lists_entries_by_rank_with_genres() {
    let collection = Collection {
      id: CollectionId::new("7"),
      title: "Bristol".into(),
      description: String::new(),
      entries: vec![CollectionEntry { entry_id: EntryId::new("e1"), album: album("d", "Dummy"), rank: 1 }],
    };
    let genres = vec![GenreBucket { genre: "Trip Hop".into(), count: 1 }];

    let out = render_collection(&collection, &genres);

    assert_eq!(out, "Bristol [7]\n  1. Portishead - Dummy (1994-08-22)  #e1\ngenres: Trip Hop (1)\n");
  }

  #[test]
  fn candidates_are_indexed_from_zero() {
    let out = render_candidates(&[album("d", "Dummy"), album("p", "Portishead")]);
    assert!(out.starts_with("[0] Portishead - Dummy"));
    assert!(out.contains("\n[1] Portishead - Portishead"));
  }
}
