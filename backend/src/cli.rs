use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use spinlog_remote::RemoteConfig;

#[derive(Parser, Debug)]
#[command(name = "spinlog", version, about = "Ranked album collections and listening log")]
pub struct Cli {
  /// Overrides `[remote].base_url`.
  #[arg(long, global = true)]
  pub base_url: Option<String>,

  /// Access token sent as `Authorization: Bearer`.
  #[arg(long, global = true, env = "SPINLOG_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// Print every collection and candidate update, not only the final result.
  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Command,
}

impl Cli {
  pub fn apply_overrides(&self, remote: &mut RemoteConfig) {
    if let Some(url) = &self.base_url {
      remote.base_url = url.clone();
    }
    if let Some(token) = &self.token {
      remote.access_token = Some(token.clone());
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Search the catalog and list unique albums.
  Search { query: String },

  /// Show a collection in rank order with its top genres.
  Show { collection: String },

  /// Create an empty collection.
  CreateList {
    title: String,
    #[arg(short, long, default_value = "")]
    description: String,
  },

  /// Search the catalog and add one of the results to a collection.
  Add {
    collection: String,
    query: String,
    #[command(flatten)]
    pick: Pick,
  },

  /// Move the entry at rank FROM to rank TO (1-based).
  Move { collection: String, from: usize, to: usize },

  /// Remove an entry from a collection.
  Remove { collection: String, entry: String },

  /// Genre distribution of a collection.
  Genres { collection: String },

  /// Manage the four favorite albums.
  Favorites {
    #[command(subcommand)]
    action: FavoritesAction,
  },

  /// Record a listen of an album found by QUERY.
  Log(LogArgs),

  /// Delete a listen log.
  ForgetLog { id: String },

  /// Recent listens, recent reviews and favorites.
  Recent,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
  List,
  Add {
    query: String,
    #[command(flatten)]
    pick: Pick,
  },
  Remove { album_id: String },
}

/// Which search result to use.
#[derive(Args, Debug, Clone, Copy)]
pub struct Pick {
  /// Index of the search result (as printed by `search`).
  #[arg(long, default_value_t = 0)]
  pub pick: usize,
}

#[derive(Args, Debug)]
pub struct LogArgs {
  pub query: String,

  #[command(flatten)]
  pub pick: Pick,

  /// Stars, 1 to 5.
  #[arg(short, long)]
  pub rating: u8,

  #[arg(long)]
  pub review: Option<String>,

  #[arg(long)]
  pub favorite_track: Option<String>,

  #[arg(long)]
  pub relisten: bool,

  /// Listen date (YYYY-MM-DD); today when omitted.
  #[arg(long)]
  pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn parses_move_and_overrides() {
    let cli = Cli::parse_from(["spinlog", "--base-url", "http://api", "--token", "abc", "move", "7", "3", "1"]);

    assert!(matches!(cli.command, Command::Move { ref collection, from: 3, to: 1 } if collection == "7"));

    let mut remote = RemoteConfig::default();
    cli.apply_overrides(&mut remote);
    assert_eq!(remote.base_url, "http://api");
    assert_eq!(remote.access_token.as_deref(), Some("abc"));
  }

  #[test]
  fn parses_log_with_date() {
    let cli = Cli::parse_from(["spinlog", "log", "dummy", "--rating", "4", "--pick", "2", "--date", "2024-02-29"]);

    let Command::Log(args) = cli.command else {
      panic!("expected log command");
    };
    assert_eq!(args.rating, 4);
    assert_eq!(args.pick.pick, 2);
    assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 2, 29));
    assert!(!args.relisten);
  }
}
