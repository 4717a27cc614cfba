//! CLI argument definitions for the Kisan application.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use kisan_core::config::resolve_config_path;
use kisan_core::types::{Language, ListingKind};

/// Kisan, a farmer's assistant: marketplace, community board and advice rendering.
#[derive(Parser, Debug)]
#[command(name = "kisan", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the SQLite database.
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Reply language code (en, hi, pa, mr, te, ta, kn).
    #[arg(long = "lang", global = true)]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Marketplace listings.
    #[command(subcommand)]
    Listings(ListingsCommand),
    /// Community posts.
    #[command(subcommand)]
    Posts(PostsCommand),
    /// Create an account and sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Sign in to an existing account.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Check that a password reset can be sent.
    ResetPassword {
        #[arg(long)]
        email: String,
    },
    /// Render a model reply from a file, or stdin when no file is given.
    Render {
        file: Option<PathBuf>,
        /// Print the parsed reply as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListingsCommand {
    /// List listings, most recent first.
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        #[arg(long)]
        crop: Option<String>,
    },
    /// Publish a listing.
    Add {
        #[arg(long, value_enum, default_value_t = KindArg::Sell)]
        kind: KindArg,
        #[arg(long, default_value = "")]
        crop: String,
        #[arg(long, default_value = "")]
        quantity: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PostsCommand {
    /// List posts, most recent first.
    List,
    /// Publish a post.
    Add {
        content: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Buy,
    Sell,
    Rent,
}

impl From<KindArg> for ListingKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Buy => ListingKind::Buy,
            KindArg::Sell => ListingKind::Sell,
            KindArg::Rent => ListingKind::Rent,
        }
    }
}

impl CliArgs {
    /// Priority: --config flag > KISAN_CONFIG env var > ~/.kisan/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        resolve_config_path(self.config.as_deref())
    }

    /// Priority: --lang flag > config file value.
    pub fn resolve_language(&self, config_language: &str) -> Language {
        Language::from_code(self.language.as_deref().unwrap_or(config_language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_add() {
        let args = CliArgs::parse_from([
            "kisan", "listings", "add", "--kind", "rent", "--crop", "Rotavator", "--price",
            "₹500/hr", "--location", "Pune",
        ]);
        match args.command {
            Command::Listings(ListingsCommand::Add { kind, crop, .. }) => {
                assert_eq!(kind, KindArg::Rent);
                assert_eq!(crop, "Rotavator");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["kisan", "whoami", "--lang", "hi", "-d", "/tmp/k"]);
        assert_eq!(args.resolve_language("en"), Language::Hi);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/k")));
    }

    #[test]
    fn test_language_falls_back_to_config() {
        let args = CliArgs::parse_from(["kisan", "logout"]);
        assert_eq!(args.resolve_language("ta"), Language::Ta);
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let args = CliArgs::parse_from(["kisan", "-c", "/etc/kisan.toml", "whoami"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/etc/kisan.toml"));
    }

    #[test]
    fn test_post_tags_repeat() {
        let args = CliArgs::parse_from([
            "kisan", "posts", "add", "Aphids on mustard", "--tag", "Mustard", "--tag", "Pests",
        ]);
        match args.command {
            Command::Posts(PostsCommand::Add { tags, .. }) => {
                assert_eq!(tags, vec!["Mustard", "Pests"])
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
