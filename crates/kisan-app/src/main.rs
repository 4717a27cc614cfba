//! Kisan application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize logging
//! 3. Open the SQLite key-value store and seed empty collections
//! 4. Dispatch the requested command

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use kisan_app::cli::{CliArgs, Command, ListingsCommand, PostsCommand};
use kisan_app::commands::{self, AppError, Commands, NewListing};
use kisan_core::config::KisanConfig;
use kisan_storage::{AuthService, KisanDb, SqliteStore};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_path = args.resolve_config_path();
    let mut config = KisanConfig::load_or_default(&config_path);
    if let Some(ref dir) = args.data_dir {
        config.general.data_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(ref level) = args.log_level {
        config.general.log_level = level.clone();
    }

    kisan_core::logging::init(&config.general.log_level);

    let language = args.resolve_language(&config.general.language);
    tracing::debug!(
        config = %config_path.display(),
        language = language.code(),
        "Kisan starting"
    );

    match run(args.command, &config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(AppError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {}", field, message);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &KisanConfig) -> commands::Result<String> {
    // Rendering needs no storage.
    if let Command::Render { file, json } = command {
        let text = match file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        return commands::render(&text, json);
    }

    let store = Arc::new(SqliteStore::open(&config.database_path())?);
    let db = if config.storage.seed_on_open {
        KisanDb::open(store)?
    } else {
        KisanDb::new(store)
    };
    let auth = AuthService::new(&db, &config.auth);
    let cmds = Commands::new(db, auth);

    match command {
        Command::Listings(ListingsCommand::List { kind, crop }) => {
            cmds.list_listings(kind.map(Into::into), crop.as_deref())
        }
        Command::Listings(ListingsCommand::Add {
            kind,
            crop,
            quantity,
            price,
            location,
            description,
        }) => {
            let listing = cmds.add_listing(NewListing {
                kind: kind.into(),
                crop,
                quantity,
                price,
                location,
                description,
            })?;
            Ok(format!("Listing #{} published.", listing.id))
        }
        Command::Posts(PostsCommand::List) => cmds.list_posts(),
        Command::Posts(PostsCommand::Add { content, tags }) => {
            let post = cmds.add_post(&content, tags)?;
            Ok(format!("Post #{} published.", post.id))
        }
        Command::Signup {
            name,
            email,
            password,
            location,
        } => {
            let user = cmds.signup(&name, &email, &password, &location).await?;
            Ok(format!("Welcome, {}!", user.name))
        }
        Command::Login { email, password } => {
            let user = cmds.login(&email, &password).await?;
            Ok(format!("Signed in as {}.", user.name))
        }
        Command::Logout => {
            cmds.logout()?;
            Ok("Signed out.".to_string())
        }
        Command::Whoami => cmds.whoami(),
        Command::ResetPassword { email } => cmds.reset_password(&email).await,
        Command::Render { .. } => Ok(String::new()),
    }
}
