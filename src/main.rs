//! Contactbook - a command-line client for the Contacts REST API.
//!
//! Authenticates against the service, persists the issued token pair,
//! and performs contact operations with the stored access token.

mod api;
mod app;
mod auth;
mod config;
mod models;
mod utils;
mod view;

use std::io;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::ApiClient;
use app::{App, ContactEdits};
use auth::TokenStore;
use config::Config;
use models::{NewContact, NewUser};

#[derive(Parser)]
#[command(name = "contactbook", about = "Client for the Contacts REST API", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the issued tokens
    Login {
        /// Username (email); defaults to the last one used
        username: Option<String>,
    },
    /// Register a new account
    Signup {
        username: String,
        email: String,
    },
    /// List all contacts
    List,
    /// Show one contact in detail
    Show { id: i64 },
    /// Create a contact and show the refreshed list
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<NaiveDate>,
        #[arg(long)]
        comments: Option<String>,
        #[arg(long)]
        favorite: bool,
    },
    /// Update fields of an existing contact
    Update {
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<NaiveDate>,
        #[arg(long)]
        comments: Option<String>,
        #[arg(long)]
        favorite: Option<bool>,
    },
    /// Delete a contact
    Remove { id: i64 },
    /// Search contacts by name or email
    Search { query: String },
    /// Show contacts with birthdays in the next days
    Birthdays {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    let mut cfg = Config::load()?;
    let store = TokenStore::new(cfg.token_dir()?);

    let mut out = io::stdout().lock();

    match cli.command {
        Command::Login { username } => {
            let username = username
                .or_else(|| cfg.last_username.clone())
                .ok_or_else(|| anyhow::anyhow!("No username given and none remembered"))?;
            let password = rpassword::prompt_password("Password: ")?;

            let client = ApiClient::new(cfg.api_base_url())?;
            let tokens = client.login(&username, &password).await?;
            store.save(&tokens)?;
            info!("Login succeeded, tokens stored");

            cfg.last_username = Some(username.clone());
            cfg.save()?;
            println!("Logged in as {}", username);
        }
        Command::Signup { username, email } => {
            let password = rpassword::prompt_password("Password: ")?;

            let client = ApiClient::new(cfg.api_base_url())?;
            let profile = client
                .signup(&NewUser {
                    username,
                    email,
                    password,
                })
                .await?;
            println!(
                "Account created for {} ({}). Confirm your email, then log in.",
                profile.username, profile.email
            );
        }
        Command::List => {
            App::connect(&cfg, &store)?.list(&mut out).await?;
        }
        Command::Show { id } => {
            App::connect(&cfg, &store)?.show(id, &mut out).await?;
        }
        Command::Add {
            first_name,
            last_name,
            email,
            phone,
            birthday,
            comments,
            favorite,
        } => {
            let contact = NewContact {
                first_name,
                last_name,
                email,
                phone,
                birthday,
                comments,
                favorite,
            };
            App::connect(&cfg, &store)?.add(&contact, &mut out).await?;
        }
        Command::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            birthday,
            comments,
            favorite,
        } => {
            let edits = ContactEdits {
                first_name,
                last_name,
                email,
                phone,
                birthday,
                comments,
                favorite,
            };
            App::connect(&cfg, &store)?.update(id, &edits, &mut out).await?;
        }
        Command::Remove { id } => {
            App::connect(&cfg, &store)?.remove(id, &mut out).await?;
        }
        Command::Search { query } => {
            App::connect(&cfg, &store)?.search(&query, &mut out).await?;
        }
        Command::Birthdays { days } => {
            App::connect(&cfg, &store)?.birthdays(days, &mut out).await?;
        }
    }

    Ok(())
}
