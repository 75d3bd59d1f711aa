//! # `nexus` Command Line
//!
//! Drives the storefront from a terminal. Every subcommand prints its result
//! as pretty JSON on stdout; logs go to stderr.
//!
//! ## Examples
//! ```text
//! nexus books --search dune --sort price
//! nexus book 4
//! nexus login reader@example.com secret
//! nexus cart add 4
//! nexus cart set 4 3
//! nexus favorite 4
//! nexus --ephemeral whoami
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (env, then `--db`)
//! 3. Open the snapshot database and rehydrate state
//! 4. Run one command and print its response

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use nexus_storefront::auth::RegistrationForm;
use nexus_storefront::commands::{cart, catalog, config, favorites, session};
use nexus_storefront::state::StorefrontConfig;
use nexus_storefront::{init_tracing, Storefront};

#[derive(Parser, Debug)]
#[command(name = "nexus", version, about = "AudioBook Nexus storefront")]
struct Cli {
    /// Snapshot database file (overrides NEXUS_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Keep all state in memory; nothing is read or saved
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the catalog
    Books {
        #[arg(long)]
        search: Option<String>,
        /// Genre label, or "All"
        #[arg(long)]
        genre: Option<String>,
        /// title | author | price | rating | duration | newest
        #[arg(long)]
        sort: Option<String>,
        /// Cumulative page (1 = first page_size books)
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show one book with related titles
    Book { id: String },
    /// Featured books
    Featured,
    /// Popular books
    Popular,
    /// Genre filter values
    Genres,
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Sign in with a Google account
    LoginGoogle {
        #[arg(long, default_value = "user@gmail.com")]
        email: String,
        #[arg(long, default_value = "John Doe")]
        name: String,
    },
    /// Create an account
    Register {
        email: String,
        password: String,
        #[arg(long)]
        confirm: Option<String>,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },
    /// Sign out
    Logout,
    /// Show the current session
    Whoami,
    /// Toggle a book's favorite flag
    Favorite { id: String },
    /// List favorite books
    Favorites,
    /// Show the effective configuration
    Config,
}

#[derive(Subcommand, Debug)]
enum CartAction {
    /// Show the cart (default)
    Show,
    /// Add one copy of a book
    Add { id: String },
    /// Set a line's quantity (0 removes it)
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(db = ?cli.db, ephemeral = cli.ephemeral, "Parsed arguments");

    let settings = StorefrontConfig::from_env().with_database_path(cli.db.clone());
    let app = if cli.ephemeral {
        Storefront::in_memory(settings).await
    } else {
        Storefront::open(settings)
            .await
            .context("failed to open the storefront database")?
    };

    run(&app, cli.command).await
}

async fn run(app: &Storefront, command: Command) -> Result<()> {
    let auth = app.authenticator.as_ref();

    match command {
        Command::Books {
            search,
            genre,
            sort,
            page,
            page_size,
        } => {
            let request = catalog::BrowseRequest {
                search,
                genre,
                sort,
                page,
                page_size,
            };
            print_json(&catalog::browse_books(&app.catalog, &app.browse, request)?)
        }
        Command::Book { id } => {
            print_json(&catalog::get_book_detail(&app.catalog, &app.favorites, &id)?)
        }
        Command::Featured => print_json(&catalog::featured_books(&app.catalog)),
        Command::Popular => print_json(&catalog::popular_books(&app.catalog)),
        Command::Genres => print_json(&catalog::list_genres(&app.catalog)),

        Command::Cart { action } => {
            let response = match action.unwrap_or(CartAction::Show) {
                CartAction::Show => cart::get_cart(&app.cart, &app.config),
                CartAction::Add { id } => {
                    cart::add_to_cart(
                        &app.store,
                        &app.catalog,
                        &app.session,
                        &app.cart,
                        &app.config,
                        &id,
                    )
                    .await?
                }
                CartAction::Set { id, quantity } => {
                    cart::update_cart_item(&app.store, &app.cart, &app.config, &id, quantity)
                        .await?
                }
                CartAction::Remove { id } => {
                    cart::remove_from_cart(&app.store, &app.cart, &app.config, &id).await?
                }
                CartAction::Clear => cart::clear_cart(&app.store, &app.cart, &app.config).await?,
            };
            print_json(&response)
        }

        Command::Login { email, password } => {
            let response = session::login(&app.store, auth, &app.session, &email, &password).await?;
            print_json(&response)
        }
        Command::LoginGoogle { email, name } => {
            let response =
                session::login_with_google(&app.store, auth, &app.session, &email, &name).await?;
            print_json(&response)
        }
        Command::Register {
            email,
            password,
            confirm,
            first_name,
            last_name,
            accept_terms,
        } => {
            let form = RegistrationForm {
                email,
                confirm_password: confirm.unwrap_or_else(|| password.clone()),
                password,
                name: format!("{} {}", first_name, last_name),
                accept_terms,
            };
            let response = session::register(&app.store, auth, &app.session, form).await?;
            print_json(&response)
        }
        Command::Logout => {
            let response = session::logout(
                &app.store,
                &app.session,
                &app.cart,
                &app.favorites,
                &app.config,
            )
            .await?;
            print_json(&response)
        }
        Command::Whoami => print_json(&session::whoami(&app.session)),

        Command::Favorite { id } => {
            let response = favorites::toggle_favorite(
                &app.store,
                &app.catalog,
                &app.session,
                &app.favorites,
                &id,
            )
            .await?;
            print_json(&response)
        }
        Command::Favorites => print_json(&favorites::list_favorites(&app.catalog, &app.favorites)),

        Command::Config => print_json(&config::get_config(&app.config)),
    }
}
