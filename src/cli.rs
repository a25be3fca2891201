//! Command-line interface for shelfwise
//!
//! This module handles parsing of CLI arguments using clap and runs the
//! selected command against the library API. Command output is returned as
//! text so the binary decides where it goes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::client::{
    LibraryClient, LibraryError, StaticTokenProvider, TokenProvider, DEFAULT_PAGE_NUMBER,
    DEFAULT_PAGE_SIZE,
};
use crate::config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::data::{decode_case_insensitive, Book};

/// Error types for running CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// A network command was run without an API root
    #[error("No API base URL given. Use --base-url or set SHELFWISE_BASE_URL")]
    MissingBaseUrl,

    /// The book file could not be read
    #[error("Could not read book file '{}': {source}", .path.display())]
    ReadBook {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The book file is not a valid book
    #[error("Book file is not a valid book: {0}")]
    ParseBook(serde_json::Error),

    /// The API call failed
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// The result could not be rendered as JSON
    #[error("Failed to render output: {0}")]
    Output(serde_json::Error),
}

/// shelfwise - Browse a library catalog and its orders
#[derive(Parser, Debug)]
#[command(name = "shelfwise")]
#[command(about = "Browse a library catalog and its orders")]
#[command(version)]
pub struct Cli {
    /// API root, e.g. https://example.com/api
    #[arg(long, env = "SHELFWISE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer token; a token is acquired automatically when omitted
    #[arg(long, env = "SHELFWISE_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Commands supported by the CLI
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every book in the catalog
    Books,

    /// Add a book read from a JSON file
    AddBook {
        /// Path to a JSON file holding one book
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },

    /// Show one page of orders
    Orders {
        /// Orders per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Page to show, starting at 1
        #[arg(long, default_value_t = DEFAULT_PAGE_NUMBER)]
        page: usize,
    },

    /// Print a token from the token provider
    Token,
}

impl ClientConfig {
    /// Builds a client configuration from parsed CLI arguments
    ///
    /// # Returns
    /// * `Err(CliError::MissingBaseUrl)` if no base URL was given
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let base_url = cli.base_url.as_deref().ok_or(CliError::MissingBaseUrl)?;
        Ok(ClientConfig::new(base_url).with_timeout(Duration::from_secs(cli.timeout_secs)))
    }
}

/// Reads a book from a JSON file
pub fn read_book(path: &Path) -> Result<Book, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadBook {
        path: path.to_path_buf(),
        source,
    })?;
    decode_case_insensitive(&bytes).map_err(CliError::ParseBook)
}

/// Builds a client from the CLI flags and picks the token to send
async fn connect(
    cli: &Cli,
    provider: impl TokenProvider + 'static,
) -> Result<(LibraryClient, String), CliError> {
    let config = ClientConfig::from_cli(cli)?;
    let client = LibraryClient::from_config(&config)?.with_token_provider(provider);
    let token = match &cli.token {
        Some(token) => token.clone(),
        None => client.acquire_token().await,
    };
    Ok((client, token))
}

/// Runs the parsed command with the default token provider
pub async fn run(cli: &Cli) -> Result<String, CliError> {
    run_with(cli, StaticTokenProvider::default()).await
}

/// Runs the parsed command, acquiring tokens from `provider`
pub async fn run_with(
    cli: &Cli,
    provider: impl TokenProvider + 'static,
) -> Result<String, CliError> {
    let output = match &cli.command {
        Command::Token => {
            // Only the provider is consulted, so no base URL is required
            let client = LibraryClient::new(cli.base_url.clone().unwrap_or_default())
                .with_token_provider(provider);
            return Ok(client.acquire_token().await);
        }
        Command::Books => {
            let (client, token) = connect(cli, provider).await?;
            let books = client.list_books(&token).await?;
            serde_json::to_string_pretty(&books)
        }
        Command::AddBook { file } => {
            let book = read_book(file)?;
            let (client, token) = connect(cli, provider).await?;
            client.add_book(&book, &token).await?;
            return Ok(format!("Added book {}", book.id));
        }
        Command::Orders { page_size, page } => {
            let (client, token) = connect(cli, provider).await?;
            let orders = client.list_orders_paged(&token, *page_size, *page).await?;
            serde_json::to_string_pretty(&orders)
        }
    };

    output.map_err(CliError::Output)
}
