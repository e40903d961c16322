//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, ClientConfig};
use crate::directory::{User, UserDirectory};
use crate::error::Result;
use crate::stream::{Outcome, RecordStream};
use crate::types::OutputFormat;
use std::io::Write;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Users {
                page_size,
                filter,
                max_pages,
                format,
            } => {
                self.users(*page_size, filter.as_deref(), *max_pages, *format)
                    .await
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load the configuration file
    fn load_config(&self) -> Result<ClientConfig> {
        debug!(path = %self.cli.config.display(), "Loading configuration");
        load_config(&self.cli.config)
    }

    /// Stream users to stdout
    async fn users(
        &self,
        page_size: Option<u32>,
        filter: Option<&str>,
        max_pages: Option<u32>,
        format: OutputFormat,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(page_size) = page_size {
            config.listing.page_size = page_size;
        }
        if let Some(filter) = filter {
            config.listing.filter = Some(filter.to_string());
        }
        if max_pages.is_some() {
            config.listing.max_pages = max_pages;
        }
        config.validate()?;

        let directory = UserDirectory::from_config(&config)?;
        let token = CancellationToken::new();
        let interrupt = cancel_on_ctrl_c(token.clone());

        let stream = directory.list_users(&token);
        let result = consume(stream, &mut std::io::stdout(), format).await;
        interrupt.abort();

        let outcome = result?;
        eprintln!("Listing {outcome}");
        outcome.into_result().map(|_| ())
    }

    /// Validate the configuration file
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;

        println!(
            "Configuration '{}' is valid: {}{} (page size {}, buffer {})",
            self.cli.config.display(),
            config.base_url.trim_end_matches('/'),
            config.listing.path,
            config.listing.page_size,
            config.listing.buffer
        );
        Ok(())
    }
}

/// Print every user from `stream` to `out`, then report how the listing ended
///
/// A write failure drops the stream, which stops the producer.
pub async fn consume<W: Write>(
    mut stream: RecordStream<User>,
    out: &mut W,
    format: OutputFormat,
) -> Result<Outcome> {
    while let Some(user) = stream.recv().await {
        match format {
            OutputFormat::Text => writeln!(out, "RECV | User: {}", user.label())?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&user)?)?,
        }
    }
    out.flush()?;

    Ok(stream.finish().await)
}

/// Cancel `token` on the first Ctrl-C
fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling listing");
            token.cancel();
        }
    })
}
