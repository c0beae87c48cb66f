//! EWS SOAP method tool.
//!
//! Run with: `ews-soap envelope FindFolder --traversal Shallow`
//! or: `ews-soap decode FindFolder response.xml`
//!
//! Prints request envelopes and decodes captured responses without talking
//! to a server.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ews_soap::config::{EwsConfig, MethodOptions, SOAP_RESPONSE_CONTENT_TYPE};
use ews_soap::methods::MethodKind;
use ews_soap::transport::ReplayTransport;
use ews_soap::types::{BaseShape, DistinguishedFolderId, Traversal};
use ews_soap::EwsClient;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Build and decode Exchange Web Services SOAP requests.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long, default_value = "ews.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the request envelope of a method
    Envelope {
        #[command(flatten)]
        method: MethodArgs,
    },
    /// Decode a captured response body and print the outcome as JSON
    Decode {
        #[command(flatten)]
        method: MethodArgs,

        /// File holding the response body
        response: PathBuf,

        /// Content-Type the response was served with
        #[arg(long, default_value = SOAP_RESPONSE_CONTENT_TYPE)]
        content_type: String,
    },
}

#[derive(clap::Args, Debug)]
struct MethodArgs {
    /// Method name: FindFolder, GetFolder or CreateFolder
    method: MethodKind,

    /// Base shape (IdOnly, Default, AllProperties)
    #[arg(long)]
    shape: Option<BaseShape>,

    /// Traversal (Shallow, Deep)
    #[arg(long)]
    traversal: Option<Traversal>,

    /// Distinguished folder (msgfolderroot, inbox, publicfoldersroot)
    #[arg(long)]
    folder: Option<DistinguishedFolderId>,

    /// Display name for CreateFolder
    #[arg(long)]
    name: Option<String>,
}

impl MethodArgs {
    fn options(&self, defaults: MethodOptions) -> MethodOptions {
        MethodOptions {
            base_shape: self.shape.or(defaults.base_shape),
            traversal: self.traversal.or(defaults.traversal),
            folder: self.folder.unwrap_or(defaults.folder),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = args.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Load configuration
    let config: EwsConfig = if args.config.exists() {
        let content =
            std::fs::read_to_string(&args.config).context("Failed to read config file")?;
        serde_yaml::from_str(&content).context("Failed to parse config file")?
    } else {
        info!("Config file {} not found, using defaults", args.config.display());
        EwsConfig::default()
    };

    match args.command {
        Command::Envelope { method } => {
            let options = method.options(config.defaults);
            let method = method.method.build(options, method.name.as_deref())?;
            let envelope = ews_soap::generate_envelope(method.as_ref())?;

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&envelope)?;
            writeln!(stdout)?;
        }
        Command::Decode {
            method,
            response,
            content_type,
        } => {
            let options = method.options(config.defaults);
            let method = method.method.build(options, method.name.as_deref())?;
            let body = std::fs::read(&response)
                .with_context(|| format!("Failed to read {}", response.display()))?;

            let transport = ReplayTransport::new(Some(content_type.as_str()), body);
            let client = EwsClient::new(config.settings, transport);
            let outcome = client.execute(method.as_ref())?;

            info!(
                items = outcome.items.len(),
                success = outcome.is_success(),
                "Response decoded"
            );
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
