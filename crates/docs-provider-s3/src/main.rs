use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use docs_provider_core::{
    DocumentExportErrorEvent, DocumentExportedEvent, ExportMessage, ExportObserver, MessageLevel,
    ObserverDecision,
};
use docs_provider_s3::config::{Command, Config};
use docs_provider_s3::{DirectoryCompletion, S3Connector, S3Provider};
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Mirrors export events into the log.
struct LogObserver;

impl ExportObserver for LogObserver {
    fn on_document_exported(
        &self,
        event: &DocumentExportedEvent,
    ) -> ObserverDecision<DocumentExportedEvent> {
        info!(id = %event.id, class = event.document.document_class(), "Document exported");
        ObserverDecision::Continue
    }

    fn on_document_export_error(&self, event: DocumentExportErrorEvent) {
        error!(id = %event.id, error = %event.error, "Document export error");
    }

    fn on_document_export_message(&self, message: ExportMessage) {
        match message.level {
            MessageLevel::Debug => debug!("{}", message.message),
            MessageLevel::Info => info!("{}", message.message),
            MessageLevel::Warning => warn!("{}", message.message),
            MessageLevel::Error => error!("{}", message.message),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    // Dropping the command future cancels any in-flight S3 call.
    tokio::select! {
        result = run(config) => result,
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, aborting");
            Ok(())
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let source = config.content_source()?;
    let connector = Arc::new(S3Connector::new(config.operation_timeout()));
    let mut provider = S3Provider::with_connector(connector);

    if let Command::Export { out, .. } = &config.command {
        provider = provider.with_completion(Arc::new(DirectoryCompletion::new(out.clone())));
    }
    provider.subscribe(Arc::new(LogObserver));

    info!("Starting docs-provider-s3");
    provider.connect(&source).await?;

    match config.command {
        Command::Probe => {
            info!(provider = %provider.name(), state = %provider.state(), "Repository available");
        }
        Command::List { json } => {
            let keys = provider.list_object_keys().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&keys)?);
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
        Command::Export { keys, out } => export(&provider, &keys, &out).await?,
    }

    provider.disconnect();
    Ok(())
}

async fn export(provider: &S3Provider, keys: &[String], out: &Path) -> anyhow::Result<()> {
    let mut rejected = 0usize;
    for key in keys {
        if !provider.export_document(key).await? {
            warn!(key = %key, "Export was not accepted");
            rejected += 1;
        }
    }

    info!(
        exported = keys.len() - rejected,
        rejected,
        out = %out.display(),
        "Export finished"
    );
    if rejected > 0 {
        anyhow::bail!("{} of {} exports were not accepted", rejected, keys.len());
    }
    Ok(())
}
