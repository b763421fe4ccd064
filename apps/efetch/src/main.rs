//! efetch - fetch prebuilt Electron release archives for packaging
//!
//! This is the CLI application that drives the fetch through the ops crate
//! and writes the merged entry stream into an output directory.

mod cli;
mod events;
mod logging;
mod output;

use crate::cli::Cli;
use crate::events::EventHandler;
use clap::Parser;
use efetch_errors::{Result, UserFacingError};
use efetch_events::EventReceiver;
use efetch_net::Mirror;
use efetch_ops::{fetch, FetchContext};
use efetch_stream::EntryStream;
use futures::StreamExt;
use std::path::Path;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli).await {
        error!("{e}");
        eprintln!("Error: {}", e.user_message());
        if let Some(hint) = e.user_hint() {
            eprintln!("{hint}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    let request = cli.to_request()?;

    let (tx, mut rx) = efetch_events::channel();

    let mut ctx = FetchContext::new(tx)?;
    if let Some(base) = &cli.mirror {
        ctx = ctx.with_mirror(Mirror::with_release_base(base));
    }

    let mut handler = EventHandler::new(request.quiet);

    // Validation failures surface here, before anything was downloaded
    let entries = fetch(&ctx, &request)?;

    let written = match consume(entries, &cli.output, &mut rx, &mut handler).await {
        Ok(written) => written,
        Err(e) => {
            handler.clear();
            return Err(e);
        }
    };

    info!(written, output = %cli.output.display(), "fetch finished");
    if !request.quiet {
        println!("Wrote {written} entries to {}", cli.output.display());
    }

    Ok(())
}

/// Drive the entry stream and the event channel together, writing entries
/// as they arrive and rendering progress in between.
async fn consume(
    mut entries: EntryStream,
    output_dir: &Path,
    rx: &mut EventReceiver,
    handler: &mut EventHandler,
) -> Result<u64> {
    let mut written = 0u64;

    loop {
        select! {
            item = entries.next() => match item {
                Some(Ok(entry)) => {
                    output::write_entry(output_dir, &entry).await?;
                    written += 1;
                }
                // First stream error ends the run; remaining progress
                // output is cleaned up by the caller
                Some(Err(e)) => return Err(e),
                None => break,
            },

            event = rx.recv() => {
                match event {
                    Some(event) => handler.handle_event(event),
                    None => { /* Channel closed: keep draining entries */ }
                }
            }
        }
    }

    // Drain any events that raced with stream completion
    while let Ok(event) = rx.try_recv() {
        handler.handle_event(event);
    }

    Ok(written)
}

/// Initialize tracing to stderr; `RUST_LOG` wins over the debug flag
fn init_tracing(debug: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(if debug { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
