//! Feed wire-form proximity reports from stdin through the pipeline.
//!
//! Reads one `"<CubeId>:<TagId>"` report per line and prints each
//! accepted announcement as one JSON line. Useful for replaying a
//! captured sensor feed against the resolver without any transport.
//!
//! ```text
//! cubefeed <cubes-file> <tags-file>
//! ```

use lexicube_chain::{ChainResolver, GuessDebouncer, ResolverConfig, DEFAULT_DEBOUNCE_WINDOW};
use lexicube_link::{parse_report, Announcement, WordPipeline};
use lexicube_registry::Registry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(cubes_path), Some(tags_path)) = (args.next(), args.next()) else {
        eprintln!("usage: cubefeed <cubes-file> <tags-file>");
        std::process::exit(2);
    };

    let config = ResolverConfig::default();
    let registry = Registry::from_files(config.max_slots, &cubes_path, &tags_path)?;
    let resolver = ChainResolver::new(registry, config);
    let pipeline = WordPipeline::new(resolver, GuessDebouncer::new(DEFAULT_DEBOUNCE_WINDOW));

    let (event_tx, event_rx) = mpsc::channel(64);
    let (announce_tx, mut announce_rx) = mpsc::channel::<Announcement>(16);

    let worker = tokio::spawn(pipeline.run(event_rx, announce_tx));
    let printer = tokio::spawn(async move {
        while let Some(announcement) = announce_rx.recv().await {
            match serde_json::to_string(&announcement) {
                Ok(json) => println!("{json}"),
                Err(err) => warn!(%err, "failed to encode announcement"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_report(line) {
            Ok(event) => {
                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, "skipping report"),
        }
    }

    drop(event_tx);
    worker.await?;
    printer.await?;
    Ok(())
}
