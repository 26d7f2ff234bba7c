//! The single-worker pipeline from proximity reports to announcements.
//!
//! Every report must see the edge update, cycle check, chain
//! extraction, and disjointness check as one atomic unit, and the
//! debouncer must be updated with the resolution it gates. The
//! pipeline gets both for free by owning the resolver and debouncer
//! behind `&mut self` and consuming reports from one channel on one
//! task: each report runs to completion before the next is read.

use std::time::Instant;

use lexicube_chain::{ChainResolver, GuessDebouncer, Word};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::display::{border_commands, CubeCommand};
use crate::wire::ProximityEvent;

/// An accepted guess: the candidate words plus the border commands
/// that annotate the whole rack for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Announcement {
    /// Candidate words, one per disjoint chain, for the dictionary.
    pub words: Vec<Word>,
    /// Display commands for every rack slot.
    pub commands: Vec<CubeCommand>,
}

/// Owns the resolver and debouncer for one game round.
#[derive(Debug)]
pub struct WordPipeline {
    resolver: ChainResolver,
    debouncer: GuessDebouncer,
}

impl WordPipeline {
    /// Create a pipeline over a built resolver.
    pub fn new(resolver: ChainResolver, debouncer: GuessDebouncer) -> Self {
        Self {
            resolver,
            debouncer,
        }
    }

    /// The resolver this pipeline drives.
    pub fn resolver(&self) -> &ChainResolver {
        &self.resolver
    }

    /// Handle one report at `now`.
    ///
    /// Returns the announcement when the debouncer accepts the
    /// resolution, `None` when it suppresses a repeat.
    pub fn handle(&mut self, event: &ProximityEvent, now: Instant) -> Option<Announcement> {
        let words = self.resolver.process_proximity(&event.sender, event.tag.as_ref());
        if !self.debouncer.should_announce(&words, now) {
            debug!(sender = %event.sender, "repeat guess suppressed");
            return None;
        }
        let commands = border_commands(self.resolver.registry(), &words);
        Some(Announcement { words, commands })
    }

    /// Consume reports until the inbound channel closes.
    ///
    /// This task is the only reader and the only writer of the
    /// adjacency graph, registry, and debounce state.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<ProximityEvent>,
        out: mpsc::Sender<Announcement>,
    ) {
        while let Some(event) = events.recv().await {
            if let Some(announcement) = self.handle(&event, Instant::now()) {
                info!(words = ?announcement.words, "announcing guess");
                if out.send(announcement).await.is_err() {
                    debug!("announcement channel closed, stopping pipeline");
                    break;
                }
            }
        }
        debug!("proximity feed closed, pipeline finished");
    }
}
