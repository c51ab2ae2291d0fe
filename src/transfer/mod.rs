#[cfg(test)]
mod fakes;
mod source;
mod target;

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{SourceCatalog, TargetCatalog, Track};
use crate::events::{EventSink, TransferEvent};
use crate::matching::{self, MatchResult};
use crate::pacing::Pacer;

pub use source::read_all_tracks;
pub use target::{BatchWriter, create_playlist};

#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Most tracks the target accepts in one append request
    pub batch_size: usize,
    pub search_delay: Duration,
    pub batch_delay: Duration,
    /// Match tracks without creating or writing anything on the target
    pub dry_run: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            search_delay: Duration::from_millis(200),
            batch_delay: Duration::from_secs(5),
            dry_run: false,
        }
    }
}

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("could not resolve the target account's region: {0:#}")]
    Region(anyhow::Error),
    #[error("could not create the target playlist: {0:#}")]
    CreatePlaylist(anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    FetchingTargetProfile,
    ReadingSourceTracks,
    CreatingTargetPlaylist,
    MatchingTracks,
    WritingTargetTracks,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSummary {
    pub name: String,
    pub transferred: usize,
    pub total: usize,
}

/// Working state of one playlist transfer
#[derive(Debug)]
struct TransferJob {
    source_playlist_id: String,
    name: String,
    region: String,
    target_playlist_id: Option<String>,
    matched_ids: Vec<String>,
    attempted: usize,
    total: usize,
}

impl TransferJob {
    fn summary(&self) -> TransferSummary {
        debug_assert!(self.matched_ids.len() <= self.total);
        TransferSummary {
            name: self.name.clone(),
            transferred: self.matched_ids.len(),
            total: self.total,
        }
    }
}

/// Copies one source playlist into a new target playlist.
///
/// Runs strictly sequentially: one request in flight at a time, with the
/// configured pauses between searches and between write batches.
pub struct Transfer<'a> {
    source: &'a dyn SourceCatalog,
    target: &'a dyn TargetCatalog,
    pacer: &'a dyn Pacer,
    events: EventSink,
    config: TransferConfig,
    state: TransferState,
}

impl<'a> Transfer<'a> {
    pub fn new(
        source: &'a dyn SourceCatalog,
        target: &'a dyn TargetCatalog,
        pacer: &'a dyn Pacer,
        events: EventSink,
        config: TransferConfig,
    ) -> Self {
        Self {
            source,
            target,
            pacer,
            events,
            config,
            state: TransferState::Idle,
        }
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    fn enter(&mut self, state: TransferState) {
        debug!(from = ?self.state, to = ?state, "transfer state");
        self.state = state;
    }

    fn fail(&mut self, err: TransferError) -> TransferError {
        self.enter(TransferState::Failed);
        self.events.emit(TransferEvent::negative(err.to_string()));
        err
    }

    pub async fn run(
        &mut self,
        playlist_id: &str,
        name: &str,
    ) -> Result<TransferSummary, TransferError> {
        self.enter(TransferState::FetchingTargetProfile);
        let region = self.target.region().await;
        let region = match region {
            Ok(region) => region,
            Err(err) => return Err(self.fail(TransferError::Region(err))),
        };
        self.events.emit(TransferEvent::positive(format!(
            "Fetched target user profile (region {region})",
        )));

        self.enter(TransferState::ReadingSourceTracks);
        let tracks = read_all_tracks(self.source, playlist_id).await;
        info!(playlist_id, count = tracks.len(), "read source tracks");
        self.events.emit(TransferEvent::positive(format!(
            "Fetched {} tracks for Playlist {name} ({playlist_id})",
            tracks.len(),
        )));

        let mut job = TransferJob {
            source_playlist_id: playlist_id.to_owned(),
            name: name.to_owned(),
            region,
            target_playlist_id: None,
            matched_ids: Vec::new(),
            attempted: 0,
            total: tracks.len(),
        };

        if !self.config.dry_run {
            self.enter(TransferState::CreatingTargetPlaylist);
            let created = create_playlist(self.target, &job.name, &job.region).await;
            match created {
                Ok(id) => job.target_playlist_id = Some(id),
                Err(err) => return Err(self.fail(TransferError::CreatePlaylist(err))),
            }
            self.events
                .emit(TransferEvent::positive("Made the playlist on the target service"));
        }

        self.enter(TransferState::MatchingTracks);
        for track in &tracks {
            self.match_track(&mut job, track).await;
            self.pacer.pause(self.config.search_delay).await;
        }

        if let Some(target_playlist_id) = &job.target_playlist_id {
            self.enter(TransferState::WritingTargetTracks);
            let writer = BatchWriter {
                target: self.target,
                pacer: self.pacer,
                events: &self.events,
                batch_size: self.config.batch_size,
                batch_delay: self.config.batch_delay,
            };
            let report = writer
                .add_tracks(target_playlist_id, &job.matched_ids, &job.region)
                .await;
            info!(
                source_playlist_id = %job.source_playlist_id,
                %target_playlist_id,
                batches = report.batches,
                failed_batches = report.failed_batches,
                "wrote matched tracks",
            );
        } else {
            self.events.emit(TransferEvent::positive(format!(
                "Dry run: matched {} of {} tracks, nothing was written",
                job.matched_ids.len(),
                job.total,
            )));
        }

        let summary = job.summary();
        self.events.emit(TransferEvent::positive(format!(
            "Done! Moved over {} out of {} tracks",
            summary.transferred, summary.total,
        )));
        self.enter(TransferState::Done);
        Ok(summary)
    }

    async fn match_track(&self, job: &mut TransferJob, track: &Track) {
        job.attempted += 1;
        let label = format!("{} ({})", track.name, track.artist);
        let query = format!(
            "{} {}",
            matching::clean_for_query(&track.name),
            matching::clean_for_query(&track.artist),
        );
        debug!(%query, attempted = job.attempted, total = job.total, "searching");

        let candidates = match self.target.search(&query, &job.region).await {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(track = %label, error = %format!("{err:#}"), "search failed");
                self.events.emit(
                    TransferEvent::negative(format!("Search failed for {label}: {err:#}"))
                        .with_track(&track.name),
                );
                return;
            }
        };

        if !candidates.is_empty() {
            self.events.emit(TransferEvent::positive(format!(
                "Found {} possible tracks for {label}",
                candidates.len(),
            )));
        }

        let result = matching::select(&candidates, &track.name, &track.artist);
        match &result {
            MatchResult::Exact { candidate, .. } => {
                self.events.emit(TransferEvent::positive(format!(
                    "Found track for {label} - [{} / {}]",
                    candidate.id, candidate.title,
                )));
            }
            MatchResult::Closest {
                candidate,
                normalized_title,
                score,
            } => {
                debug!(track = %label, score, "using closest match");
                self.events.emit(
                    TransferEvent::negative(format!(
                        "Could not find an exact match for {label}, using the closest match - [{} / {normalized_title}]",
                        candidate.id,
                    ))
                    .with_track(&track.name),
                );
            }
            MatchResult::NoMatch => {
                self.events.emit(
                    TransferEvent::negative(format!("Could not find a track for {label}"))
                        .with_track(&track.name),
                );
            }
        }

        if let Some(id) = result.track_id() {
            job.matched_ids.push(id.to_owned());
        }
    }
}
