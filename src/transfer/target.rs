use std::time::Duration;

use anyhow::{Result, ensure};
use tracing::{info, warn};

use crate::catalog::TargetCatalog;
use crate::events::{EventSink, TransferEvent};
use crate::pacing::Pacer;

/// Outcome of appending tracks in batches
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub batches: usize,
    pub failed_batches: usize,
}

pub async fn create_playlist(
    target: &dyn TargetCatalog,
    name: &str,
    region: &str,
) -> Result<String> {
    let playlist_id = target.create_playlist(name, region).await?;
    ensure!(
        !playlist_id.is_empty(),
        "playlist creation returned no identifier",
    );
    info!(%playlist_id, "created target playlist");
    Ok(playlist_id)
}

/// Batched append with a fixed pause after every batch.
///
/// A failed batch is reported and skipped; it is not retried.
pub struct BatchWriter<'a> {
    pub target: &'a dyn TargetCatalog,
    pub pacer: &'a dyn Pacer,
    pub events: &'a EventSink,
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl BatchWriter<'_> {
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        region: &str,
    ) -> WriteReport {
        let mut report = WriteReport::default();
        if track_ids.is_empty() {
            return report;
        }

        self.events.emit(TransferEvent::positive(format!(
            "Adding {} tracks to playlist",
            track_ids.len(),
        )));

        for (index, batch) in track_ids.chunks(self.batch_size.max(1)).enumerate() {
            let number = index + 1;
            report.batches += 1;
            self.events
                .emit(TransferEvent::positive(format!("Doing batch {number}")));

            match self.target.append_tracks(playlist_id, batch, region).await {
                Ok(()) => {
                    self.events
                        .emit(TransferEvent::positive(format!("Done batch {number}")));
                }
                Err(err) => {
                    warn!(playlist_id, batch = number, error = %format!("{err:#}"), "batch append failed");
                    report.failed_batches += 1;
                    self.events
                        .emit(TransferEvent::negative(format!("Failed to do batch {number}")));
                }
            }

            self.pacer.pause(self.batch_delay).await;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Recorder;
    use crate::transfer::fakes::{FakeTarget, RecordingPacer};

    fn ids(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("t{i}")).collect()
    }

    #[tokio::test]
    async fn test_add_tracks_batches_of_twenty() {
        let target = FakeTarget::new();
        let pacer = RecordingPacer::default();
        let events = EventSink::new();
        let writer = BatchWriter {
            target: &target,
            pacer: &pacer,
            events: &events,
            batch_size: 20,
            batch_delay: Duration::from_secs(5),
        };

        let report = writer.add_tracks("pl", &ids(45), "US").await;

        let sizes: Vec<_> = target.appended().iter().map(Vec::len).collect();
        assert_eq!(sizes, [20, 20, 5]);
        assert_eq!(target.appended().concat(), ids(45));
        assert_eq!(pacer.pauses(), [Duration::from_secs(5); 3]);
        assert_eq!(
            report,
            WriteReport {
                batches: 3,
                failed_batches: 0,
            },
        );
    }

    #[tokio::test]
    async fn test_add_tracks_failed_batch_continues() {
        let target = FakeTarget::new().failing_batches([2]);
        let pacer = RecordingPacer::default();
        let events = EventSink::new();
        let recorder = Recorder::attach(&events);
        let writer = BatchWriter {
            target: &target,
            pacer: &pacer,
            events: &events,
            batch_size: 20,
            batch_delay: Duration::from_secs(5),
        };

        let report = writer.add_tracks("pl", &ids(50), "US").await;

        assert_eq!(report.batches, 3);
        assert_eq!(report.failed_batches, 1);
        assert_eq!(target.appended().len(), 3);
        assert_eq!(pacer.pauses().len(), 3);
        let negatives: Vec<_> = recorder.negatives().into_iter().map(|e| e.message).collect();
        assert_eq!(negatives, ["Failed to do batch 2"]);
    }

    #[tokio::test]
    async fn test_add_tracks_empty_is_noop() {
        let target = FakeTarget::new();
        let pacer = RecordingPacer::default();
        let events = EventSink::new();
        let recorder = Recorder::attach(&events);
        let writer = BatchWriter {
            target: &target,
            pacer: &pacer,
            events: &events,
            batch_size: 20,
            batch_delay: Duration::from_secs(5),
        };

        let report = writer.add_tracks("pl", &[], "US").await;

        assert_eq!(report, WriteReport::default());
        assert!(target.appended().is_empty());
        assert!(pacer.pauses().is_empty());
        assert!(recorder.events().is_empty());
    }

    #[tokio::test]
    async fn test_create_playlist_rejects_empty_id() {
        let target = FakeTarget::new().with_playlist_id("");
        let err = create_playlist(&target, "Mix", "US").await.unwrap_err();
        assert!(err.to_string().contains("no identifier"));
    }
}
