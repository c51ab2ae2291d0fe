use tracing::{debug, warn};

use crate::catalog::{SourceCatalog, Track};

/// Read every available track of a playlist, in playlist order.
///
/// A failed page ends the listing early instead of failing the read. Items
/// without a track payload are skipped.
pub async fn read_all_tracks(source: &dyn SourceCatalog, playlist_id: &str) -> Vec<Track> {
    let mut tracks = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = match source.playlist_page(playlist_id, cursor.as_deref()).await {
            Ok(page) => page,
            Err(err) => {
                warn!(playlist_id, error = %format!("{err:#}"), "failed to fetch playlist page, stopping");
                break;
            }
        };
        let available = page.items.len();
        tracks.extend(page.items.into_iter().flatten());
        debug!(playlist_id, available, total = tracks.len(), "fetched playlist page");

        match page.next {
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                warn!(playlist_id, "playlist page points at itself, stopping");
                break;
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracks
}
