//! In-memory catalogs and pacer for exercising transfers without a network

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::catalog::{SearchCandidate, SourceCatalog, SourcePage, TargetCatalog, Track};
use crate::pacing::Pacer;

pub fn track(name: &str, artist: &str) -> Track {
    Track {
        name: name.to_owned(),
        artist: artist.to_owned(),
    }
}

pub fn candidate(id: &str, title: &str) -> SearchCandidate {
    SearchCandidate {
        id: id.to_owned(),
        title: title.to_owned(),
    }
}

/// Serves the given pages in order, whatever cursor is asked for
pub struct FakeSource {
    pages: Mutex<VecDeque<Result<SourcePage>>>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl FakeSource {
    pub fn new(pages: Vec<Result<SourcePage>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            cursors: Mutex::new(Vec::new()),
        }
    }

    pub fn single_page(tracks: Vec<Track>) -> Self {
        Self::new(vec![Ok(SourcePage {
            items: tracks.into_iter().map(Some).collect(),
            next: None,
        })])
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SourceCatalog for FakeSource {
    async fn playlist_page(&self, _playlist_id: &str, cursor: Option<&str>) -> Result<SourcePage> {
        self.cursors.lock().unwrap().push(cursor.map(str::to_owned));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SourcePage::default()))
    }
}

pub struct FakeTarget {
    region: Option<String>,
    playlist_id: Option<String>,
    results: HashMap<String, Vec<SearchCandidate>>,
    failing_queries: HashSet<String>,
    failing_batches: HashSet<usize>,
    searches: Mutex<Vec<String>>,
    created: Mutex<Vec<String>>,
    appended: Mutex<Vec<Vec<String>>>,
}

impl FakeTarget {
    pub fn new() -> Self {
        Self {
            region: Some("US".to_owned()),
            playlist_id: Some("new-playlist".to_owned()),
            results: HashMap::new(),
            failing_queries: HashSet::new(),
            failing_batches: HashSet::new(),
            searches: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            appended: Mutex::new(Vec::new()),
        }
    }

    pub fn without_region(mut self) -> Self {
        self.region = None;
        self
    }

    pub fn with_playlist_id(mut self, playlist_id: &str) -> Self {
        self.playlist_id = Some(playlist_id.to_owned());
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.playlist_id = None;
        self
    }

    pub fn with_results(mut self, query: &str, candidates: Vec<SearchCandidate>) -> Self {
        self.results.insert(query.to_owned(), candidates);
        self
    }

    pub fn failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_owned());
        self
    }

    /// 1-based batch numbers whose append fails
    pub fn failing_batches(mut self, batches: impl IntoIterator<Item = usize>) -> Self {
        self.failing_batches.extend(batches);
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    /// Every attempted batch, failed ones included
    pub fn appended(&self) -> Vec<Vec<String>> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TargetCatalog for FakeTarget {
    async fn region(&self) -> Result<String> {
        self.region.clone().ok_or_else(|| anyhow!("no country on profile"))
    }

    async fn search(&self, query: &str, _region: &str) -> Result<Vec<SearchCandidate>> {
        self.searches.lock().unwrap().push(query.to_owned());
        if self.failing_queries.contains(query) {
            return Err(anyhow!("connection reset"));
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn create_playlist(&self, name: &str, _region: &str) -> Result<String> {
        self.created.lock().unwrap().push(name.to_owned());
        self.playlist_id
            .clone()
            .ok_or_else(|| anyhow!("400 Bad Request"))
    }

    async fn append_tracks(
        &self,
        _playlist_id: &str,
        track_ids: &[String],
        _region: &str,
    ) -> Result<()> {
        let mut appended = self.appended.lock().unwrap();
        appended.push(track_ids.to_vec());
        if self.failing_batches.contains(&appended.len()) {
            return Err(anyhow!("429 Too Many Requests"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}
