// SYNOID Catalog - Record Assembler
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Turns raw playlist entries into normalized catalog records with
// per-subject sequential ids.

use crate::catalog::registry::Subject;
use crate::catalog::source_tools::RawVideoRecord;
use crate::catalog::topic::guess_topic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Title used when the platform returns none.
pub const UNTITLED: &str = "Untitled";

/// Duration text used when the platform returns none.
pub const DURATION_UNAVAILABLE: &str = "N/A";

const THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";
const THUMBNAIL_SUFFIX: &str = "hqdefault.jpg";

/// The persisted unit. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    pub title: String,
    pub topic: String,
    pub subject: String,
    pub duration: String,
    pub thumbnail: Option<String>,
}

/// Top-level output document: `{ "videos": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub videos: Vec<VideoRecord>,
}

/// `m:ss`, or `N/A` when the duration is unknown.
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(secs) => format!("{}:{:02}", secs / 60, secs % 60),
        None => DURATION_UNAVAILABLE.to_string(),
    }
}

/// Thumbnail for a video id. No id, no thumbnail.
pub fn thumbnail_url(video_id: Option<&str>) -> Option<String> {
    video_id.map(|id| format!("{}/{}/{}", THUMBNAIL_HOST, id, THUMBNAIL_SUFFIX))
}

/// Accumulates records across subjects.
///
/// Each subject step consumes the builder and hands it back, so the record
/// list and the per-subject counters only ever live in the caller's hands.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    videos: Vec<VideoRecord>,
    counters: HashMap<String, u32>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every entry of `subject` in yield order. Returns the builder and
    /// the number of records added.
    pub fn append_subject(
        mut self,
        subject: &Subject,
        entries: Vec<RawVideoRecord>,
    ) -> (Self, usize) {
        let prefix = subject.prefix();
        let added = entries.len();
        let mut count = self.counters.get(&subject.name).copied().unwrap_or(0);

        self.videos.reserve(added);
        for entry in entries {
            count += 1;
            let title = entry.title.unwrap_or_else(|| UNTITLED.to_string());
            self.videos.push(VideoRecord {
                id: format!("{}{}", prefix, count),
                thumbnail: thumbnail_url(entry.id.as_deref()),
                video_id: entry.id,
                topic: guess_topic(&title),
                title,
                subject: subject.name.clone(),
                duration: format_duration(entry.duration),
            });
        }

        self.counters.insert(subject.name.clone(), count);
        (self, added)
    }

    pub fn finish(self) -> Catalog {
        Catalog {
            videos: self.videos,
        }
    }
}
