// SYNOID Catalog - Query
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::catalog::assembler::{Catalog, VideoRecord};

/// Case-insensitive loose match: either side containing the other counts.
fn loosely_matches(value: &str, query: &str) -> bool {
    let value = value.to_lowercase();
    let query = query.to_lowercase();
    value.contains(&query) || query.contains(&value)
}

impl VideoRecord {
    fn matches_subject(&self, subject: &str) -> bool {
        loosely_matches(&self.subject, subject)
    }

    fn matches_topic(&self, topic: &str) -> bool {
        loosely_matches(&self.topic, topic)
    }
}

impl Catalog {
    /// Records matching every filter given, in catalog order. No filters, every record.
    pub fn search<'a>(
        &'a self,
        subject: Option<&'a str>,
        topic: Option<&'a str>,
    ) -> impl Iterator<Item = &'a VideoRecord> + 'a {
        self.videos.iter().filter(move |v| {
            subject.map_or(true, |s| v.matches_subject(s)) && topic.map_or(true, |t| v.matches_topic(t))
        })
    }
}
