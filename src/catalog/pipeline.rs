// SYNOID Catalog - Pipeline Driver
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// One sequential pass: registry order, one subject fully fetched and
// assembled before the next starts. A failed subject contributes nothing
// and never stops the run.

use crate::catalog::assembler::{Catalog, CatalogBuilder};
use crate::catalog::registry::{PlaylistRegistry, Subject};
use crate::catalog::source_tools::{ExtractionError, PlaylistSource, RawVideoRecord};
use tracing::{error, info};

/// What happened to one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectOutcome {
    Added { subject: String, count: usize },
    Failed { subject: String, reason: String },
}

impl SubjectOutcome {
    pub fn subject(&self) -> &str {
        match self {
            SubjectOutcome::Added { subject, .. } | SubjectOutcome::Failed { subject, .. } => subject,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SubjectOutcome::Failed { .. })
    }
}

/// Result of a full pass, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRun {
    pub catalog: Catalog,
    pub outcomes: Vec<SubjectOutcome>,
}

impl CatalogRun {
    pub fn failed_subjects(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_failed())
            .map(SubjectOutcome::subject)
    }
}

async fn fetch_subject<S: PlaylistSource>(
    source: &S,
    subject: &Subject,
) -> Result<Vec<RawVideoRecord>, ExtractionError> {
    info!("[CATALOG] Fetching playlist for {}...", subject.name);
    source.fetch(&subject.locator).await
}

/// Fetch and assemble every subject in `registry`.
pub async fn build_catalog<S: PlaylistSource>(
    registry: &PlaylistRegistry,
    source: &S,
) -> CatalogRun {
    let mut builder = CatalogBuilder::new();
    let mut outcomes = Vec::with_capacity(registry.subjects().len());

    for subject in registry.subjects() {
        let outcome = match fetch_subject(source, subject).await {
            Ok(entries) => {
                let (next, count) = builder.append_subject(subject, entries);
                builder = next;
                info!("[CATALOG] ✅ {} videos added for {}", count, subject.name);
                SubjectOutcome::Added {
                    subject: subject.name.clone(),
                    count,
                }
            }
            Err(e) => {
                error!("[CATALOG] ❌ Error fetching {}: {}", subject.name, e);
                SubjectOutcome::Failed {
                    subject: subject.name.clone(),
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    let catalog = builder.finish();
    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    info!(
        "[CATALOG] Assembled {} videos from {} subjects ({} failed)",
        catalog.videos.len(),
        outcomes.len() - failed,
        failed
    );

    CatalogRun { catalog, outcomes }
}
