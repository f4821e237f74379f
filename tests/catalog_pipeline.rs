use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use synoid_catalog::catalog::io_shield::write_catalog;
use synoid_catalog::catalog::{
    build_catalog, Catalog, ExtractionError, PlaylistRegistry, PlaylistSource, RawVideoRecord,
    Subject, SubjectOutcome,
};

/// Serves canned listings keyed by locator; unknown locators fail like a private playlist.
struct MockSource {
    listings: HashMap<String, Vec<RawVideoRecord>>,
}

impl PlaylistSource for MockSource {
    fn fetch(
        &self,
        locator: &str,
    ) -> impl Future<Output = Result<Vec<RawVideoRecord>, ExtractionError>> + Send {
        let result = self.listings.get(locator).cloned().ok_or_else(|| ExtractionError::Failed {
            status: "exit status: 1".to_string(),
            stderr: format!("ERROR: [youtube:tab] {}: This playlist is private", locator),
        });
        async move { result }
    }
}

fn listing(n: usize, tag: &str) -> Vec<RawVideoRecord> {
    (1..=n)
        .map(|i| RawVideoRecord {
            id: Some(format!("{}{:03}", tag, i)),
            title: Some(format!("Lecture {} on {} | Course", i, tag)),
            duration: Some(60 * i as u64 + 5),
        })
        .collect()
}

fn fixture() -> (PlaylistRegistry, MockSource) {
    let registry = PlaylistRegistry::new(vec![
        Subject::new("Databases", "https://example.com/databases"),
        Subject::new("Algorithms", "https://example.com/algorithms"),
        Subject::new("Operating Systems", "https://example.com/os"),
    ])
    .unwrap();

    let mut listings = HashMap::new();
    listings.insert("https://example.com/databases".to_string(), listing(3, "db"));
    listings.insert("https://example.com/os".to_string(), listing(4, "os"));
    // Algorithms is missing on purpose.
    (registry, MockSource { listings })
}

fn temp_output(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("synoid_catalog_it");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

#[tokio::test]
async fn test_failed_subject_contributes_nothing() {
    let (registry, source) = fixture();
    let run = build_catalog(&registry, &source).await;

    assert_eq!(run.catalog.videos.len(), 7);
    assert!(run.catalog.videos.iter().all(|v| v.subject != "Algorithms"));
    assert!(matches!(
        &run.outcomes[1],
        SubjectOutcome::Failed { subject, reason } if subject == "Algorithms" && reason.contains("private")
    ));
}

#[tokio::test]
async fn test_ids_are_contiguous_per_subject() {
    let (registry, source) = fixture();
    let run = build_catalog(&registry, &source).await;

    let db: Vec<&str> = run.catalog.search(Some("Databases"), None).map(|v| v.id.as_str()).collect();
    let os: Vec<&str> = run
        .catalog
        .videos
        .iter()
        .filter(|v| v.subject == "Operating Systems")
        .map(|v| v.id.as_str())
        .collect();

    assert_eq!(db, vec!["d1", "d2", "d3"]);
    assert_eq!(os, vec!["os1", "os2", "os3", "os4"]);

    // Registry order, then yield order.
    assert_eq!(run.catalog.videos[0].video_id.as_deref(), Some("db001"));
    assert_eq!(run.catalog.videos[3].video_id.as_deref(), Some("os001"));
}

#[tokio::test]
async fn test_derived_fields() {
    let (registry, source) = fixture();
    let run = build_catalog(&registry, &source).await;
    let first = &run.catalog.videos[0];

    assert_eq!(first.title, "Lecture 1 on db | Course");
    assert_eq!(first.topic, "Lecture 1 on");
    assert_eq!(first.duration, "1:05");
    assert_eq!(
        first.thumbnail.as_deref(),
        Some("https://img.youtube.com/vi/db001/hqdefault.jpg")
    );
}

#[tokio::test]
async fn test_round_trip_through_file() {
    let (registry, source) = fixture();
    let run = build_catalog(&registry, &source).await;
    let path = temp_output("round_trip.json");

    write_catalog(&run.catalog, &path).unwrap();
    let loaded = Catalog::load(&path).unwrap();

    assert_eq!(loaded, run.catalog);
    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let (registry, source) = fixture();
    let first_path = temp_output("idempotent_a.json");
    let second_path = temp_output("idempotent_b.json");

    write_catalog(&build_catalog(&registry, &source).await.catalog, &first_path).unwrap();
    write_catalog(&build_catalog(&registry, &source).await.catalog, &second_path).unwrap();

    assert_eq!(fs::read(&first_path).unwrap(), fs::read(&second_path).unwrap());
    let _ = fs::remove_file(&first_path);
    let _ = fs::remove_file(&second_path);
}

#[tokio::test]
async fn test_all_failures_still_write_empty_catalog() {
    let (registry, _) = fixture();
    let source = MockSource {
        listings: HashMap::new(),
    };
    let run = build_catalog(&registry, &source).await;
    let path = temp_output("empty.json");

    write_catalog(&run.catalog, &path).unwrap();

    assert_eq!(run.failed_subjects().count(), 3);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"videos\": []\n}");
    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn test_default_registry_prefixes() {
    let registry = PlaylistRegistry::default();
    let listings = registry
        .subjects()
        .iter()
        .map(|s| (s.locator.clone(), vec![RawVideoRecord::new(Some("v"), Some("Intro"), Some(0))]))
        .collect();
    let run = build_catalog(&registry, &MockSource { listings }).await;

    let ids: Vec<&str> = run.catalog.videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["d1", "cn1", "a1", "to1", "dl1", "os1", "cd1", "co1", "dm1"]
    );
    assert!(run.catalog.videos.iter().all(|v| v.duration == "0:00"));
}
