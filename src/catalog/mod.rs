// SYNOID Catalog Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod assembler;
pub mod io_shield;
pub mod pipeline;
pub mod query;
pub mod registry;
pub mod source_tools;
pub mod topic;

pub use assembler::{Catalog, CatalogBuilder, VideoRecord};
pub use pipeline::{build_catalog, CatalogRun, SubjectOutcome};
pub use registry::{PlaylistRegistry, Subject};
pub use source_tools::{ExtractionError, PlaylistSource, RawVideoRecord, YtDlpCommand, YtDlpSource};
