// SYNOID Catalog Library
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Builds the curated lecture-video catalog: playlist registry, flat
// yt-dlp listing, topic guessing, id assignment and the JSON writer.

pub mod catalog;
