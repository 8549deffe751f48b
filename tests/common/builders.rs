//! Builders for scratch data directories.

use spanish_core::app::{self, QueryRequest, Report, Status};
use spanish_core::config::DataPaths;
use spanish_core::core::format::Layout;
use spanish_core::persistence::CacheFormat;
use spanish_core::Direction;
use std::fs;
use std::sync::atomic::AtomicBool;
use tempfile::TempDir;

/// A temporary data directory laid out like an installed glossary.
pub struct DataDir {
    pub dir: TempDir,
}

impl DataDir {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Data directory holding only the glossary text.
    pub fn with_text(text: &str) -> Self {
        let data = Self::empty();
        fs::write(data.paths().english_text(), text).expect("write glossary text");
        data
    }

    /// Data directory holding the glossary text and caches built from it.
    pub fn with_caches(text: &str, format: CacheFormat) -> Self {
        let data = Self::with_text(text);
        let mut sink = Vec::new();
        let status = app::regenerate(&data.paths(), format, &mut sink).expect("regenerate");
        assert_eq!(status, Status::Success, "{}", String::from_utf8_lossy(&sink));
        data
    }

    pub fn paths(&self) -> DataPaths {
        DataPaths::in_dir(self.dir.path())
    }

    /// Runs a lookup and returns the report and everything printed.
    pub fn lookup(&self, request: &QueryRequest) -> (Report, String) {
        self.lookup_with(request, &AtomicBool::new(false))
    }

    pub fn lookup_with(&self, request: &QueryRequest, cancel: &AtomicBool) -> (Report, String) {
        let mut out = Vec::new();
        let report = app::run_query(&self.paths(), &Layout::default(), request, cancel, &mut out)
            .expect("report written");
        (report, String::from_utf8(out).expect("utf-8 report"))
    }
}

/// A sorted forward lookup from whatever source is available.
pub fn forward(query: &str) -> QueryRequest {
    QueryRequest {
        query: query.to_string(),
        direction: Direction::ToSpanish,
        force_text: false,
        sorted: true,
    }
}

pub fn reverse(query: &str) -> QueryRequest {
    QueryRequest {
        direction: Direction::ToEnglish,
        ..forward(query)
    }
}

pub fn text_only(query: &str) -> QueryRequest {
    QueryRequest {
        force_text: true,
        ..forward(query)
    }
}
