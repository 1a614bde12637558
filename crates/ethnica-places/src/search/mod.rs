//! Provider-chained search: live providers in priority order, then the mock
//! generator.

mod filter;
mod orchestrator;
mod sequence;

pub use filter::SearchFilters;
pub use orchestrator::SearchOrchestrator;
pub use sequence::{LatestResults, SequenceCounter};

use ethnica_core::{Business, LngLat};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message about how a search was served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Which source produced the businesses in an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Provider(&'static str),
    Mock,
}

impl ResultSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider(name) => name,
            Self::Mock => "mock",
        }
    }
}

impl std::fmt::Display for ResultSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResultSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub center: LngLat,
    pub businesses: Vec<Business>,
    pub source: ResultSource,
    pub notices: Vec<Notice>,
    /// Monotonic per orchestrator; higher is newer.
    pub sequence: u64,
}

impl SearchOutcome {
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
