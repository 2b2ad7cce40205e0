//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::TrackerId;

/// What sort of message an insight carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Suggestion,
    Info,
    Success,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Suggestion => "suggestion",
            InsightKind::Info => "info",
            InsightKind::Success => "success",
        }
    }

    /// Ordinal used for ranking (higher = surfaced first)
    pub fn rank(&self) -> u8 {
        match self {
            InsightKind::Warning => 3,
            InsightKind::Suggestion => 2,
            InsightKind::Info => 1,
            InsightKind::Success => 0,
        }
    }

    /// Success and info messages count as encouragement when selecting
    pub fn is_positive(&self) -> bool {
        matches!(self, InsightKind::Success | InsightKind::Info)
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "suggestion" => Ok(InsightKind::Suggestion),
            "info" => Ok(InsightKind::Info),
            "success" => Ok(InsightKind::Success),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// How urgently an insight should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A human-readable observation about a user's finances
///
/// Insights are recomputed on every call and never persisted. The `id` is
/// deterministic (rule + archetype + tracker) so a consumer can remember which
/// ones it has already shown or dismissed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker_id: Option<TrackerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker_name: Option<String>,
    /// Category label the insight is about (lowercased as matched)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    pub priority: Priority,
}

impl Insight {
    pub fn new(
        id: impl Into<String>,
        kind: InsightKind,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            tracker_id: None,
            tracker_name: None,
            category: None,
            percentage: None,
            priority,
        }
    }

    /// Attach tracker provenance
    pub fn with_tracker(mut self, id: TrackerId, name: impl Into<String>) -> Self {
        self.tracker_id = Some(id);
        self.tracker_name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    /// Percentage used for ranking; missing counts as zero
    pub fn sort_percentage(&self) -> f64 {
        self.percentage.unwrap_or(0.0)
    }
}
