//! Incident reports and their lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vigil_geo::GeoPoint;

use crate::elapsed::ValidationElapsed;

/// Opaque report identifier, unique and stable for the report's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Wrap a backend-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReportId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Error for parsing an unrecognized category name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown report category: {0}")]
pub struct UnknownCategory(pub String);

/// Report category.
///
/// A closed enumeration with one canonical list. The wire names below are
/// the only valid partition keys; anything else is a deserialization error
/// rather than a silently new bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Infrastructure,
    Security,
    Environment,
    Utilities,
    Traffic,
    Other,
}

impl ReportCategory {
    /// Every category, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Infrastructure,
        Self::Security,
        Self::Environment,
        Self::Utilities,
        Self::Traffic,
        Self::Other,
    ];

    /// Stable wire name for this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Infrastructure => "infrastructure",
            Self::Security => "security",
            Self::Environment => "environment",
            Self::Utilities => "utilities",
            Self::Traffic => "traffic",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Workflow status of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Ongoing,
    UnderReview,
    Done,
}

impl ReportStatus {
    /// A report stays in the open set until it reaches [`ReportStatus::Done`].
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Done)
    }
}

/// A snapshot of an incident report as delivered by the change feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub category: ReportCategory,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub status: ReportStatus,
    /// Set exactly once, by the validation quorum machine.
    pub validated: bool,
    pub validated_at: Option<DateTime<Utc>>,
    pub validation_elapsed: Option<ValidationElapsed>,
}

impl Report {
    /// A fresh, unvalidated report in the initial status.
    pub fn new(
        id: ReportId,
        category: ReportCategory,
        location: GeoPoint,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            category,
            location,
            created_at,
            status: ReportStatus::Pending,
            validated: false,
            validated_at: None,
            validation_elapsed: None,
        }
    }

    /// Whether this report participates in proximity evaluation.
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Report {
        Report::new(
            ReportId::new("r-1"),
            ReportCategory::Infrastructure,
            GeoPoint::new(18.4861, -69.9312),
            Utc.with_ymd_and_hms(2024, 5, 10, 14, 30, 0).unwrap(),
        )
    }

    #[test]
    fn new_report_is_open_and_unvalidated() {
        let report = sample();
        assert!(report.is_open());
        assert!(!report.validated);
        assert!(report.validated_at.is_none());
    }

    #[test]
    fn done_closes_the_report() {
        let mut report = sample();
        for status in [
            ReportStatus::Pending,
            ReportStatus::Ongoing,
            ReportStatus::UnderReview,
        ] {
            report.status = status;
            assert!(report.is_open());
        }
        report.status = ReportStatus::Done;
        assert!(!report.is_open());
    }

    #[test]
    fn category_round_trips_through_wire_name() {
        for category in ReportCategory::ALL {
            let parsed: ReportCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);

            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "vandalism".parse::<ReportCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("vandalism".to_string()));
    }

    #[test]
    fn status_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::UnderReview).unwrap(),
            "\"under_review\""
        );
    }

    #[test]
    fn report_serde_round_trip() {
        let report = sample();
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
