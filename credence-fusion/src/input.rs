//! Verification request payload
//!
//! The single in-memory structure handed to the core per request. Every field
//! is optional; an absent field means the corresponding source produced no
//! finding. Ingestion layers map their native formats onto these types.

use crate::evidence::RawMetadata;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// All evidence collected for one (text, image) claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationInput {
    #[serde(default)]
    pub text_image_similarity: Option<ScoredEvidence>,
    #[serde(default)]
    pub temporal: Option<TemporalEvidence>,
    #[serde(default)]
    pub news: Option<ScoredEvidence>,
    #[serde(default)]
    pub factcheck: Option<FactCheckEvidence>,
    #[serde(default)]
    pub wikipedia: Option<ScoredEvidence>,
    #[serde(default)]
    pub web: Option<ScoredEvidence>,
}

/// Score-bearing evidence from a producer that already reports on [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvidence {
    pub score: f64,
    pub confidence: f64,
    #[serde(default)]
    pub raw_metadata: RawMetadata,
}

impl ScoredEvidence {
    pub fn new(score: f64, confidence: f64) -> Self {
        Self {
            score,
            confidence,
            raw_metadata: RawMetadata::new(),
        }
    }
}

/// Fact-check finding with its publisher's verdict label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckEvidence {
    pub score: f64,
    pub confidence: f64,
    /// Free-text rating, e.g. "False", "Mostly True", "Pants on Fire"
    pub verdict_label: String,
    #[serde(default)]
    pub raw_metadata: RawMetadata,
}

impl FactCheckEvidence {
    pub fn new(score: f64, confidence: f64, verdict_label: impl Into<String>) -> Self {
        Self {
            score,
            confidence,
            verdict_label: verdict_label.into(),
            raw_metadata: RawMetadata::new(),
        }
    }
}

/// Dates extracted upstream from the image metadata and the claim text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalEvidence {
    #[serde(default)]
    pub image_date: Option<ImageDate>,
    #[serde(default)]
    pub text_date: Option<TextDate>,
}

impl TemporalEvidence {
    /// Exact EXIF capture date against an explicit calendar date in the text
    pub fn exact(image_date: NaiveDate, text_date: NaiveDate) -> Self {
        Self {
            image_date: Some(ImageDate {
                date: image_date,
                provenance: DateProvenance::Exif,
            }),
            text_date: Some(TextDate {
                span: DateSpan::Day(text_date),
                provenance: DateProvenance::Explicit,
            }),
        }
    }
}

/// How a date was obtained; fixes the temporal confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateProvenance {
    /// Camera timestamp from EXIF metadata
    Exif,
    /// Calendar date written out in the text
    Explicit,
    /// Resolved from a relative phrase ("yesterday", "last year")
    Relative,
}

/// Image capture date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDate {
    pub date: NaiveDate,
    #[serde(default = "default_image_provenance")]
    pub provenance: DateProvenance,
}

/// Date (or date range) referenced by the claim text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDate {
    pub span: DateSpan,
    #[serde(default = "default_text_provenance")]
    pub provenance: DateProvenance,
}

/// A single day or an inclusive range of days
///
/// JSON: `"2024-01-01"` or `{"start": "2024-01-01", "end": "2024-01-31"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateSpan {
    Day(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

fn default_image_provenance() -> DateProvenance {
    DateProvenance::Exif
}

fn default_text_provenance() -> DateProvenance {
    DateProvenance::Explicit
}
