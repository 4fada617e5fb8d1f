// Evidence Normalizer
//
// Maps each score-reporting producer's payload onto the uniform
// EvidenceRecord shape. Pure mapping, no side effects.
//
// Contract:
// - Payload absent => record absent (no score, no confidence)
// - Payload present with score/confidence outside [0, 1] => MalformedEvidence.
//   Values are never clamped: a producer bug must not masquerade as a real
//   low-confidence signal.
// - Fact-check verdict label is classified and also kept in raw_metadata

use crate::error::Result;
use crate::evidence::{EvidenceDetail, EvidenceRecord, FactCheckRating, Reading, SourceKind};
use crate::input::{FactCheckEvidence, ScoredEvidence, VerificationInput};
use serde_json::json;

/// Source kinds whose producers report a score directly
pub const SCORED_KINDS: [SourceKind; 5] = [
    SourceKind::TextImageSimilarity,
    SourceKind::News,
    SourceKind::Factcheck,
    SourceKind::Wikipedia,
    SourceKind::Web,
];

#[derive(Debug, Default, Clone, Copy)]
pub struct EvidenceNormalizer;

impl EvidenceNormalizer {
    /// Normalize every score-reporting source, one record per kind in
    /// `SCORED_KINDS` order
    pub fn normalize(&self, input: &VerificationInput) -> Result<Vec<EvidenceRecord>> {
        let records = vec![
            normalize_scored(
                SourceKind::TextImageSimilarity,
                input.text_image_similarity.as_ref(),
            )?,
            normalize_scored(SourceKind::News, input.news.as_ref())?,
            normalize_factcheck(input.factcheck.as_ref())?,
            normalize_scored(SourceKind::Wikipedia, input.wikipedia.as_ref())?,
            normalize_scored(SourceKind::Web, input.web.as_ref())?,
        ];

        tracing::debug!(
            "Normalized {} scored sources ({} present)",
            records.len(),
            records.iter().filter(|r| r.is_present()).count()
        );

        Ok(records)
    }
}

fn normalize_scored(kind: SourceKind, evidence: Option<&ScoredEvidence>) -> Result<EvidenceRecord> {
    let Some(evidence) = evidence else {
        return Ok(EvidenceRecord::absent(kind));
    };

    let reading = Reading::new(kind, evidence.score, evidence.confidence)?;
    Ok(EvidenceRecord::present(kind, reading).with_raw_metadata(evidence.raw_metadata.clone()))
}

fn normalize_factcheck(evidence: Option<&FactCheckEvidence>) -> Result<EvidenceRecord> {
    let Some(evidence) = evidence else {
        return Ok(EvidenceRecord::absent(SourceKind::Factcheck));
    };

    let reading = Reading::new(SourceKind::Factcheck, evidence.score, evidence.confidence)?;
    let rating = FactCheckRating::classify(&evidence.verdict_label);

    let mut raw_metadata = evidence.raw_metadata.clone();
    raw_metadata.insert("verdict_label".to_string(), json!(evidence.verdict_label));

    Ok(EvidenceRecord::present(SourceKind::Factcheck, reading)
        .with_detail(EvidenceDetail::FactCheck { rating })
        .with_raw_metadata(raw_metadata))
}
