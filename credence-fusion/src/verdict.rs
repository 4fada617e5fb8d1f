// Verdict classification
//
// Pure function of the fused score and the detected contradictions. A HIGH
// contradiction overrides the score buckets; a fact-check that rated the claim
// false forces FALSE whatever the score. MEDIUM contradictions only lower the
// confidence; LOW contradictions are informational.

use crate::config::VerdictConfig;
use crate::contradiction::{ContradictionKind, ContradictionRecord, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete credibility label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    True,
    LikelyTrue,
    Uncertain,
    LikelyFalse,
    False,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::True => "TRUE",
            Verdict::LikelyTrue => "LIKELY_TRUE",
            Verdict::Uncertain => "UNCERTAIN",
            Verdict::LikelyFalse => "LIKELY_FALSE",
            Verdict::False => "FALSE",
        };
        f.write_str(label)
    }
}

/// Which branch of the policy produced the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictBasis {
    /// At least one HIGH contradiction forced a false-leaning verdict
    HighContradiction,
    /// Score bucket, no HIGH or MEDIUM contradiction
    ScoreBucket,
    /// Score bucket with confidence lowered by a MEDIUM contradiction
    ScoreBucketWithMediumContradiction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictOutcome {
    pub verdict: Verdict,
    /// In [0, 1]
    pub confidence: f64,
    pub basis: VerdictBasis,
}

#[derive(Debug, Clone, Default)]
pub struct VerdictClassifier {
    config: VerdictConfig,
}

impl VerdictClassifier {
    pub fn new(config: VerdictConfig) -> Self {
        Self { config }
    }

    /// Classify a fused score given the contradictions found for the same
    /// evidence
    pub fn classify(&self, final_score: f64, contradictions: &[ContradictionRecord]) -> VerdictOutcome {
        let max_high = contradictions
            .iter()
            .filter(|c| c.severity == Severity::High)
            .map(|c| c.confidence)
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.max(c))));

        if let Some(confidence) = max_high {
            let rated_false = contradictions.iter().any(|c| {
                c.severity == Severity::High && c.kind == ContradictionKind::FactcheckContradiction
            });
            let verdict = if rated_false || final_score < self.config.high_false_below {
                Verdict::False
            } else {
                Verdict::LikelyFalse
            };
            return VerdictOutcome {
                verdict,
                confidence: confidence.clamp(0.0, 1.0),
                basis: VerdictBasis::HighContradiction,
            };
        }

        let (verdict, depth) = self.bucket(final_score);
        let has_medium = contradictions.iter().any(|c| c.severity == Severity::Medium);

        if has_medium {
            VerdictOutcome {
                verdict,
                confidence: depth * self.config.medium_confidence_cap,
                basis: VerdictBasis::ScoreBucketWithMediumContradiction,
            }
        } else {
            VerdictOutcome {
                verdict,
                confidence: depth,
                basis: VerdictBasis::ScoreBucket,
            }
        }
    }

    /// Bucket a score and measure how deep inside its bucket it sits.
    ///
    /// Exact boundary values fall into the bucket nearer UNCERTAIN.
    fn bucket(&self, score: f64) -> (Verdict, f64) {
        let c = &self.config;

        let (verdict, depth) = if score > c.true_above {
            (Verdict::True, (score - c.true_above) / (1.0 - c.true_above))
        } else if score > c.likely_true_above {
            (
                Verdict::LikelyTrue,
                interior_depth(score, c.likely_true_above, c.true_above),
            )
        } else if score >= c.uncertain_from {
            (
                Verdict::Uncertain,
                interior_depth(score, c.uncertain_from, c.likely_true_above),
            )
        } else if score >= c.likely_false_from {
            (
                Verdict::LikelyFalse,
                interior_depth(score, c.likely_false_from, c.uncertain_from),
            )
        } else {
            (Verdict::False, (c.likely_false_from - score) / c.likely_false_from)
        };

        (verdict, depth.clamp(0.0, 1.0))
    }
}

fn interior_depth(score: f64, low: f64, high: f64) -> f64 {
    let nearest = (score - low).min(high - score);
    nearest / ((high - low) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::SourceKind;

    fn record(severity: Severity, confidence: f64) -> ContradictionRecord {
        ContradictionRecord::new(
            ContradictionKind::SourceDisagreement,
            severity,
            confidence,
            "test",
            [SourceKind::News, SourceKind::Web],
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_buckets_without_contradictions() {
        let classifier = VerdictClassifier::default();
        let cases = [
            (0.95, Verdict::True),
            (0.7, Verdict::LikelyTrue),
            (0.5, Verdict::Uncertain),
            (0.3, Verdict::LikelyFalse),
            (0.1, Verdict::False),
        ];
        for (score, expected) in cases {
            let outcome = classifier.classify(score, &[]);
            assert_eq!(outcome.verdict, expected, "score {}", score);
            assert_eq!(outcome.basis, VerdictBasis::ScoreBucket);
        }
    }

    #[test]
    fn test_boundaries_break_toward_uncertain() {
        let classifier = VerdictClassifier::default();
        assert_eq!(classifier.classify(0.8, &[]).verdict, Verdict::LikelyTrue);
        assert_eq!(classifier.classify(0.6, &[]).verdict, Verdict::Uncertain);
        assert_eq!(classifier.classify(0.4, &[]).verdict, Verdict::Uncertain);
        assert_eq!(classifier.classify(0.2, &[]).verdict, Verdict::LikelyFalse);
    }

    #[test]
    fn test_depth_confidence() {
        let classifier = VerdictClassifier::default();

        // Bucket midpoints are fully confident
        assert_close(classifier.classify(0.5, &[]).confidence, 1.0);
        assert_close(classifier.classify(0.7, &[]).confidence, 1.0);
        assert_close(classifier.classify(0.3, &[]).confidence, 1.0);

        // Extremes are fully confident
        assert_close(classifier.classify(1.0, &[]).confidence, 1.0);
        assert_close(classifier.classify(0.0, &[]).confidence, 1.0);

        // Boundary values have no depth
        assert_close(classifier.classify(0.6, &[]).confidence, 0.0);

        assert_close(classifier.classify(0.9, &[]).confidence, 0.5);
        assert_close(classifier.classify(0.45, &[]).confidence, 0.5);
    }

    #[test]
    fn test_medium_contradiction_lowers_confidence() {
        let classifier = VerdictClassifier::default();
        let outcome = classifier.classify(0.5, &[record(Severity::Medium, 0.8)]);

        assert_eq!(outcome.verdict, Verdict::Uncertain);
        assert_close(outcome.confidence, 0.5);
        assert_eq!(outcome.basis, VerdictBasis::ScoreBucketWithMediumContradiction);
    }

    #[test]
    fn test_low_contradiction_is_informational() {
        let classifier = VerdictClassifier::default();
        let plain = classifier.classify(0.9, &[]);
        let with_low = classifier.classify(0.9, &[record(Severity::Low, 0.9)]);
        assert_eq!(plain, with_low);
    }

    #[test]
    fn test_high_contradiction_overrides_score() {
        let classifier = VerdictClassifier::default();

        let low = classifier.classify(0.1, &[record(Severity::High, 0.7)]);
        assert_eq!(low.verdict, Verdict::False);
        assert_close(low.confidence, 0.7);
        assert_eq!(low.basis, VerdictBasis::HighContradiction);

        let mid = classifier.classify(0.3, &[record(Severity::High, 0.7)]);
        assert_eq!(mid.verdict, Verdict::LikelyFalse);

        // A high score cannot rescue a claim with a HIGH contradiction
        let high = classifier.classify(0.95, &[record(Severity::High, 0.7)]);
        assert_eq!(high.verdict, Verdict::LikelyFalse);
    }

    #[test]
    fn test_factcheck_contradiction_forces_false() {
        let classifier = VerdictClassifier::default();
        let rated_false = ContradictionRecord::new(
            ContradictionKind::FactcheckContradiction,
            Severity::High,
            0.9,
            "Fact-check rated the claim 'FALSE'",
            [SourceKind::Factcheck],
        );

        for score in [0.1, 0.37, 0.75] {
            let outcome = classifier.classify(score, std::slice::from_ref(&rated_false));
            assert_eq!(outcome.verdict, Verdict::False, "score {}", score);
            assert_close(outcome.confidence, 0.9);
            assert_eq!(outcome.basis, VerdictBasis::HighContradiction);
        }
    }

    #[test]
    fn test_high_contradiction_uses_max_high_confidence() {
        let classifier = VerdictClassifier::default();
        let outcome = classifier.classify(
            0.1,
            &[
                record(Severity::High, 0.6),
                record(Severity::Medium, 0.99),
                record(Severity::High, 0.9),
            ],
        );
        assert_close(outcome.confidence, 0.9);
    }

    #[test]
    fn test_verdict_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Verdict::LikelyTrue).unwrap(),
            "\"LIKELY_TRUE\""
        );
        assert_eq!(Verdict::LikelyFalse.to_string(), "LIKELY_FALSE");
    }
}
