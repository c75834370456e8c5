use log::debug;

use crate::question_processor::{contains_cjk, QuestionRecord};
use super::report::{VerificationIssue, VerificationReport};

// @module: Cross-document comparison service

/// Compares a reference record sequence against a derived one.
///
/// Comparison is positional: the i-th reference record is checked against
/// the i-th derived record, regardless of either record's own serial.
/// Records beyond the shorter sequence are only reflected in the totals.
pub struct VerificationService;

impl VerificationService {
    pub fn new() -> Self {
        VerificationService
    }

    /// Run all checks and collect the advisory report. Never fails; a
    /// record whose answer label cannot be resolved is compared on its raw
    /// fields only.
    pub fn compare(
        &self,
        reference: &[QuestionRecord],
        derived: &[QuestionRecord],
    ) -> VerificationReport {
        let mut report = VerificationReport {
            reference_total: reference.len(),
            derived_total: derived.len(),
            issues: Vec::new(),
        };

        for (position, (reference, derived)) in reference.iter().zip(derived.iter()).enumerate() {
            if reference.answer_label != derived.answer_label {
                report.issues.push(VerificationIssue::AnswerMismatch {
                    position,
                    reference: reference.answer_label,
                    derived: derived.answer_label,
                    context: head_of(&derived.line_one),
                });
            }

            if Self::dialogue_differs(reference, derived) {
                report.issues.push(VerificationIssue::DialogueMismatch {
                    position,
                    reference: head_of(&reference.line_one),
                    derived: head_of(&derived.line_one),
                });
            }

            if Self::translation_incomplete(derived) {
                report.issues.push(VerificationIssue::IncompleteTranslation {
                    position,
                    index: derived.index,
                });
            }
        }

        debug!(
            "Verification compared {} positions, {} issues",
            reference.len().min(derived.len()),
            report.issues.len()
        );
        report
    }

    /// True when the first line or the resolved second line differs
    fn dialogue_differs(reference: &QuestionRecord, derived: &QuestionRecord) -> bool {
        if reference.line_one.trim() != derived.line_one.trim() {
            return true;
        }
        match (reference.resolved_line_two(), derived.resolved_line_two()) {
            (Ok(a), Ok(b)) => a != b,
            // Unresolvable on either side: fall back to the raw lines
            _ => reference.line_two.trim() != derived.line_two.trim(),
        }
    }

    /// Heuristic from the original verification flow: a translation is
    /// incomplete when the untranslated source line still appears inside
    /// it, or when it carries no CJK text at all.
    fn translation_incomplete(record: &QuestionRecord) -> bool {
        let Some(translation) = &record.translation else {
            return true;
        };
        let source_line = record.line_one.trim();
        if !source_line.is_empty() && translation.line_one.contains(source_line) {
            return true;
        }
        !contains_cjk(&translation.line_one) || !contains_cjk(&translation.line_two)
    }
}

impl Default for VerificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Opening of a line, for report context
fn head_of(line: &str) -> String {
    line.trim().chars().take(50).collect()
}
