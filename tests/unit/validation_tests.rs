/*!
 * Tests for the cross-document verification service
 */

use qbank::question_processor::DialoguePair;
use qbank::validation::{VerificationIssue, VerificationService};
use crate::common;

/// A clean pair of sequences produces an issue-free report
#[test]
fn test_compare_withIdenticalSequences_shouldReportClean() {
    let reference = vec![common::german_record(), {
        let mut r = common::tea_record();
        r.translation = None;
        r
    }];
    let derived = vec![common::translated_german_record(), common::tea_record()];

    let report = VerificationService::new().compare(&reference, &derived);
    assert!(report.is_clean());
    assert_eq!(report.reference_total, 2);
    assert_eq!(report.derived_total, 2);
}

/// Differing answer labels are reported positionally
#[test]
fn test_compare_withAnswerMismatch_shouldReportIt() {
    let reference = vec![common::german_record()];
    let mut wrong = common::translated_german_record();
    wrong.answer_label = 'C';

    let report = VerificationService::new().compare(&reference, &[wrong]);
    assert_eq!(report.answer_mismatches(), 1);
    assert!(matches!(
        report.issues[0],
        VerificationIssue::AnswerMismatch {
            position: 0,
            reference: 'B',
            derived: 'C',
            ..
        }
    ));
    // The changed answer also changes the resolved second line
    assert_eq!(report.dialogue_mismatches(), 1);
}

/// Differing dialogue text is reported even when raw blanks match
#[test]
fn test_compare_withDialogueMismatch_shouldReportIt() {
    let reference = vec![common::german_record()];
    let mut changed = common::translated_german_record();
    changed.line_one = "Do you speak French?".to_string();

    let report = VerificationService::new().compare(&reference, &[changed]);
    assert_eq!(report.dialogue_mismatches(), 1);
}

/// Comparison is positional, not serial-based
#[test]
fn test_compare_withDifferentSerials_shouldStillComparePositionally() {
    let reference = vec![common::german_record()];
    let mut renumbered = common::translated_german_record();
    renumbered.index = 42;

    let report = VerificationService::new().compare(&reference, &[renumbered]);
    assert_eq!(report.dialogue_mismatches(), 0);
    assert_eq!(report.answer_mismatches(), 0);
}

/// Untranslated or source-echoing translation blocks are flagged
#[test]
fn test_compare_withIncompleteTranslation_shouldReportIt() {
    let reference = vec![common::german_record(), common::german_record()];

    // Derived record 1: the source text was copied into the translation
    let mut echoed = common::translated_german_record();
    echoed.translation = Some(DialoguePair::new("Do you speak German?", "A little."));
    // Derived record 2: no translation block parsed at all
    let mut missing = common::translated_german_record();
    missing.translation = None;

    let report = VerificationService::new().compare(&reference, &[echoed, missing]);
    assert_eq!(report.incomplete_translations(), 2);
    assert_eq!(report.answer_mismatches(), 0);
}

/// Sequence length differences show up in the totals and is_clean
#[test]
fn test_compare_withLengthMismatch_shouldNotBeClean() {
    let reference = vec![common::german_record(), common::tea_record()];
    let derived = vec![common::translated_german_record()];

    let report = VerificationService::new().compare(&reference, &derived);
    assert_eq!(report.reference_total, 2);
    assert_eq!(report.derived_total, 1);
    assert!(!report.is_clean());
}

/// The summary lists every counter
#[test]
fn test_report_display_withIssues_shouldSummarize() {
    let reference = vec![common::german_record()];
    let mut wrong = common::translated_german_record();
    wrong.answer_label = 'C';

    let report = VerificationService::new().compare(&reference, &[wrong]);
    let summary = report.to_string();
    assert!(summary.contains("Reference records: 1"));
    assert!(summary.contains("Answer mismatches: 1"));
    assert!(summary.contains("Incomplete translations: 0"));
}
