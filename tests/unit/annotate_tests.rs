/*!
 * Tests for key-point/analysis annotation generation
 */

use qbank::question_processor::{AnswerOption, QuestionRecord};
use qbank::translation::annotate::annotate;
use crate::common;

fn record_with(line_one: &str, line_two: &str) -> QuestionRecord {
    QuestionRecord::new(
        1,
        line_one.to_string(),
        line_two.to_string(),
        common::german_options(),
        'B',
    )
}

/// Invitation with a but-clause in the reply
#[test]
fn test_annotate_withInvitationAndBut_shouldFlagRegretfulAccept() {
    let record = record_with(
        "Will you come to my graduation ceremony tomorrow?",
        "______________, but I'll have to attend an important meeting.",
    );
    let annotation = annotate(&record, "I'd love to");

    assert_eq!(annotation.key_point, "日常交际用语：接受邀请但表示遗憾");
    assert!(annotation.analysis.contains("I'd love to"));
}

/// Invitation declined with thanks
#[test]
fn test_annotate_withDeclinedInvitation_shouldFlagPoliteRefusal() {
    let record = record_with("Would you like another cup of tea?", "__________");
    let annotation = annotate(&record, "No, thanks.");

    assert_eq!(annotation.key_point, "日常交际用语：礼貌拒绝邀请");
}

/// Apology in the first line
#[test]
fn test_annotate_withApology_shouldFlagApologyResponse() {
    let record = record_with("I'm sorry I'm late.", "___________________");
    let annotation = annotate(&record, "Never mind.");

    assert_eq!(annotation.key_point, "日常交际用语：回应道歉");
    assert!(annotation.analysis.contains("Never mind."));
}

/// Language-ability question
#[test]
fn test_annotate_withLanguageQuestion_shouldFlagLanguageAbility() {
    let record = record_with("Do you speak German?", "______________");
    let annotation = annotate(&record, "A little.");

    assert_eq!(annotation.key_point, "日常交际用语：询问语言能力");
}

/// A blank first line carries no keyword and gets the generic annotation
#[test]
fn test_annotate_withBlankFirstLine_shouldFallBack() {
    let record = record_with("______________", "A little.");
    let annotation = annotate(&record, "Do you speak German?");

    assert_eq!(annotation.key_point, "日常交际用语：情景对话");
}

/// Shop-service exchange
#[test]
fn test_annotate_withShopService_shouldFlagShopUsage() {
    let record = record_with("________?", "Yes, how much is this shirt?");
    let annotation = annotate(&record, "May I help you");

    // line_one carries no keyword; the reply drives nothing - this falls
    // through to the generic scenario annotation
    assert_eq!(annotation.key_point, "日常交际用语：情景对话");

    let record = record_with("Can I help you with your suitcase?", "____");
    let annotation = annotate(&record, "Thanks. I can manage it myself.");
    assert_eq!(annotation.key_point, "日常交际用语：商店服务用语");
}

/// Generic fallback truncates long multi-byte dialogue safely
#[test]
fn test_annotate_withNoKeyword_shouldFallBackAndTruncate() {
    let long_line = "Bob, meet Mary. ".repeat(10);
    let record = record_with(&long_line, "________");
    let annotation = annotate(&record, "Nice to meet you, Mary.");

    assert_eq!(annotation.key_point, "日常交际用语：情景对话");
    assert!(annotation.analysis.contains("Nice to meet you, Mary."));
    // Only the first 30 characters of the line are quoted
    assert!(annotation.analysis.contains("Bob, meet Mary. Bob, meet Mary"));
    assert!(!annotation.analysis.contains(&long_line));

    // Multi-byte dialogue must not panic on the char boundary
    let cjk_line = "这是一个很长的中文对话行，用来检查截断是否安全。".repeat(3);
    let record = record_with(&cjk_line, "________");
    let annotation = annotate(&record, "answer");
    assert!(annotation.analysis.contains("answer"));
}
