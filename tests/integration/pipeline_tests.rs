/*!
 * End-to-end tests of the regenerate, patch and verify workflows
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use qbank::app_config::Config;
use qbank::app_controller::Controller;
use qbank::question_processor::{DialoguePair, DocumentGrammar, QuestionBank};
use crate::common;

/// Builds a workspace with one exam document, a table resource and a config
fn setup_workspace() -> Result<(tempfile::TempDir, Config)> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    let exam_dir = root.join("exams");
    fs::create_dir_all(&exam_dir)?;
    common::create_test_file(&exam_dir, "mock_exam_one.txt", &common::sample_exam_text())?;

    common::create_test_file(&root, "translations.json", &common::sample_table_json())?;

    let config = Config {
        exam_dir,
        exam_files: Vec::new(),
        bank_file: root.join("part-I.txt"),
        table_file: root.join("translations.json"),
        bank_grammar: DocumentGrammar::Bank,
        log_level: Default::default(),
    };
    Ok((temp_dir, config))
}

/// Regenerate produces a translated, re-parseable bank file
#[test]
fn test_regenerate_withSampleExam_shouldWriteTranslatedBank() -> Result<()> {
    let (_temp_dir, config) = setup_workspace()?;
    let bank_file = config.bank_file.clone();

    let controller = Controller::with_config(config)?;
    let stats = controller.run_regenerate()?;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.translated(), 2);
    assert_eq!(stats.passthrough, 0);

    let content = fs::read_to_string(&bank_file)?;
    let records = QuestionBank::parse_string(&content, DocumentGrammar::Bank)?;
    assert_eq!(records.len(), 2);

    // Records are renumbered sequentially across documents
    assert_eq!(records[0].index, 1);
    assert_eq!(records[1].index, 2);

    // Translations came from the table; annotations were generated
    assert_eq!(
        records[0].translation,
        Some(DialoguePair::new("你想再喝一杯茶吗？", "不了，谢谢。"))
    );
    assert_eq!(records[0].key_point, "日常交际用语：礼貌拒绝邀请");
    assert_eq!(
        records[1].translation,
        Some(DialoguePair::new("你会说德语吗？", "会一点。"))
    );
    Ok(())
}

/// Regenerated output is idempotent under re-parse and re-render
#[test]
fn test_regenerate_withRerender_shouldBeIdempotent() -> Result<()> {
    let (_temp_dir, config) = setup_workspace()?;
    let bank_file = config.bank_file.clone();

    Controller::with_config(config)?.run_regenerate()?;

    let first_pass = fs::read_to_string(&bank_file)?;
    let records = QuestionBank::parse_string(&first_pass, DocumentGrammar::Bank)?;
    let second_pass = QuestionBank {
        source_file: bank_file.clone(),
        records,
    }
    .render();
    assert_eq!(second_pass, first_pass);
    Ok(())
}

/// Verify reports clean after a regenerate against the same sources
#[test]
fn test_verify_afterRegenerate_shouldReportClean() -> Result<()> {
    let (_temp_dir, config) = setup_workspace()?;

    let controller = Controller::with_config(config)?;
    controller.run_regenerate()?;
    let report = controller.run_verify()?;

    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.reference_total, 2);
    assert_eq!(report.derived_total, 2);
    Ok(())
}

/// Verify flags a hand-broken bank record
#[test]
fn test_verify_withTamperedBank_shouldReportAnswerMismatch() -> Result<()> {
    let (_temp_dir, config) = setup_workspace()?;
    let bank_file = config.bank_file.clone();

    let controller = Controller::with_config(config)?;
    controller.run_regenerate()?;

    let content = fs::read_to_string(&bank_file)?;
    let tampered = content.replace("你的答案：A", "你的答案：C");
    fs::write(&bank_file, tampered)?;

    let report = controller.run_verify()?;
    assert_eq!(report.answer_mismatches(), 1);
    Ok(())
}

/// Patch fills only untranslated blocks and leaves everything else alone
#[test]
fn test_patch_withPartiallyTranslatedBank_shouldFillMissingBlocks() -> Result<()> {
    let (_temp_dir, config) = setup_workspace()?;
    let bank_file = config.bank_file.clone();

    // Build a bank where the German record still echoes its source pair
    let mut untranslated = common::translated_german_record();
    untranslated.translation = Some(DialoguePair::new("Do you speak German?", "A little."));
    let bank = QuestionBank {
        source_file: bank_file.clone(),
        records: vec![untranslated, common::tea_record()],
    };
    bank.write_to_file(&bank_file)?;
    let before = fs::read_to_string(&bank_file)?;

    let controller = Controller::with_config(config)?;
    let stats = controller.run_patch()?;

    assert_eq!(stats.total, 1);
    assert_eq!(stats.translated(), 1);

    let after = fs::read_to_string(&bank_file)?;
    assert_ne!(after, before);
    assert!(after.contains("译文：--- 你会说德语吗？\n    --- 会一点。"));
    // The already-translated record kept its block
    assert!(after.contains("译文：--- 你想再喝一杯茶吗？\n    --- 不了，谢谢。"));

    // A second patch run converges: nothing left to translate
    let stats = controller.run_patch()?;
    assert_eq!(stats.total, 0);
    let settled = fs::read_to_string(&bank_file)?;
    assert_eq!(settled, after);
    Ok(())
}

/// A workspace with no usable exam documents fails loudly on regenerate
#[test]
fn test_regenerate_withEmptyExamDir_shouldFail() -> Result<()> {
    let (_temp_dir, mut config) = setup_workspace()?;
    let empty_dir = config.exam_dir.parent().unwrap().join("empty");
    fs::create_dir_all(&empty_dir)?;
    config.exam_dir = empty_dir;

    let controller = Controller::with_config(config)?;
    assert!(controller.run_regenerate().is_err());
    Ok(())
}

/// Explicit exam file lists are honored in order
#[test]
fn test_regenerate_withExplicitFileList_shouldUseGivenOrder() -> Result<()> {
    let (_temp_dir, mut config) = setup_workspace()?;
    let exam_path: PathBuf = config.exam_dir.join("mock_exam_one.txt");
    config.exam_files = vec![exam_path];

    let controller = Controller::with_config(config)?;
    let stats = controller.run_regenerate()?;
    assert_eq!(stats.total, 2);
    Ok(())
}
