/*!
 * Tests for app configuration loading, validation and saving
 */

use std::path::PathBuf;
use qbank::app_config::{Config, LogLevel};
use qbank::question_processor::DocumentGrammar;
use crate::common;

/// Default configuration is valid
#[test]
fn test_default_config_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.bank_grammar, DocumentGrammar::Bank);
    assert!(config.exam_files.is_empty());
}

/// Save and reload round-trips the configuration
#[test]
fn test_save_withDefaultConfig_shouldReloadIdentically() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.exam_files = vec![PathBuf::from("exams/one.txt"), PathBuf::from("exams/two.txt")];
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.exam_files, config.exam_files);
    assert_eq!(reloaded.bank_file, config.bank_file);
    assert_eq!(reloaded.log_level, LogLevel::Debug);
}

/// Missing required paths fail validation
#[test]
fn test_validate_withEmptyPaths_shouldFail() {
    let mut config = Config::default();
    config.bank_file = PathBuf::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.table_file = PathBuf::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.exam_dir = PathBuf::new();
    config.exam_files.clear();
    assert!(config.validate().is_err());
}

/// Explicit exam files take precedence over the directory scan
#[test]
fn test_exam_paths_withExplicitFiles_shouldUseThemVerbatim() {
    let mut config = Config::default();
    config.exam_files = vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")];

    let paths = config.exam_paths().unwrap();
    assert_eq!(paths, vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")]);
}

/// Directory scan finds .txt documents in stable sorted order
#[test]
fn test_exam_paths_withDirectoryScan_shouldSortResults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "b_exam.txt", "text").unwrap();
    common::create_test_file(&dir, "a_exam.txt", "text").unwrap();
    common::create_test_file(&dir, "notes.md", "text").unwrap();

    let mut config = Config::default();
    config.exam_dir = dir.clone();

    let paths = config.exam_paths().unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].file_name().unwrap(), "a_exam.txt");
    assert_eq!(paths[1].file_name().unwrap(), "b_exam.txt");
}

/// Unknown JSON is rejected with context
#[test]
fn test_from_file_withMalformedJson_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ nope")
        .unwrap();
    assert!(Config::from_file(&path).is_err());
}
