use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::question_processor::{
    contains_cjk, DocumentGrammar, QuestionBank, QuestionRecord,
};
use crate::translation::{annotate, matcher, MatchTier, TranslationStats, TranslationTable};
use crate::validation::{VerificationReport, VerificationService};

// @module: Application controller for question bank maintenance

/// Main application controller for bank regeneration, patching and
/// verification
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    #[allow(dead_code)]
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Regenerate the bank file from the upstream exam documents.
    ///
    /// Reads every configured exam document, slices its Part I section,
    /// extracts records, renumbers them sequentially across documents,
    /// resolves blank slots, looks up translations, generates annotations
    /// and overwrites the bank file with the rendered result.
    pub fn run_regenerate(&self) -> Result<TranslationStats> {
        let table = TranslationTable::load(&self.config.table_file)?;
        let records = self.collect_exam_records()?;
        if records.is_empty() {
            return Err(anyhow!("No question records extracted from exam documents"));
        }
        info!("Extracted {} question records", records.len());

        let mut stats = TranslationStats::new();
        let mut bank = QuestionBank::new(self.config.bank_file.clone());

        for mut record in records {
            let Some(answer_text) = record
                .option_text(record.answer_label)
                .map(|text| text.to_string())
            else {
                // Parse already validated the invariant; this only fires for
                // records assembled elsewhere
                warn!(
                    "Skipping question {}: answer label {} not among options",
                    record.index, record.answer_label
                );
                stats.record_skip();
                continue;
            };

            let query = match record.resolved_pair() {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("Skipping question {}: {}", record.index, e);
                    stats.record_skip();
                    continue;
                }
            };

            let outcome = matcher::lookup(&table, &query);
            stats.record(outcome.tier);
            record.translation = Some(outcome.pair);

            let annotation = annotate::annotate(&record, &answer_text);
            record.key_point = annotation.key_point;
            record.analysis = annotation.analysis;

            bank.records.push(record);
        }

        bank.write_to_file(&self.config.bank_file)
            .with_context(|| format!("Failed to write bank file: {:?}", self.config.bank_file))?;

        info!("Bank regenerated: {}", stats);
        Ok(stats)
    }

    /// Patch translation blocks in the existing bank file in place.
    ///
    /// Only records whose translation block still needs work (contains the
    /// dialogue marker but no CJK text) are rewritten; everything else is
    /// preserved byte-for-byte. Passthrough lookups leave the block
    /// untouched as well, so repeated runs converge.
    pub fn run_patch(&self) -> Result<TranslationStats> {
        let table = TranslationTable::load(&self.config.table_file)?;
        let content = FileManager::read_to_string(&self.config.bank_file)?;

        let mut stats = TranslationStats::new();
        let patched = QuestionBank::patch_translations(&content, |site| {
            if !needs_translation(site.existing_translation) {
                return None;
            }

            let query = match site.record.resolved_pair() {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("Leaving question {} untouched: {}", site.record.index, e);
                    stats.record_skip();
                    return None;
                }
            };

            let outcome = matcher::lookup(&table, &query);
            stats.record(outcome.tier);
            if outcome.tier == MatchTier::Passthrough {
                return None;
            }
            Some(format!(
                "--- {}\n    --- {}",
                outcome.pair.line_one, outcome.pair.line_two
            ))
        })
        .with_context(|| format!("Failed to patch bank file: {:?}", self.config.bank_file))?;

        FileManager::write_to_file(&self.config.bank_file, &patched)?;

        info!("Bank patched: {}", stats);
        Ok(stats)
    }

    /// Cross-check the regenerated bank against the upstream exam
    /// documents and print an advisory summary. Reporting only - the
    /// report is returned but nothing fails on discrepancies.
    pub fn run_verify(&self) -> Result<VerificationReport> {
        let reference = self.collect_exam_records()?;

        let derived = match FileManager::read_to_string(&self.config.bank_file) {
            Ok(content) => {
                match QuestionBank::parse_string(&content, self.config.bank_grammar) {
                    Ok(records) => records,
                    Err(e) => {
                        warn!("Bank file did not parse: {}", e);
                        Vec::new()
                    }
                }
            }
            Err(e) => {
                warn!("Bank file could not be read: {}", e);
                Vec::new()
            }
        };

        let report = VerificationService::new().compare(&reference, &derived);

        for line in report.to_string().lines() {
            info!("{}", line);
        }
        for issue in report.issues.iter().take(10) {
            info!("{}", issue);
        }
        if report.issues.len() > 10 {
            info!("... and {} more issues", report.issues.len() - 10);
        }

        Ok(report)
    }

    /// Extract records from every configured exam document, renumbered
    /// sequentially across documents in configuration order.
    fn collect_exam_records(&self) -> Result<Vec<QuestionRecord>> {
        let paths = self.config.exam_paths()?;
        if paths.is_empty() {
            return Err(anyhow!(
                "No exam documents found in {:?}",
                self.config.exam_dir
            ));
        }

        let progress = ProgressBar::new(paths.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );

        let mut records = Vec::new();
        for path in &paths {
            progress.set_message(display_name(path));
            if let Err(e) = self.collect_from_document(path, &mut records) {
                warn!("Skipping exam document {:?}: {}", path, e);
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        // Serial numbers restart per document; renumber across the batch
        for (i, record) in records.iter_mut().enumerate() {
            record.index = i + 1;
        }

        Ok(records)
    }

    /// Extract records from one exam document into `records`
    fn collect_from_document(
        &self,
        path: &Path,
        records: &mut Vec<QuestionRecord>,
    ) -> Result<()> {
        let content = FileManager::read_to_string(path)?;
        let Some(section) = QuestionBank::slice_part_one(&content) else {
            return Err(anyhow!("No Part I section found"));
        };

        match QuestionBank::parse_string(section, DocumentGrammar::Exam) {
            Ok(mut parsed) => {
                info!("{}: {} records", display_name(path), parsed.len());
                records.append(&mut parsed);
                Ok(())
            }
            // Grammar mismatch is recoverable: report and continue with
            // zero records from this document
            Err(e) => {
                warn!("{}: {}", display_name(path), e);
                Ok(())
            }
        }
    }
}

/// True when a translation block was never filled in: it still has the
/// dialogue marker shape but no target-language text
fn needs_translation(block: &str) -> bool {
    block.contains("---") && !contains_cjk(block)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
