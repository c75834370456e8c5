/*!
 * # qbank - Question Bank Regeneration and Translation Patching
 *
 * A Rust library for maintaining a bilingual exam-question bank built from
 * dialogue-based multiple-choice questions.
 *
 * ## Features
 *
 * - Extract question records from semi-structured text documents under two
 *   grammar configurations (the generated bank layout and the upstream
 *   exam layout)
 * - Resolve fill-in-the-blank dialogue slots from the correct answer
 * - Patch in translations through a layered, deterministic lookup strategy
 *   (exact, punctuation-normalized, fragment, passthrough)
 * - Generate key-point and analysis annotations from dialogue keywords
 * - Render the bank wire format byte-for-byte, round-trippable through the
 *   extractor
 * - Cross-check a regenerated bank against the original exam documents
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `question_processor`: Record extraction, slot resolution and rendering
 * - `translation`: Static-table translation lookup:
 *   - `translation::table`: Ordered immutable table loaded from JSON
 *   - `translation::matcher`: Layered matching and run statistics
 *   - `translation::annotate`: Key-point/analysis generation
 * - `validation`: Cross-document verification reporting
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod question_processor;
pub mod translation;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ParseError, RecordError};
pub use question_processor::{
    DialoguePair, DocumentGrammar, QuestionBank, QuestionRecord,
};
pub use translation::{MatchOutcome, MatchTier, TranslationStats, TranslationTable};
pub use validation::{VerificationReport, VerificationService};
