/*!
 * Cross-document verification of a regenerated question bank.
 *
 * Compares the record sequence parsed from the original exam documents
 * (the reference) against the sequence parsed from the regenerated bank
 * (the derived set). This is a reporting-only pass: it mutates nothing,
 * raises nothing, and its output is an advisory console summary rather
 * than a pass/fail gate.
 */

// Re-export main types for easier usage
pub use self::report::{VerificationIssue, VerificationReport};
pub use self::service::VerificationService;

// Submodules
pub mod report;
pub mod service;
