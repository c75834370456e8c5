/*!
 * Translation lookup for question records.
 *
 * This module contains the static-table translation machinery, split into
 * several submodules:
 *
 * - `table`: Immutable ordered translation table loaded from JSON
 * - `matcher`: Layered lookup strategy (exact, normalized, fragment,
 *   passthrough) and per-run statistics
 * - `annotate`: Key-point and analysis generation from dialogue keywords
 */

// Re-export main types for easier usage
pub use self::table::{TableEntry, TranslationTable};
pub use self::matcher::{MatchOutcome, MatchTier, TranslationStats};
pub use self::annotate::Annotation;

// Submodules
pub mod annotate;
pub mod matcher;
pub mod table;
