use std::fmt;
use log::debug;

use crate::question_processor::DialoguePair;
use super::table::TranslationTable;

// @module: Layered translation matching

// @const: Terminal punctuation stripped by the normalized tier
const TERMINAL_PUNCTUATION: [char; 3] = ['.', '?', '!'];

/// Which precedence level of the lookup strategy produced a result.
///
/// A miss falls through to `Passthrough` rather than an error; callers
/// count passthroughs and report them at the end of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Trimmed pair equals a table key exactly
    Exact,
    /// Pair equals a table key once terminal punctuation is stripped
    Normalized,
    /// First lines contain each other as substrings
    Fragment,
    /// No table entry matched; the original pair is returned unchanged
    Passthrough,
}

impl MatchTier {
    // @returns: Lowercase tier identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normalized => "normalized",
            Self::Fragment => "fragment",
            Self::Passthrough => "passthrough",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The pair a lookup resolved to, and the tier that resolved it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Translated pair, or the original pair for a passthrough
    pub pair: DialoguePair,

    /// Tier that produced the pair
    pub tier: MatchTier,
}

/// Look up a resolved dialogue pair in the table.
///
/// Tiers are tried in strict priority order, stopping at the first hit;
/// within a tier the first entry in table order wins. For a fixed table the
/// result is fully deterministic - no scoring, no ranking.
pub fn lookup(table: &TranslationTable, query: &DialoguePair) -> MatchOutcome {
    let query_one = query.line_one.trim();
    let query_two = query.line_two.trim();

    // Tier 1: exact pair equality, case- and punctuation-sensitive
    for entry in table.iter() {
        if entry.source.line_one.trim() == query_one && entry.source.line_two.trim() == query_two {
            debug!("Exact match for '{}'", query_one);
            return MatchOutcome {
                pair: entry.translation.clone(),
                tier: MatchTier::Exact,
            };
        }
    }

    // Tier 2: equality after stripping terminal punctuation from both sides
    let norm_one = strip_terminal_punctuation(query_one);
    let norm_two = strip_terminal_punctuation(query_two);
    for entry in table.iter() {
        if strip_terminal_punctuation(&entry.source.line_one) == norm_one
            && strip_terminal_punctuation(&entry.source.line_two) == norm_two
        {
            debug!("Normalized match for '{}'", query_one);
            return MatchOutcome {
                pair: entry.translation.clone(),
                tier: MatchTier::Normalized,
            };
        }
    }

    // Tier 3: first-line fragment containment, either direction. Empty
    // first lines are excluded - an empty string is a substring of
    // everything and would always select the first entry.
    if !query_one.is_empty() {
        for entry in table.iter() {
            let key_one = entry.source.line_one.trim();
            if key_one.is_empty() {
                continue;
            }
            if query_one.contains(key_one) || key_one.contains(query_one) {
                debug!("Fragment match for '{}' via '{}'", query_one, key_one);
                return MatchOutcome {
                    pair: entry.translation.clone(),
                    tier: MatchTier::Fragment,
                };
            }
        }
    }

    // Tier 4: passthrough, counted but never an error
    debug!("No table entry for '{}', passing through untranslated", query_one);
    MatchOutcome {
        pair: DialoguePair::new(query_one, query_two),
        tier: MatchTier::Passthrough,
    }
}

/// Strip the fixed set of terminal punctuation from the end of a line.
/// Leading punctuation (ellipsis openers and the like) is part of the key
/// and must survive.
fn strip_terminal_punctuation(line: &str) -> String {
    line.trim()
        .trim_end_matches(|c| TERMINAL_PUNCTUATION.contains(&c))
        .trim_end()
        .to_string()
}

/// Per-run translation counters, reported to the user at the end of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Total records offered to the matcher
    pub total: usize,

    /// Exact-tier hits
    pub exact: usize,

    /// Normalized-tier hits
    pub normalized: usize,

    /// Fragment-tier hits
    pub fragment: usize,

    /// Records left untranslated
    pub passthrough: usize,

    /// Structurally invalid records skipped before lookup
    pub skipped: usize,
}

impl TranslationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one lookup outcome
    pub fn record(&mut self, tier: MatchTier) {
        self.total += 1;
        match tier {
            MatchTier::Exact => self.exact += 1,
            MatchTier::Normalized => self.normalized += 1,
            MatchTier::Fragment => self.fragment += 1,
            MatchTier::Passthrough => self.passthrough += 1,
        }
    }

    /// Record one record skipped before lookup
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Records that received a translation from any tier
    pub fn translated(&self) -> usize {
        self.exact + self.normalized + self.fragment
    }
}

impl fmt::Display for TranslationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} translated ({} exact, {} normalized, {} fragment), {} passthrough, {} skipped",
            self.total,
            self.translated(),
            self.exact,
            self.normalized,
            self.fragment,
            self.passthrough,
            self.skipped
        )
    }
}
