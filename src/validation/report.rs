use std::fmt;

// @module: Verification issue kinds and report

/// One discrepancy found between the reference and derived sequences.
///
/// Positions are sequence positions (0-based order of comparison), not the
/// records' own serial numbers - the two documents may number differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationIssue {
    /// Answer labels differ at this position
    AnswerMismatch {
        position: usize,
        reference: char,
        derived: char,
        /// Opening of the first dialogue line, for locating the record
        context: String,
    },

    /// Dialogue text (first line or resolved second line) differs
    DialogueMismatch {
        position: usize,
        reference: String,
        derived: String,
    },

    /// The derived record's translation block is judged incomplete: the
    /// untranslated source text still appears inside it, or it carries no
    /// target-language text at all
    IncompleteTranslation {
        position: usize,
        /// Serial of the derived record
        index: usize,
    },
}

impl VerificationIssue {
    pub fn position(&self) -> usize {
        match self {
            Self::AnswerMismatch { position, .. }
            | Self::DialogueMismatch { position, .. }
            | Self::IncompleteTranslation { position, .. } => *position,
        }
    }
}

impl fmt::Display for VerificationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnswerMismatch {
                position,
                reference,
                derived,
                context,
            } => write!(
                f,
                "position {}: answer mismatch (reference {}, derived {}) near \"{}\"",
                position + 1,
                reference,
                derived,
                context
            ),
            Self::DialogueMismatch {
                position,
                reference,
                derived,
            } => write!(
                f,
                "position {}: dialogue mismatch (reference \"{}\", derived \"{}\")",
                position + 1,
                reference,
                derived
            ),
            Self::IncompleteTranslation { position, index } => write!(
                f,
                "position {}: question {} translation incomplete or untranslated",
                position + 1,
                index
            ),
        }
    }
}

/// Aggregated result of one verification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Records parsed from the original exam documents
    pub reference_total: usize,

    /// Records parsed from the regenerated bank
    pub derived_total: usize,

    /// All discrepancies, in comparison order
    pub issues: Vec<VerificationIssue>,
}

impl VerificationReport {
    pub fn answer_mismatches(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, VerificationIssue::AnswerMismatch { .. }))
            .count()
    }

    pub fn dialogue_mismatches(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, VerificationIssue::DialogueMismatch { .. }))
            .count()
    }

    pub fn incomplete_translations(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, VerificationIssue::IncompleteTranslation { .. }))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.reference_total == self.derived_total
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Verification summary ===")?;
        writeln!(f, "Reference records: {}", self.reference_total)?;
        writeln!(f, "Derived records:   {}", self.derived_total)?;
        writeln!(f, "Answer mismatches: {}", self.answer_mismatches())?;
        writeln!(f, "Dialogue mismatches: {}", self.dialogue_mismatches())?;
        writeln!(
            f,
            "Incomplete translations: {}",
            self.incomplete_translations()
        )?;
        Ok(())
    }
}
