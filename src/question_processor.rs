use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use log::{warn, debug};
use anyhow::{Result, Context};

use crate::errors::{ParseError, RecordError};

// @module: Question record parsing and rendering

/// Literal written on the answer-check line of every rendered record.
pub const CHECK_RESULT_LINE: &str = "核对结果：正确";

/// Header of the fixed vocabulary-note block.
pub const VOCAB_HEADER: &str = "核心词（音标+拆解记忆）";

/// Fixed vocabulary note appended to every rendered record.
pub const VOCAB_NOTE: &str = "• dialogue /ˈdaɪəlɒɡ/：dia-（两者之间）+ logue（说）→ 对话";

// @const: Full-record pattern for the generated bank layout
static BANK_RECORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)第(\d+)题\n\n原题：--- (.*?)\n    --- (.*?)\n选项：\nA\) (.*?)\nB\) (.*?)\nC\) (.*?)\nD\) (.*?)\n你的答案：([A-D])\n核对结果：正确\n译文：(.*?)\n\n【考点·高效记忆】\n(.*?)\n\n【解析·秒选思路】\n(.*?)\n\n核心词",
    )
    .unwrap()
});

// @const: Pattern for the upstream exam layout used by the collaborator documents
static EXAM_RECORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(\d+)\.\s*---(.*?)---\s*(.*?)\s*A[).]\s*(.*?)\s*B[).]\s*(.*?)\s*C[).]\s*(.*?)\s*D[).]\s*(.*?)\s*(?:\*\*)?答案[：:]\s*([A-D])",
    )
    .unwrap()
});

// @const: Bank pattern split around the translation block, for in-place patching
static BANK_PATCH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(第(\d+)题\n\n原题：--- (.*?)\n    --- (.*?)\n选项：\nA\) (.*?)\nB\) (.*?)\nC\) (.*?)\nD\) (.*?)\n你的答案：([A-D])\n核对结果：正确\n译文：)(.*?)(\n\n【考点)",
    )
    .unwrap()
});

/// Grammar variant describing the shape of a question document.
///
/// The bank file this tool maintains and the upstream exam documents it
/// consumes use different layouts; both are supported as configurations of
/// the same extractor rather than separate parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentGrammar {
    /// Generated bank layout (`第N题` … `核心词`).
    #[default]
    Bank,
    /// Upstream exam layout (`N. ---…---… A) … 答案：X`).
    Exam,
}

/// One ordered dialogue pair, either source text or its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialoguePair {
    /// First speaker's line
    pub line_one: String,

    /// Second speaker's line
    pub line_two: String,
}

impl DialoguePair {
    pub fn new(line_one: impl Into<String>, line_two: impl Into<String>) -> Self {
        DialoguePair {
            line_one: line_one.into(),
            line_two: line_two.into(),
        }
    }
}

/// One labeled answer option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    /// Option label (`A`..`D` in well-formed records)
    pub label: char,

    /// Option text
    pub text: String,
}

/// One parsed multiple-choice dialogue question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    // @field: Display-order serial, unique within a document
    pub index: usize,

    // @field: First dialogue line as written in the source
    pub line_one: String,

    // @field: Second dialogue line, possibly a blank sentinel
    pub line_two: String,

    // @field: Labeled options in document order
    pub options: Vec<AnswerOption>,

    // @field: Label of the correct option
    pub answer_label: char,

    // @field: Translation block, when the document carries one
    pub translation: Option<DialoguePair>,

    // @field: Key-point annotation (empty for upstream exam records)
    pub key_point: String,

    // @field: Analysis annotation (empty for upstream exam records)
    pub analysis: String,
}

impl QuestionRecord {
    /// Creates a new record without validation - used by tests and callers
    /// that assemble records programmatically.
    #[allow(dead_code)]
    pub fn new(
        index: usize,
        line_one: String,
        line_two: String,
        options: Vec<AnswerOption>,
        answer_label: char,
    ) -> Self {
        QuestionRecord {
            index,
            line_one,
            line_two,
            options,
            answer_label,
            translation: None,
            key_point: String::new(),
            analysis: String::new(),
        }
    }

    // @creates: Validated question record
    // @validates: Answer label membership and non-empty dialogue
    pub fn new_validated(
        index: usize,
        line_one: String,
        line_two: String,
        options: Vec<AnswerOption>,
        answer_label: char,
    ) -> Result<Self, RecordError> {
        let record = Self::new(index, line_one, line_two, options, answer_label);
        record.validate()?;
        Ok(record)
    }

    /// Check the structural invariants: the answer label names one of this
    /// record's own options, and both dialogue lines resolve to non-empty
    /// text.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.option_text(self.answer_label).is_none() {
            return Err(RecordError::UnknownAnswerLabel {
                index: self.index,
                label: self.answer_label,
            });
        }
        if self.line_one.trim().is_empty() {
            return Err(RecordError::EmptyDialogue { index: self.index });
        }
        // line_two may be a sentinel; what matters is that it resolves to
        // something non-empty
        let resolved = self.resolved_line_two()?;
        if resolved.trim().is_empty() {
            return Err(RecordError::EmptyDialogue { index: self.index });
        }
        Ok(())
    }

    /// Text of the option carrying the given label, if present.
    pub fn option_text(&self, label: char) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.label == label)
            .map(|opt| opt.text.as_str())
    }

    /// Resolve the second dialogue line: a blank sentinel is replaced by the
    /// text of the correct option, anything else is returned as written.
    ///
    /// Resolution must happen before translation lookup - the lookup key is
    /// defined over the resolved pair.
    pub fn resolved_line_two(&self) -> Result<String, RecordError> {
        let answer_text = self
            .option_text(self.answer_label)
            .ok_or(RecordError::UnknownAnswerLabel {
                index: self.index,
                label: self.answer_label,
            })?;

        if is_blank_sentinel(&self.line_two) {
            Ok(answer_text.trim().to_string())
        } else {
            Ok(self.line_two.trim().to_string())
        }
    }

    /// The resolved source dialogue pair used as the translation lookup key.
    pub fn resolved_pair(&self) -> Result<DialoguePair, RecordError> {
        Ok(DialoguePair::new(
            self.line_one.trim(),
            self.resolved_line_two()?,
        ))
    }
}

impl fmt::Display for QuestionRecord {
    /// Renders the bank wire format. Section markers and indentation are the
    /// on-disk format; the extractor must be able to re-parse this output
    /// into an identical record.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "第{}题", self.index)?;
        writeln!(f)?;
        writeln!(f, "原题：--- {}", self.line_one)?;
        writeln!(f, "    --- {}", self.line_two)?;
        writeln!(f, "选项：")?;
        for opt in &self.options {
            writeln!(f, "{}) {}", opt.label, opt.text)?;
        }
        writeln!(f, "你的答案：{}", self.answer_label)?;
        writeln!(f, "{}", CHECK_RESULT_LINE)?;
        let translation = match &self.translation {
            Some(pair) => pair.clone(),
            // Untranslated records render their resolved source pair, the
            // same silent degradation the matcher's passthrough tier applies
            None => DialoguePair::new(
                self.line_one.trim(),
                self.resolved_line_two()
                    .unwrap_or_else(|_| self.line_two.trim().to_string()),
            ),
        };
        writeln!(f, "译文：--- {}", translation.line_one)?;
        writeln!(f, "    --- {}", translation.line_two)?;
        writeln!(f)?;
        writeln!(f, "【考点·高效记忆】")?;
        writeln!(f, "{}", self.key_point)?;
        writeln!(f)?;
        writeln!(f, "【解析·秒选思路】")?;
        writeln!(f, "{}", self.analysis)?;
        writeln!(f)?;
        writeln!(f, "{}", VOCAB_HEADER)?;
        writeln!(f)?;
        writeln!(f, "{}", VOCAB_NOTE)?;
        writeln!(f)
    }
}

/// True when the line is a blank slot standing in for the answer-bearing
/// dialogue line: a run of one or more underscores, surrounding whitespace
/// ignored. Observed lengths vary (8, 10, 14, 19), so length is not checked.
pub fn is_blank_sentinel(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '_')
}

/// True when the text contains at least one CJK unified ideograph. Used to
/// decide whether a translation block still needs work.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// Everything the patch callback gets to see about one matched bank record.
#[derive(Debug)]
pub struct PatchSite<'a> {
    pub record: QuestionRecord,
    pub existing_translation: &'a str,
}

/// Collection of question records parsed from one document
#[derive(Debug)]
pub struct QuestionBank {
    /// Source filename
    pub source_file: PathBuf,

    /// List of question records in document order
    pub records: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Create an empty bank for the given source file
    pub fn new(source_file: PathBuf) -> Self {
        QuestionBank {
            source_file,
            records: Vec::new(),
        }
    }

    /// Parse a question document from disk
    pub fn from_file<P: AsRef<Path>>(path: P, grammar: DocumentGrammar) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read question document: {}", path.display()))?;
        let records = Self::parse_string(&content, grammar)
            .with_context(|| format!("Failed to parse question document: {}", path.display()))?;
        Ok(QuestionBank {
            source_file: path.to_path_buf(),
            records,
        })
    }

    /// Parse document text into question records under the given grammar.
    ///
    /// Pure function over the input text. Records that violate the
    /// answer-label invariant are skipped with a warning; the rest of the
    /// batch continues. Zero record boundaries in non-empty input is a
    /// grammar/input mismatch, reported as `ParseError` - it means the
    /// wrong grammar was chosen, not that the document has zero questions.
    pub fn parse_string(
        content: &str,
        grammar: DocumentGrammar,
    ) -> Result<Vec<QuestionRecord>, ParseError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut matched = 0usize;

        match grammar {
            DocumentGrammar::Bank => {
                for caps in BANK_RECORD_REGEX.captures_iter(content) {
                    matched += 1;
                    let index = caps[1].parse::<usize>().unwrap_or(0);
                    let options = vec![
                        AnswerOption { label: 'A', text: caps[4].trim().to_string() },
                        AnswerOption { label: 'B', text: caps[5].trim().to_string() },
                        AnswerOption { label: 'C', text: caps[6].trim().to_string() },
                        AnswerOption { label: 'D', text: caps[7].trim().to_string() },
                    ];
                    let answer_label = caps[8].chars().next().unwrap_or('A');
                    let mut record = match QuestionRecord::new_validated(
                        index,
                        caps[2].to_string(),
                        caps[3].to_string(),
                        options,
                        answer_label,
                    ) {
                        Ok(record) => record,
                        Err(e) => {
                            warn!("Skipping invalid question record: {}", e);
                            continue;
                        }
                    };
                    record.translation = parse_translation_block(&caps[9]);
                    record.key_point = caps[10].to_string();
                    record.analysis = caps[11].to_string();
                    records.push(record);
                }
            }
            DocumentGrammar::Exam => {
                for caps in EXAM_RECORD_REGEX.captures_iter(content) {
                    matched += 1;
                    let index = caps[1].parse::<usize>().unwrap_or(0);
                    let options = vec![
                        AnswerOption { label: 'A', text: caps[4].trim().to_string() },
                        AnswerOption { label: 'B', text: caps[5].trim().to_string() },
                        AnswerOption { label: 'C', text: caps[6].trim().to_string() },
                        AnswerOption { label: 'D', text: caps[7].trim().to_string() },
                    ];
                    let answer_label = caps[8].chars().next().unwrap_or('A');
                    match QuestionRecord::new_validated(
                        index,
                        caps[2].trim().to_string(),
                        caps[3].trim().to_string(),
                        options,
                        answer_label,
                    ) {
                        Ok(record) => records.push(record),
                        Err(e) => warn!("Skipping invalid question record: {}", e),
                    }
                }
            }
        }

        if matched == 0 {
            return Err(ParseError::GrammarMismatch { grammar });
        }

        debug!(
            "Parsed {} question records ({} matched) under {:?} grammar",
            records.len(),
            matched,
            grammar
        );
        Ok(records)
    }

    /// Slice the "Part I Use of Language" section out of a full exam
    /// document. The section runs from its heading to the next part heading
    /// or end of file. Returns `None` when the document has no Part I.
    pub fn slice_part_one(content: &str) -> Option<&str> {
        let start = content.find("**Part I Use of Language")?;
        let rest = &content[start..];
        let end = ["**Part II", "**Part III"]
            .iter()
            .filter_map(|marker| rest[1..].find(marker).map(|pos| pos + 1))
            .min()
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// Render all records back into the bank wire format
    pub fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.to_string());
        }
        out
    }

    /// Write the rendered bank to a file, replacing prior content
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create bank file: {}", path.display()))?;
        file.write_all(self.render().as_bytes())
            .with_context(|| format!("Failed to write bank file: {}", path.display()))?;

        Ok(())
    }

    /// Rewrite translation blocks in-place across a bank document.
    ///
    /// Every record matched by the bank grammar is offered to `rewrite`;
    /// returning `Some(text)` substitutes the translation block, `None`
    /// leaves the record byte-identical. All bytes outside matched records
    /// are preserved. Structurally invalid records are never offered.
    pub fn patch_translations<F>(content: &str, mut rewrite: F) -> Result<String, ParseError>
    where
        F: FnMut(&PatchSite) -> Option<String>,
    {
        if content.trim().is_empty() {
            return Ok(String::new());
        }

        let mut matched = 0usize;
        let patched = BANK_PATCH_REGEX
            .replace_all(content, |caps: &regex::Captures| {
                matched += 1;
                let existing = caps.get(10).map_or("", |m| m.as_str());
                let index = caps[2].parse::<usize>().unwrap_or(0);
                let options = vec![
                    AnswerOption { label: 'A', text: caps[5].trim().to_string() },
                    AnswerOption { label: 'B', text: caps[6].trim().to_string() },
                    AnswerOption { label: 'C', text: caps[7].trim().to_string() },
                    AnswerOption { label: 'D', text: caps[8].trim().to_string() },
                ];
                let answer_label = caps[9].chars().next().unwrap_or('A');
                let record = match QuestionRecord::new_validated(
                    index,
                    caps[3].to_string(),
                    caps[4].to_string(),
                    options,
                    answer_label,
                ) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("Leaving invalid question record untouched: {}", e);
                        return caps[0].to_string();
                    }
                };

                let site = PatchSite {
                    record,
                    existing_translation: existing,
                };
                match rewrite(&site) {
                    Some(next) => format!("{}{}{}", &caps[1], next, &caps[11]),
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        if matched == 0 {
            return Err(ParseError::GrammarMismatch {
                grammar: DocumentGrammar::Bank,
            });
        }

        Ok(patched)
    }
}

/// Parse a rendered translation block (`--- first\n    --- second`) back into
/// a dialogue pair. Blocks that do not have the two-line shape yield `None`.
pub fn parse_translation_block(block: &str) -> Option<DialoguePair> {
    let stripped = block.strip_prefix("--- ")?;
    let (first, rest) = stripped.split_once('\n')?;
    let second = rest.trim_start().strip_prefix("--- ")?;
    Some(DialoguePair::new(first, second))
}

impl fmt::Display for QuestionBank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Question Bank")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Records: {}", self.records.len())?;
        Ok(())
    }
}
