use crate::question_processor::QuestionRecord;

// @module: Key-point and analysis generation

/// Annotation pair attached to a rendered record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// One-line key point for the 【考点·高效记忆】 section
    pub key_point: String,

    /// Explanation for the 【解析·秒选思路】 section
    pub analysis: String,
}

/// Generate an annotation for a record from dialogue keywords.
///
/// `answer_text` is the resolved text of the correct option. The rules are
/// keyword heuristics over the English dialogue; when none applies, a
/// generic scenario annotation quoting the (truncated) dialogue is produced.
pub fn annotate(record: &QuestionRecord, answer_text: &str) -> Annotation {
    let d1_lower = record.line_one.to_lowercase();
    let d2_lower = record.line_two.to_lowercase();
    let answer_lower = answer_text.to_lowercase();

    if d1_lower.contains("would you like") || d1_lower.contains("will you") {
        if d2_lower.contains("but") {
            return Annotation {
                key_point: "日常交际用语：接受邀请但表示遗憾".to_string(),
                analysis: format!(
                    "看到\"but...\"（但是...）的转折，表示无法参加但愿意去，用\"{}\"表示接受邀请，然后用but转折说明原因。",
                    answer_text
                ),
            };
        }
        if answer_lower.contains("thank") {
            return Annotation {
                key_point: "日常交际用语：礼貌拒绝邀请".to_string(),
                analysis: format!(
                    "看到\"Would you like...\"（你想...）的邀请，礼貌拒绝用\"{}\"。",
                    answer_text
                ),
            };
        }
    } else if d1_lower.contains("do you think") {
        return Annotation {
            key_point: "日常交际用语：表达观点和否定".to_string(),
            analysis: format!(
                "看到\"Do you think...\"（你认为...）的否定回答，固定用\"{}\"（我不这么认为）。",
                answer_text
            ),
        };
    } else if d1_lower.contains("may i help")
        || d1_lower.contains("can i help")
        || d1_lower.contains("help you")
    {
        return Annotation {
            key_point: "日常交际用语：商店服务用语".to_string(),
            analysis: format!(
                "看到\"how much is this...\"（...多少钱），说明是购物场景，店员问\"{}\"（需要帮忙吗）。",
                answer_text
            ),
        };
    } else if d1_lower.contains("would you mind") {
        return Annotation {
            key_point: "日常交际用语：同意请求并递送物品".to_string(),
            analysis: format!(
                "看到\"Would you mind if...\"（你介意...）和\"Of course not\"（当然不），表示同意，递送物品用\"{}\"（给你）。",
                answer_text
            ),
        };
    } else if d1_lower.contains("thank") || d1_lower.contains("thanks") {
        return Annotation {
            key_point: "日常交际用语：回应感谢".to_string(),
            analysis: format!("看到感谢的话，回应用\"{}\"表示\"不客气\"。", answer_text),
        };
    } else if d1_lower.contains("sorry")
        || d1_lower.contains("apologize")
        || d1_lower.contains("forgive")
    {
        return Annotation {
            key_point: "日常交际用语：回应道歉".to_string(),
            analysis: format!("看到道歉的话，回应用\"{}\"表示\"没关系\"。", answer_text),
        };
    } else if d1_lower.contains("speak") || d1_lower.contains("language") {
        return Annotation {
            key_point: "日常交际用语：询问语言能力".to_string(),
            analysis: format!(
                "看到\"A little\"（一点），说明问的是能力程度，用\"{}\"询问语言能力。",
                answer_text
            ),
        };
    } else if d1_lower.contains("what") && d1_lower.contains("like") {
        return Annotation {
            key_point: "日常交际用语：询问评价和看法".to_string(),
            analysis: format!(
                "看到\"How do you like...\"（你觉得...）询问评价，回答应该描述内容，选\"{}\"。",
                answer_text
            ),
        };
    }

    Annotation {
        key_point: "日常交际用语：情景对话".to_string(),
        analysis: format!(
            "根据对话语境，\"{}...\"和\"{}...\"的对应关系，选择\"{}\"最符合日常交际习惯。",
            truncate_chars(&record.line_one, 30),
            truncate_chars(&record.line_two, 30),
            answer_text
        ),
    }
}

/// Truncate to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
