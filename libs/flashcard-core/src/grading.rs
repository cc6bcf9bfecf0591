//! Prompt construction and response parsing for the answer judge.
//!
//! This module never talks to the network. It builds the conversation sent
//! to a language-model judge and turns the judge's reply into a
//! [`GradeResult`].

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, Result};
use crate::types::GradeResult;

/// Built-in grading instruction, used unless configuration supplies another.
pub const DEFAULT_RUBRIC: &str = "You are grading a flashcard answer. \
You will receive a question, the user's answer and the correct answer, separated by '||'. \
Judge how well the user's answer matches the meaning of the correct answer. \
Reply with a single JSON object of the form {\"score\": <number>, \"reflection\": <string>}. \
The score is a number from 0.0 to 1.0 where 1.0 means fully correct and 0.0 means completely wrong or unrelated. \
Minor wording differences that keep the meaning should still score high. \
The reflection briefly tells the user what they got right or wrong and states the correct answer. \
Do not include anything outside the JSON object.";

/// Speaker of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeMessage {
    pub role: Role,
    pub content: String,
}

impl JudgeMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A calibration example shown to the judge before the live query.
#[derive(Debug, Clone, Copy)]
pub struct Exemplar {
    pub question: &'static str,
    pub user_answer: &'static str,
    pub correct_answer: &'static str,
    pub score: f64,
    pub reflection: &'static str,
}

impl Exemplar {
    fn judgment(&self) -> String {
        serde_json::json!({ "score": self.score, "reflection": self.reflection }).to_string()
    }
}

const VADER_QUESTION: &str =
    "What was Darth Vader's famous quote to Luke Skywalker in 'The Empire Strikes Back'?";
const VADER_ANSWER: &str = "No, Luke, I am your father";

/// Four exemplars spanning the score range, best first.
pub const EXEMPLARS: [Exemplar; 4] = [
    Exemplar {
        question: VADER_QUESTION,
        user_answer: "No, Luke, I am your father",
        correct_answer: VADER_ANSWER,
        score: 1.0,
        reflection: "That's correct! Darth Vader's iconic quote is indeed, 'No, Luke, I am your father'",
    },
    Exemplar {
        question: VADER_QUESTION,
        user_answer: "I am your father",
        correct_answer: VADER_ANSWER,
        score: 0.89,
        reflection: "That's pretty close! However, the correct quote is, 'No, Luke, I am your father'; the 'no' plays a vital role in the quote's authenticity",
    },
    Exemplar {
        question: VADER_QUESTION,
        user_answer: "I am a distant relative of your father",
        correct_answer: VADER_ANSWER,
        score: 0.48,
        reflection: "Hmm... not quite! Darth Vader is not a distant relative of Luke Skywalker; he is his father. The correct quote is, 'No, Luke, I am your father'",
    },
    Exemplar {
        question: VADER_QUESTION,
        user_answer: "I hate sand",
        correct_answer: VADER_ANSWER,
        score: 0.0,
        reflection: "Unfortunately this is incorrect. Darth Vader did not inform Luke Skywalker of his hatred for sand. Rather, he said, 'No, Luke, I am your father'",
    },
];

/// Format a question/answer triple the way the judge sees it.
pub fn format_query(question: &str, user_answer: &str, correct_answer: &str) -> String {
    format!(
        "Question: {} || User answer: {} || Correct answer: {}",
        question, user_answer, correct_answer
    )
}

/// Build the full conversation: rubric, exemplar pairs, then the live query.
pub fn build_conversation(
    rubric: &str,
    question: &str,
    user_answer: &str,
    correct_answer: &str,
) -> Vec<JudgeMessage> {
    let mut messages = Vec::with_capacity(2 + EXEMPLARS.len() * 2);
    messages.push(JudgeMessage::new(Role::System, rubric));

    for example in &EXEMPLARS {
        messages.push(JudgeMessage::new(
            Role::User,
            format_query(example.question, example.user_answer, example.correct_answer),
        ));
        messages.push(JudgeMessage::new(Role::Assistant, example.judgment()));
    }

    messages.push(JudgeMessage::new(
        Role::User,
        format_query(question, user_answer, correct_answer),
    ));
    messages
}

#[derive(Debug, Deserialize)]
struct RawJudgment {
    score: RawScore,
    reflection: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

impl RawScore {
    fn to_f64(&self) -> Result<f64> {
        let value = match self {
            RawScore::Number(n) => *n,
            RawScore::Text(s) => s.trim().parse::<f64>().map_err(|_| GradeError::InvalidScore {
                value: s.clone(),
            })?,
        };

        if !value.is_finite() {
            return Err(GradeError::InvalidScore {
                value: value.to_string(),
            });
        }
        Ok(value.clamp(0.0, 1.0))
    }
}

/// Parse the judge's reply into a grade.
///
/// Accepts a bare JSON object or one wrapped in a markdown code fence.
/// Numeric strings are accepted for `score`, which is clamped into [0, 1].
pub fn parse_judgment(content: &str) -> Result<GradeResult> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(GradeError::EmptyResponse);
    }

    let raw: RawJudgment = serde_json::from_str(body)?;
    Ok(GradeResult {
        score: raw.score.to_f64()?,
        reflection: raw.reflection,
    })
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
