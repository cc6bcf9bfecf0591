//! Answer grading against a language-model judge.

use std::sync::Arc;

use async_trait::async_trait;
use flashcard_core::grading::{build_conversation, parse_judgment, JudgeMessage};
use flashcard_core::{GradeError, GradeResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A chat-style model that answers a role-tagged conversation with one
/// assistant turn.
#[async_trait]
pub trait Judge: Send + Sync {
    async fn complete(&self, messages: &[JudgeMessage]) -> Result<String, GradeError>;
}

// === OpenAI-compatible chat completions ===

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [JudgeMessage],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Judge backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiJudge {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiJudge {
    pub fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Client::new(),
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.grader_model.clone(),
        )
    }
}

#[async_trait]
impl Judge for OpenAiJudge {
    async fn complete(&self, messages: &[JudgeMessage]) -> Result<String, GradeError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GradeError::Judge(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GradeError::Judge(format!("{} - {}", status, message)));
        }

        let response: ChatResponse = resp
            .json()
            .await
            .map_err(|e| GradeError::Judge(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GradeError::EmptyResponse)
    }
}

// === Grader ===

/// Grades free-text answers. Never fails: anything that goes wrong while
/// grading yields a worst-case score with the reason as reflection.
pub struct Grader {
    judge: Arc<dyn Judge>,
    rubric: String,
}

impl Grader {
    pub fn new(judge: Arc<dyn Judge>, rubric: impl Into<String>) -> Self {
        Self {
            judge,
            rubric: rubric.into(),
        }
    }

    /// Grade `user_answer` against `correct_answer`. Makes exactly one judge call.
    pub async fn grade(&self, question: &str, user_answer: &str, correct_answer: &str) -> GradeResult {
        match self.try_grade(question, user_answer, correct_answer).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Grading failed, falling back to worst score");
                GradeResult::fallback(&e)
            }
        }
    }

    async fn try_grade(
        &self,
        question: &str,
        user_answer: &str,
        correct_answer: &str,
    ) -> Result<GradeResult, GradeError> {
        let messages = build_conversation(&self.rubric, question, user_answer, correct_answer);
        let content = self.judge.complete(&messages).await?;
        parse_judgment(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcard_core::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeJudge {
        reply: std::result::Result<String, String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<JudgeMessage>>,
    }

    impl FakeJudge {
        fn replying(content: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(content.to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Judge for FakeJudge {
        async fn complete(&self, messages: &[JudgeMessage]) -> Result<String, GradeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = messages.to_vec();
            self.reply.clone().map_err(GradeError::Judge)
        }
    }

    #[tokio::test]
    async fn returns_parsed_judgment() {
        let judge = FakeJudge::replying(r#"{"score": 0.92, "reflection": "Spot on."}"#);
        let grader = Grader::new(judge.clone(), "rubric");

        let result = grader.grade("2 + 2?", "four", "4").await;

        assert_eq!(result.score, 0.92);
        assert_eq!(result.reflection, "Spot on.");
        assert_eq!(judge.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sends_rubric_exemplars_and_query() {
        let judge = FakeJudge::replying(r#"{"score": 0.5, "reflection": "ok"}"#);
        let grader = Grader::new(judge.clone(), "custom rubric");

        grader.grade("2 + 2?", "four", "4").await;

        let seen = judge.seen.lock().unwrap();
        assert_eq!(seen.len(), 10);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, "custom rubric");
        assert_eq!(
            seen[9].content,
            "Question: 2 + 2? || User answer: four || Correct answer: 4"
        );
    }

    #[tokio::test]
    async fn unparseable_reply_falls_back() {
        let judge = FakeJudge::replying("I think this deserves a 0.8");
        let grader = Grader::new(judge.clone(), "rubric");

        let result = grader.grade("q", "a", "b").await;

        assert_eq!(result.score, 0.0);
        assert!(result.reflection.starts_with("Error grading answer"));
        assert_eq!(judge.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn judge_failure_falls_back_without_retry() {
        let judge = FakeJudge::failing("connection refused");
        let grader = Grader::new(judge.clone(), "rubric");

        let result = grader.grade("q", "a", "b").await;

        assert_eq!(result.score, 0.0);
        assert!(result.reflection.contains("connection refused"));
        assert_eq!(judge.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn chat_request_shape() {
        let messages = vec![JudgeMessage::new(Role::User, "hi")];
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hi"}],
                "response_format": {"type": "json_object"}
            })
        );
    }

    #[test]
    fn chat_response_content_extracted() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "{}"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("{}"));
    }
}
