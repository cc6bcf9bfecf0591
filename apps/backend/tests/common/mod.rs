//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to in-memory collaborators
//! - MemoryStore, a `CardStore` kept in a map
//! - ScriptedJudge, a `Judge` returning a canned reply
//!
//! None of these tests need a database or network access.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;

use flashcard_core::{GradeError, JudgeMessage, DEFAULT_RUBRIC};
use flashcards_backend::db::CardStore;
use flashcards_backend::error::Result;
use flashcards_backend::models::{CardRow, NewCardRow};
use flashcards_backend::services::grader::{Grader, Judge};
use flashcards_backend::AppState;

/// In-memory card store.
#[derive(Default)]
pub struct MemoryStore {
    cards: Mutex<BTreeMap<i64, CardRow>>,
    next_id: AtomicI64,
    /// When set, inserts report zero affected rows.
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn cards(&self) -> Vec<CardRow> {
        self.cards.lock().unwrap().values().cloned().collect()
    }

    pub fn card(&self, card_id: i64) -> Option<CardRow> {
        self.cards.lock().unwrap().get(&card_id).cloned()
    }

    pub fn reject_writes(&self) {
        self.reject_writes.store(true, Ordering::SeqCst);
    }

    fn push(&self, row: &NewCardRow) -> i64 {
        let card_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.cards.lock().unwrap().insert(
            card_id,
            CardRow {
                card_id,
                deck_id: row.deck_id,
                term: row.term.clone(),
                definition: row.definition.clone(),
                ease_factor: row.ease_factor,
                interval: row.interval,
                graduated: row.graduated,
                next_review: row.next_review,
            },
        );
        card_id
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn insert_card(&self, row: &NewCardRow) -> Result<u64> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Ok(0);
        }
        self.push(row);
        Ok(1)
    }

    async fn insert_cards(&self, rows: &[NewCardRow]) -> Result<u64> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Ok(0);
        }
        for row in rows {
            self.push(row);
        }
        Ok(rows.len() as u64)
    }

    async fn update_card(&self, card_id: i64, term: &str, definition: &str) -> Result<u64> {
        let mut cards = self.cards.lock().unwrap();
        match cards.get_mut(&card_id) {
            Some(card) => {
                card.term = term.to_string();
                card.definition = definition.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_card(&self, card_id: i64) -> Result<u64> {
        Ok(self.cards.lock().unwrap().remove(&card_id).map_or(0, |_| 1))
    }
}

/// Judge that answers every conversation with the same reply.
pub struct ScriptedJudge {
    reply: Mutex<std::result::Result<String, String>>,
    calls: AtomicUsize,
    last_conversation: Mutex<Vec<JudgeMessage>>,
}

impl ScriptedJudge {
    pub fn new() -> Self {
        Self {
            reply: Mutex::new(Ok(fixtures::judgment(0.5, "Partly right."))),
            calls: AtomicUsize::new(0),
            last_conversation: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_with(&self, content: impl Into<String>) {
        *self.reply.lock().unwrap() = Ok(content.into());
    }

    pub fn fail_with(&self, message: impl Into<String>) {
        *self.reply.lock().unwrap() = Err(message.into());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_conversation(&self) -> Vec<JudgeMessage> {
        self.last_conversation.lock().unwrap().clone()
    }
}

#[async_trait]
impl Judge for ScriptedJudge {
    async fn complete(&self, messages: &[JudgeMessage]) -> std::result::Result<String, GradeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_conversation.lock().unwrap() = messages.to_vec();
        self.reply.lock().unwrap().clone().map_err(GradeError::Judge)
    }
}

/// Test context with in-memory store and scripted judge.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub judge: Arc<ScriptedJudge>,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let judge = Arc::new(ScriptedJudge::new());

        let state = AppState::new(store.clone(), Grader::new(judge.clone(), DEFAULT_RUBRIC));
        let app = flashcards_backend::router(state);

        Self { store, judge, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}
