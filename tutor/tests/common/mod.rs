//! Test doubles for the tutor's collaborators. No network.

#![allow(dead_code)]

use async_trait::async_trait;
use llm_client::{LlmClient, LlmError};
use ocr_client::{ExtractionResult, TextExtractor};
use prompt::ChatMessage;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Scripted reply for [`ScriptedLlm`].
pub enum Reply {
    Text(&'static str),
    Empty,
    Unreachable,
}

/// Answers from a script and records every request it receives.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Reply>>,
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, n: usize) -> Vec<ChatMessage> {
        self.requests.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(messages);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Reply::Text(text)) => Ok(text.to_string()),
            Some(Reply::Empty) => Err(LlmError::EmptyResponse.into()),
            Some(Reply::Unreachable) | None => anyhow::bail!("connection refused"),
        }
    }
}

/// Blocks every request until released, so tests can act while a reply is outstanding.
pub struct GatedLlm {
    pub entered: Notify,
    pub release: Notify,
    reply: &'static str,
    calls: AtomicUsize,
}

impl GatedLlm {
    pub fn new(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for GatedLlm {
    async fn get_llm_response_with_messages(&self, _messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.reply.to_string())
    }
}

/// Never answers its first request; answers every later one with `reply`.
pub struct StallOnceLlm {
    reply: &'static str,
    calls: AtomicUsize,
}

impl StallOnceLlm {
    pub fn new(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for StallOnceLlm {
    async fn get_llm_response_with_messages(&self, _messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            std::future::pending::<()>().await;
        }
        Ok(self.reply.to_string())
    }
}

/// Returns the same extraction result every time and counts calls.
pub struct FixedExtractor {
    result: ExtractionResult,
    calls: AtomicUsize,
}

impl FixedExtractor {
    pub fn new(result: ExtractionResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for FixedExtractor {
    async fn extract(&self, _image: &[u8]) -> ExtractionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Returns results in order; `NoText` once the script runs out.
pub struct SequenceExtractor {
    results: Mutex<VecDeque<ExtractionResult>>,
}

impl SequenceExtractor {
    pub fn new(results: Vec<ExtractionResult>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
        })
    }
}

#[async_trait]
impl TextExtractor for SequenceExtractor {
    async fn extract(&self, _image: &[u8]) -> ExtractionResult {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ExtractionResult::NoText)
    }
}
