//! Mock provider backend for integration tests
//!
//! Returns canned replies and records what it was asked

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use switchboard_llm::{LlmError, Provider};

/// Provider that returns predictable responses
pub struct MockProvider {
    name: String,
    /// Number of calls to fail before succeeding (0 = never fail)
    fail_count: AtomicU32,
    delay: Option<Duration>,
    call_count: AtomicU32,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self::build(name, 0, None))
    }

    /// Provider that fails the first `n` calls with an upstream error
    pub fn failing(name: &str, n: u32) -> Arc<Self> {
        Arc::new(Self::build(name, n, None))
    }

    /// Provider that sleeps before answering
    pub fn slow(name: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self::build(name, 0, Some(delay)))
    }

    fn build(name: &str, fail_count: u32, delay: Option<Duration>) -> Self {
        Self {
            name: name.to_owned(),
            fail_count: AtomicU32::new(fail_count),
            delay,
            call_count: AtomicU32::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// `(model, text)` pairs in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, model: &str, text: &str) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push((model.to_owned(), text.to_owned()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let remaining = self.fail_count.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_count.store(remaining - 1, Ordering::SeqCst);
            return Err(LlmError::Upstream(format!("{} returned 503", self.name)));
        }

        Ok(format!("{} says: {text}", self.name))
    }
}
