//! Scripted completion provider for tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mercury::{
    CompletionOptions, CompletionProvider, CompletionResponse, PromptSpec, TokenUsage,
    TriageError,
};

/// Returns scripted results in order, repeating the last one
pub struct StubProvider {
    script: Mutex<VecDeque<Result<String, TriageError>>>,
    calls: AtomicUsize,
    pub last_prompt: Mutex<Option<PromptSpec>>,
    pub last_temperature: Mutex<Option<f32>>,
}

impl StubProvider {
    pub fn new(script: Vec<Result<String, TriageError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_temperature: Mutex::new(None),
        })
    }

    pub fn returning(raw: &str) -> Arc<Self> {
        Self::new(vec![Ok(raw.to_string())])
    }

    pub fn failing(err: TriageError) -> Arc<Self> {
        Self::new(vec![Err(err)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(
        &self,
        prompt: &PromptSpec,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, TriageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());
        *self.last_temperature.lock().unwrap() = Some(options.temperature);

        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        };

        next.map(|content| CompletionResponse {
            content,
            model: "stub-model".to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }
}
