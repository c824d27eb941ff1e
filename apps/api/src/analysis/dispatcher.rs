//! Analysis request dispatcher — one model invocation per user action.
//!
//! The dispatcher is the only caller of the model backend. It enforces the
//! session concurrency rule: at most one pending external call at a time,
//! with no retry policy and no caching. Every invocation is a live call,
//! even for repeated inputs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::rasterizer::RasterizedDocument;

/// The model backend seam. The production implementation is
/// `GeminiClient`; tests substitute fakes to exercise dispatch semantics
/// without network access.
#[async_trait]
pub trait AnalysisModel: Send + Sync {
    async fn generate(
        &self,
        instruction: &str,
        document: &RasterizedDocument,
        job_description: &str,
    ) -> Result<String, LlmError>;
}

#[derive(Clone)]
pub struct Dispatcher {
    model: Arc<dyn AnalysisModel>,
    /// One permit: a second analysis waits until the pending call completes
    /// or fails. No parallel dispatches within a session.
    gate: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(model: Arc<dyn AnalysisModel>) -> Self {
        Self {
            model,
            gate: Arc::new(Semaphore::new(1)),
        }
    }

    /// Sends {instruction, document, job description} to the model and
    /// returns the raw reply text.
    ///
    /// All three parts are forwarded verbatim. A failure aborts this request
    /// only; the next dispatch starts clean.
    pub async fn dispatch(
        &self,
        instruction: &str,
        document: &RasterizedDocument,
        job_description: &str,
    ) -> Result<String, AppError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("dispatch gate closed: {e}")))?;

        self.model
            .generate(instruction, document, job_description)
            .await
            .map_err(|e| AppError::ModelInvocation(e.to_string()))
    }
}
