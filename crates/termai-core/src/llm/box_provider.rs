//! Type-erased provider handle.
//!
//! `LlmProvider::complete` returns `impl Future`, which rules out
//! `dyn LlmProvider`. The private-ish `LlmProviderDyn` mirror boxes that
//! future, every `LlmProvider` gets it through a blanket impl, and
//! [`BoxLlmProvider`] exposes the same surface as the original trait.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use termai_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::{EventStream, LlmProvider};

type CompleteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

/// Object-safe mirror of [`LlmProvider`].
pub trait LlmProviderDyn: Send + Sync {
    fn name(&self) -> &str;
    fn complete_boxed<'a>(&'a self, request: &'a CompletionRequest) -> CompleteFuture<'a>;
    fn stream_boxed(&self, request: CompletionRequest) -> EventStream;
}

impl<T: LlmProvider> LlmProviderDyn for T {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn complete_boxed<'a>(&'a self, request: &'a CompletionRequest) -> CompleteFuture<'a> {
        Box::pin(self.complete(request))
    }

    fn stream_boxed(&self, request: CompletionRequest) -> EventStream {
        self.stream(request)
    }
}

/// Shared, cheaply clonable provider chosen at runtime.
#[derive(Clone)]
pub struct BoxLlmProvider {
    inner: Arc<dyn LlmProviderDyn>,
}

impl BoxLlmProvider {
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Arc::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Non-streaming completion.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_boxed(request).await
    }

    /// Streaming completion; see [`LlmProvider::stream`].
    pub fn stream(&self, request: CompletionRequest) -> EventStream {
        self.inner.stream_boxed(request)
    }
}

impl fmt::Debug for BoxLlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxLlmProvider")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
