//! Type-erased completion provider.
//!
//! `LlmProvider::complete` returns `impl Future`, so the trait cannot be used
//! as `dyn LlmProvider`. `ErasedProvider` is the dyn-compatible mirror with a
//! pinned, boxed future; every `LlmProvider` gets it for free.

use std::future::Future;
use std::pin::Pin;

use fingertips_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::LlmProvider;

type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

/// Dyn-compatible view of an [`LlmProvider`].
pub trait ErasedProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl<P: LlmProvider> ErasedProvider for P {
    fn provider_name(&self) -> &str {
        self.name()
    }

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(self.complete(request))
    }
}

/// Owned handle to whichever provider was configured at startup.
pub struct BoxLlmProvider {
    inner: Box<dyn ErasedProvider>,
}

impl BoxLlmProvider {
    pub fn new<P: LlmProvider + 'static>(provider: P) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Provider name, recorded on the `chat` span as `gen_ai.system`.
    pub fn name(&self) -> &str {
        self.inner.provider_name()
    }

    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_erased(request).await
    }
}
