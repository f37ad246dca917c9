//! Completion model trait

use async_trait::async_trait;

use crate::completion::CompletionRequest;
use crate::error::Result;

/// Chat-completion provider interface
///
/// Implementations:
/// - `OpenAiBackend` - OpenAI-compatible chat completions endpoint
///
/// The provider is an opaque collaborator: callers send role-tagged messages
/// plus generation parameters and receive one assistant reply string. Replies
/// are returned as-is apart from surrounding-whitespace trimming by callers.
#[async_trait]
pub trait CompletionModel: Send + Sync + 'static {
    /// Generate one assistant reply for the given request
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockModel;

    #[async_trait]
    impl CompletionModel for MockModel {
        async fn complete(&self, _request: CompletionRequest) -> Result<String> {
            Ok("maybe later, i'm busy".to_string())
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "mock-model"
        }
    }

    #[tokio::test]
    async fn test_mock_model() {
        let model = MockModel;
        assert!(model.is_available().await);
        assert_eq!(model.model_name(), "mock-model");

        let request = CompletionRequest::new("system").with_user_message("will you buy it?");
        let reply = model.complete(request).await.unwrap();
        assert_eq!(reply, "maybe later, i'm busy");
    }
}
