use crate::adapters::http::OpenAiChatTransport;
use crate::config::ServiceConfig;
use crate::core::generator::MessageGenerator;
use crate::core::registry::CategoryRegistry;
use crate::core::ChatTransport;
use crate::domain::model::{CategoryAttributes, CategorySummary, GenerationRequest, GenerationResult};
use crate::utils::error::{GenerationError, Result};
use tokio_util::sync::CancellationToken;

/// Caller-facing API: list categories and generate a message by category id.
pub struct BirthdayService<T: ChatTransport> {
    registry: CategoryRegistry,
    generator: MessageGenerator<T>,
}

impl BirthdayService<OpenAiChatTransport> {
    pub fn from_config(config: &ServiceConfig, registry: CategoryRegistry) -> Result<Self> {
        let generator = MessageGenerator::from_config(config)?;
        Ok(Self::new(registry, generator))
    }
}

impl<T: ChatTransport> BirthdayService<T> {
    pub fn new(registry: CategoryRegistry, generator: MessageGenerator<T>) -> Self {
        Self {
            registry,
            generator,
        }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn list_categories(&self) -> Vec<CategorySummary> {
        self.registry.list()
    }

    pub fn lookup(&self, id: &str) -> Result<&CategoryAttributes> {
        self.registry.lookup(id)
    }

    pub async fn generate(&self, id: &str) -> Result<GenerationResult> {
        let request = GenerationRequest::from(self.registry.lookup(id)?);
        Ok(self.generator.generate_for(&request).await?)
    }

    /// Like [`generate`](Self::generate), but abandons the request as soon as
    /// `cancel` fires. A reply arriving after cancellation is discarded.
    pub async fn generate_cancellable(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult> {
        let request = GenerationRequest::from(self.registry.lookup(id)?);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("Generation for '{}' cancelled", id);
                Err(GenerationError::CancelledError.into())
            }
            outcome = self.generator.generate_for(&request) => Ok(outcome?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ChatPayload;
    use crate::utils::error::BirthdayError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct SlowTransport {
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ChatTransport for SlowTransport {
        async fn complete(
            &self,
            _payload: &ChatPayload,
        ) -> std::result::Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok("A\n\nB\n\nC\n\nD".to_string())
        }
    }

    fn service(delay: Duration, calls: Arc<AtomicUsize>) -> BirthdayService<SlowTransport> {
        let config = ServiceConfig::default().with_api_key("sk-test");
        let generator = MessageGenerator::new(&config, SlowTransport { delay, calls }).unwrap();
        BirthdayService::new(CategoryRegistry::builtin(), generator)
    }

    #[test]
    fn test_list_categories_exposes_id_label_and_age_range() {
        let service = service(Duration::ZERO, Arc::new(AtomicUsize::new(0)));
        let listed = service.list_categories();

        assert_eq!(listed.len(), 7);
        assert_eq!(listed[2].id, "결혼 및 가족 형성기");
        assert_eq!(listed[2].label, "결혼 및 가족 형성기");
        assert_eq!(listed[2].age_range, "33-39세");
    }

    #[tokio::test]
    async fn test_generate_by_id() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service(Duration::ZERO, calls.clone());

        let result = service.generate("노년기").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.full_message(), "A\n\nB\n\nC\n\nD");
    }

    #[tokio::test]
    async fn test_unknown_id_never_reaches_transport() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service(Duration::ZERO, calls.clone());

        let err = service.generate("유아기").await.unwrap_err();

        assert!(matches!(err, BirthdayError::NotFoundError { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancellation_abandons_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service(Duration::from_secs(30), calls);
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = service
            .generate_cancellable("노년기", &token)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BirthdayError::GenerationError(GenerationError::CancelledError)
        ));
    }

    #[tokio::test]
    async fn test_uncancelled_token_returns_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = service(Duration::from_millis(5), calls);
        let token = CancellationToken::new();

        let result = service.generate_cancellable("노년기", &token).await.unwrap();
        assert_eq!(result.title(), "A");
    }
}
