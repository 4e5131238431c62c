use crate::adapters::http::OpenAiChatTransport;
use crate::config::{SamplingParams, ServiceConfig};
use crate::core::parser::{parse_message, OverflowPolicy};
use crate::core::prompt::build_payload;
use crate::core::ChatTransport;
use crate::domain::model::{GenerationRequest, GenerationResult};
use crate::utils::error::{GenerationError, Result};
use crate::utils::validation::Validate;
use std::time::Instant;

/// Turns category attributes into a prompt, sends it once and parses the reply.
pub struct MessageGenerator<T: ChatTransport> {
    transport: T,
    model: String,
    sampling: SamplingParams,
    overflow: OverflowPolicy,
}

impl MessageGenerator<OpenAiChatTransport> {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let transport = OpenAiChatTransport::new(config)?;
        Self::new(config, transport)
    }
}

impl<T: ChatTransport> MessageGenerator<T> {
    /// Fails with a configuration error, without touching the transport, when
    /// the config has no API key or holds invalid values.
    pub fn new(config: &ServiceConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            model: config.model.clone(),
            sampling: config.sampling,
            overflow: config.overflow,
        })
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    pub async fn generate(
        &self,
        category_label: &str,
        characteristics: &str,
        desired_tone: &str,
    ) -> std::result::Result<GenerationResult, GenerationError> {
        let request = GenerationRequest {
            category_label: category_label.to_string(),
            characteristics: characteristics.to_string(),
            desired_tone: desired_tone.to_string(),
        };
        self.generate_for(&request).await
    }

    pub async fn generate_for(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<GenerationResult, GenerationError> {
        tracing::info!("Generating message for age group: {}", request.category_label);

        let payload = build_payload(request, &self.model, self.sampling);
        let started = Instant::now();

        let outcome = match self.transport.complete(&payload).await {
            Ok(raw) => {
                tracing::debug!(
                    "Received {} chars from model in {:?}",
                    raw.chars().count(),
                    started.elapsed()
                );
                parse_message(&raw, self.overflow)
            }
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(_) => tracing::info!("Successfully generated message"),
            Err(e) => tracing::error!("Error generating message: {}", e),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FALLBACK_CLOSING, FALLBACK_VALUE_STATEMENT};
    use crate::domain::ports::ChatPayload;
    use crate::utils::error::BirthdayError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct MockTransport {
        reply: std::result::Result<String, String>,
        calls: Arc<AtomicUsize>,
        last_payload: Arc<Mutex<Option<ChatPayload>>>,
    }

    impl MockTransport {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
                last_payload: Arc::new(Mutex::new(None)),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                ..Self::replying("")
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn complete(
            &self,
            payload: &ChatPayload,
        ) -> std::result::Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(GenerationError::StatusError {
                    status: 502,
                    body: message.clone(),
                }),
            }
        }
    }

    fn config() -> ServiceConfig {
        ServiceConfig::default().with_api_key("sk-test")
    }

    #[test]
    fn test_missing_api_key_fails_before_any_call() {
        let transport = MockTransport::replying("unused");
        let result = MessageGenerator::new(&ServiceConfig::default(), transport.clone());

        assert!(matches!(result, Err(BirthdayError::MissingConfigError { .. })));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_example_scenario() {
        let transport = MockTransport::replying("Section A\n\nSection B\n\nSection C\n\nSection D");
        let generator = MessageGenerator::new(&config(), transport.clone()).unwrap();

        let result = generator
            .generate(
                "대학생 및 초기 사회 진출기",
                "대학 생활, 취업 준비기",
                "응원과 격려의 말",
            )
            .await
            .unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(result.title(), "Section A");
        assert_eq!(result.body(), "Section B");
        assert_eq!(result.value_statement(), "Section C");
        assert_eq!(result.closing(), "Section D");
        assert_eq!(
            result.full_message(),
            "Section A\n\nSection B\n\nSection C\n\nSection D"
        );
    }

    #[tokio::test]
    async fn test_payload_carries_inputs_and_sampling() {
        let transport = MockTransport::replying("A");
        let generator = MessageGenerator::new(&config(), transport.clone()).unwrap();

        generator
            .generate("중년 전환기", "노후 준비 시작", "성취에 대한 인정")
            .await
            .unwrap();

        let payload = transport.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.temperature, 0.8);
        assert_eq!(payload.frequency_penalty, 1.5);
        assert_eq!(payload.max_tokens, 4096);
        assert!(payload.messages[1].content.contains("연령대: 중년 전환기"));
        assert!(payload.messages[1].content.contains("특성: 노후 준비 시작"));
        assert!(payload.messages[1].content.contains("메시지 톤: 성취에 대한 인정"));
    }

    #[tokio::test]
    async fn test_short_reply_applies_fallbacks() {
        let transport = MockTransport::replying("제목\n\n본문");
        let generator = MessageGenerator::new(&config(), transport).unwrap();

        let result = generator.generate("노년기", "c", "t").await.unwrap();

        assert_eq!(result.title(), "제목");
        assert_eq!(result.body(), "본문");
        assert_eq!(result.value_statement(), FALLBACK_VALUE_STATEMENT);
        assert_eq!(result.closing(), FALLBACK_CLOSING);
    }

    #[tokio::test]
    async fn test_transport_failure_is_generation_error() {
        let transport = MockTransport::failing("bad gateway");
        let generator = MessageGenerator::new(&config(), transport.clone()).unwrap();

        let err = generator.generate("노년기", "c", "t").await.unwrap_err();

        assert_eq!(transport.calls(), 1);
        assert!(matches!(err, GenerationError::StatusError { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_empty_reply_is_generation_error() {
        let transport = MockTransport::replying("   ");
        let generator = MessageGenerator::new(&config(), transport).unwrap();

        let err = generator.generate("노년기", "c", "t").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponseError));
    }

    #[tokio::test]
    async fn test_reject_policy_surfaces_malformed_reply() {
        let mut cfg = config();
        cfg.overflow = OverflowPolicy::Reject;
        let transport = MockTransport::replying("A\n\nB\n\nC\n\nD\n\nE");
        let generator = MessageGenerator::new(&cfg, transport).unwrap();

        assert_eq!(generator.overflow_policy(), OverflowPolicy::Reject);
        let err = generator.generate("노년기", "c", "t").await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponseError { .. }));
    }
}
