use crate::core::service::BirthdayService;
use crate::core::ChatTransport;
use crate::domain::model::GenerationResult;
use crate::utils::error::{BirthdayError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedMessage {
    pub category_id: String,
    pub generated_at: DateTime<Utc>,
    pub message: GenerationResult,
}

/// Per-user interaction state: the selected category and the last message
/// generated for it.
#[derive(Debug, Default, Clone)]
pub struct AppState {
    selected_category: Option<String>,
    last_message: Option<GeneratedMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn last_message(&self) -> Option<&GeneratedMessage> {
        self.last_message.as_ref()
    }

    /// Selects a category and drops any message generated for the previous one.
    pub fn select<T: ChatTransport>(&mut self, service: &BirthdayService<T>, id: &str) -> Result<()> {
        service.lookup(id)?;
        tracing::debug!("Selected category: {}", id);
        self.selected_category = Some(id.to_string());
        self.last_message = None;
        Ok(())
    }

    /// Generates a message for the selected category and caches it. On failure
    /// the previously cached message is left untouched.
    pub async fn generate_selected<T: ChatTransport>(
        &mut self,
        service: &BirthdayService<T>,
    ) -> Result<&GeneratedMessage> {
        let id = self
            .selected_category
            .clone()
            .ok_or(BirthdayError::NoSelectionError)?;

        let message = service.generate(&id).await?;
        Ok(&*self.last_message.insert(GeneratedMessage {
            category_id: id,
            generated_at: Utc::now(),
            message,
        }))
    }

    pub fn clear(&mut self) {
        self.selected_category = None;
        self.last_message = None;
    }
}
