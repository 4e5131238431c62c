use serde::{Deserialize, Serialize};

pub const SECTION_SEPARATOR: &str = "\n\n";

pub const FALLBACK_TITLE: &str = "생일을 축하드립니다";
pub const FALLBACK_BODY: &str = "";
pub const FALLBACK_VALUE_STATEMENT: &str = "SK텔레콤은 언제나 고객님과 함께하겠습니다.";
pub const FALLBACK_CLOSING: &str = "행복한 하루 보내세요.";

/// Descriptive attributes of one age-group category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttributes {
    pub label: String,
    pub age_range: String,
    pub characteristics: String,
    pub desired_tone: String,
}

/// Listing row handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub label: String,
    pub age_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub category_label: String,
    pub characteristics: String,
    pub desired_tone: String,
}

impl From<&CategoryAttributes> for GenerationRequest {
    fn from(attrs: &CategoryAttributes) -> Self {
        Self {
            category_label: attrs.label.clone(),
            characteristics: attrs.characteristics.clone(),
            desired_tone: attrs.desired_tone.clone(),
        }
    }
}

/// Parsed model reply. Only constructible through [`GenerationResult::new`],
/// so `full_message` is always the four fields joined in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    title: String,
    body: String,
    value_statement: String,
    closing: String,
    full_message: String,
}

impl GenerationResult {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        value_statement: impl Into<String>,
        closing: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let body = body.into();
        let value_statement = value_statement.into();
        let closing = closing.into();
        let full_message = [
            title.as_str(),
            body.as_str(),
            value_statement.as_str(),
            closing.as_str(),
        ]
        .join(SECTION_SEPARATOR);

        Self {
            title,
            body,
            value_statement,
            closing,
            full_message,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn value_statement(&self) -> &str {
        &self.value_statement
    }

    pub fn closing(&self) -> &str {
        &self.closing
    }

    pub fn full_message(&self) -> &str {
        &self.full_message
    }
}
