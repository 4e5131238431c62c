use crate::domain::model::{CategoryAttributes, CategorySummary};
use crate::utils::error::{BirthdayError, Result};
use crate::utils::validation::validate_non_empty_string;
use std::collections::HashSet;

/// id, age range, characteristics, desired tone. The label equals the id.
const BUILTIN_CATEGORIES: [(&str, &str, &str, &str); 7] = [
    (
        "대학생 및 초기 사회 진출기",
        "20-25세",
        "대학 생활, 취업 준비기",
        "미래에 대한 불안감이 많기 때문에, 응원과 격려의 말",
    ),
    (
        "청년 직장인 및 결혼 준비기",
        "26-32세",
        "취업, 커리어 초기, 연애 및 결혼 준비",
        "커리어 초기와 연애 및 결혼 준비로 바쁜 시기라, 지지와 사랑의 메시지",
    ),
    (
        "결혼 및 가족 형성기",
        "33-39세",
        "결혼, 육아 시작, 커리어 발전기",
        "가족과 일에 대한 격려와 감사를 표현하는 말",
    ),
    (
        "자녀 양육 및 경력 성숙기",
        "40-49세",
        "자녀 교육, 커리어 안정화, 부모 부양 시작",
        "자녀 교육과 커리어 안정화 시기로, 노력에 대한 인정과 지지를 원하는 시기",
    ),
    (
        "중년 전환기",
        "50-58세",
        "자녀 독립 준비, 노후 준비 시작, 커리어 절정기",
        "가족과의 관계와 자신의 성취에 대한 인정",
    ),
    (
        "은퇴 준비 및 전환기",
        "59-64세",
        "은퇴 준비, 제2의 인생 설계, 손주 돌봄",
        "자신의 노고와 헌신에 대한 감사와 미래에 대한 긍정적인 메시지",
    ),
    (
        "노년기",
        "65-75세",
        "은퇴 생활, 건강 관리, 여가 활동",
        "그 동안의 고생을 인정하고, 앞으로의 건강과 행복을 기원하는 말",
    ),
];

/// Ordered, immutable map from category id to its attributes.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    entries: Vec<(String, CategoryAttributes)>,
}

impl CategoryRegistry {
    pub fn builtin() -> Self {
        let entries = BUILTIN_CATEGORIES
            .iter()
            .map(|(id, age_range, characteristics, desired_tone)| {
                (
                    id.to_string(),
                    CategoryAttributes {
                        label: id.to_string(),
                        age_range: age_range.to_string(),
                        characteristics: characteristics.to_string(),
                        desired_tone: desired_tone.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Builds a registry from externally supplied entries, keeping their order.
    pub fn from_entries(entries: Vec<(String, CategoryAttributes)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(BirthdayError::ConfigError {
                message: "category registry must contain at least one entry".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (id, attrs) in &entries {
            validate_non_empty_string("category.id", id)?;
            validate_non_empty_string("category.label", &attrs.label)?;
            validate_non_empty_string("category.age_range", &attrs.age_range)?;
            validate_non_empty_string("category.characteristics", &attrs.characteristics)?;
            validate_non_empty_string("category.desired_tone", &attrs.desired_tone)?;

            if !seen.insert(id.as_str()) {
                return Err(BirthdayError::ConfigError {
                    message: format!("duplicate category id: {}", id),
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, id: &str) -> Result<&CategoryAttributes> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, attrs)| attrs)
            .ok_or_else(|| BirthdayError::NotFoundError { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == id)
    }

    pub fn list(&self) -> Vec<CategorySummary> {
        self.entries
            .iter()
            .map(|(id, attrs)| CategorySummary {
                id: id.clone(),
                label: attrs.label.clone(),
                age_range: attrs.age_range.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
