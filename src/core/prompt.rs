use crate::config::SamplingParams;
use crate::domain::model::GenerationRequest;
use crate::domain::ports::{ChatMessage, ChatPayload};

pub const SYSTEM_PROMPT: &str =
    "You are an AI assistant that creates personalized birthday messages in Korean.";

pub fn user_prompt(request: &GenerationRequest) -> String {
    format!(
        "다음 정보를 바탕으로 생일 축하 MMS 메시지를 작성해주세요:

연령대: {label}
특성: {characteristics}
메시지 톤: {tone}

다음 형식으로 작성해주세요:
1. 제목: 생일 축하 인사 (한 줄)
2. 본문: 연령대에 맞는 공감 메시지 (2-3문장)
3. SK텔레콤 가치: 연결, 사랑, 전달의 가치를 담은 메시지 (1-2문장)
4. 맺음말: 마무리 인사 (한 줄)

지침:
- 전체 500자 이내
- 공손하고 따뜻한 톤 유지
- '당신' 대신 '고객님' 사용
- 감동적이고 감성적인 표현 사용
- 각 항목은 빈 줄 하나로 구분",
        label = request.category_label,
        characteristics = request.characteristics,
        tone = request.desired_tone,
    )
}

pub fn build_payload(request: &GenerationRequest, model: &str, sampling: SamplingParams) -> ChatPayload {
    ChatPayload {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(request)),
        ],
        temperature: sampling.temperature,
        frequency_penalty: sampling.frequency_penalty,
        max_tokens: sampling.max_tokens,
    }
}
