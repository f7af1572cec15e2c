use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bure_core::{BureError, LlmRequest, LlmResponse, Message, Runnable};
use bure_llm::{ChatModel, Llm};

#[derive(Default)]
struct RecordingLlm {
    seen: Mutex<Vec<LlmRequest>>,
}

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for RecordingLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, BureError> {
        self.seen.lock().unwrap().push(input);
        Ok(LlmResponse {
            content: "ok".to_string(),
        })
    }
}

fn assert_llm<T: Llm>() {}

#[test]
fn recording_llm_implements_llm() {
    assert_llm::<RecordingLlm>();
}

#[tokio::test]
async fn chat_model_binds_model_and_temperature() {
    let llm = Arc::new(RecordingLlm::default());
    let chat = ChatModel::new(llm.clone(), "mistral-small-latest").with_temperature(0.1);
    assert_eq!(chat.model(), "mistral-small-latest");

    let resp = chat.invoke(vec![Message::user("hello")]).await.unwrap();
    assert_eq!(resp.content, "ok");

    let seen = llm.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].model, "mistral-small-latest");
    assert_eq!(seen[0].temperature, Some(0.1));
    assert_eq!(seen[0].messages, vec![Message::user("hello")]);
}
