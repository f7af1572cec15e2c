use bure_core::{LlmRequest, Message, Role};

#[test]
fn llm_request_serializes_roles_lowercase() {
    let req = LlmRequest {
        model: "mistral-small-latest".to_string(),
        messages: vec![Message::system("be brief"), Message::user("hi")],
        temperature: Some(0.1),
    };
    let value = serde_json::to_value(req).expect("serialize request");
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][1]["role"], "user");
    assert!(value["temperature"].is_number());
}

#[test]
fn temperature_is_omitted_when_unset() {
    let req = LlmRequest {
        model: String::new(),
        messages: vec![Message::assistant("ok")],
        temperature: None,
    };
    let value = serde_json::to_value(req).expect("serialize request");
    assert!(value.get("temperature").is_none());
    assert_eq!(value["messages"][0]["role"], "assistant");
}

#[test]
fn message_constructors_set_roles() {
    assert_eq!(Message::user("q").role, Role::User);
    assert_eq!(Message::assistant("a").role, Role::Assistant);
}
