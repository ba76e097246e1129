use std::sync::{Arc, Mutex};

use cprovider::adapters::openai::{
    OpenAiAssistantMessage, OpenAiAuth, OpenAiFinishReason, OpenAiProvider, OpenAiRequest,
    OpenAiResponse, OpenAiToolCall, OpenAiTransport, OpenAiUsage,
};
use cprovider::{
    Message, ModelProvider, ModelRequest, ProviderError, ProviderErrorKind, ProviderFuture,
    ProviderId, Role, SecureCredentialManager, StopReason, ToolCall, ToolDefinition,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CapturedAuth(&'static str, String);

#[derive(Debug, Default)]
struct FakeTransport {
    captured_auth: Mutex<Option<CapturedAuth>>,
    captured_request: Mutex<Option<OpenAiRequest>>,
}

impl OpenAiTransport for FakeTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            *self.captured_request.lock().expect("request lock") = Some(request);
            *self.captured_auth.lock().expect("auth lock") = Some(match auth {
                OpenAiAuth::ApiKey(value) => CapturedAuth("api_key", value.expose().to_string()),
            });

            Ok(OpenAiResponse {
                model: "gpt-3.5-turbo".to_string(),
                message: OpenAiAssistantMessage {
                    content: "Let me look that up.".to_string(),
                    tool_calls: vec![OpenAiToolCall {
                        id: "call_1".to_string(),
                        name: "get_rooms".to_string(),
                        arguments: "{}".to_string(),
                    }],
                },
                finish_reason: OpenAiFinishReason::ToolCalls,
                usage: OpenAiUsage {
                    prompt_tokens: 7,
                    completion_tokens: 3,
                    total_tokens: 10,
                },
            })
        })
    }
}

#[tokio::test]
async fn complete_maps_openai_response_to_provider_response() {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_openai_api_key("sk-live-123")
        .expect("key should set");

    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(credentials, transport.clone());
    let request = ModelRequest::new(
        "gpt-3.5-turbo",
        vec![
            Message::new(Role::System, "be helpful"),
            Message::new(Role::User, "show me rooms"),
        ],
    )
    .with_tools(vec![ToolDefinition {
        name: "get_rooms".to_string(),
        description: "Get available hotel rooms".to_string(),
        input_schema: "{\"type\":\"object\",\"properties\":{}}".to_string(),
    }]);

    let response = provider
        .complete(request)
        .await
        .expect("completion should succeed");
    assert_eq!(response.provider, ProviderId::OpenAi);
    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.usage.total_tokens, 10);
    assert_eq!(response.output.len(), 2);

    let auth = transport
        .captured_auth
        .lock()
        .expect("auth lock")
        .clone()
        .expect("auth should be captured");
    assert_eq!(auth, CapturedAuth("api_key", "sk-live-123".to_string()));

    let captured_request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(captured_request.model, "gpt-3.5-turbo");
    assert_eq!(captured_request.messages.len(), 2);
    assert_eq!(captured_request.tools.len(), 1);
}

#[tokio::test]
async fn complete_preserves_tool_call_and_result_history() {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_openai_api_key("sk-live-123")
        .expect("key should set");

    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(credentials, transport.clone());

    let call = ToolCall {
        id: "call_7".to_string(),
        name: "book_room".to_string(),
        arguments: "{\"roomId\":1}".to_string(),
    };
    let request = ModelRequest::new(
        "gpt-3.5-turbo",
        vec![
            Message::new(Role::User, "book room 1"),
            Message::assistant_tool_call("Booking now.", call),
            Message::tool_result("book_room", "{\"bookingId\":\"BK-1\"}"),
        ],
    );

    provider
        .complete(request)
        .await
        .expect("completion should succeed");

    let captured_request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");

    assert_eq!(captured_request.messages[1].tool_calls.len(), 1);
    assert_eq!(captured_request.messages[1].tool_calls[0].id, "call_7");
    assert_eq!(
        captured_request.messages[2].name.as_deref(),
        Some("book_room")
    );
}

#[tokio::test]
async fn complete_without_credentials_fails_authentication() {
    let credentials = Arc::new(SecureCredentialManager::new());
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(credentials, transport.clone());

    let request = ModelRequest::new("gpt-3.5-turbo", vec![Message::new(Role::User, "hi")]);
    let error = provider
        .complete(request)
        .await
        .expect_err("missing key must fail");

    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert!(transport.captured_request.lock().expect("lock").is_none());
}
