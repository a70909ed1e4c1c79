use super::*;

fn setup_backend(url: &str) -> OpenAI {
    OpenAI::default()
        .with_endpoint(url)
        .with_api_key("test_token")
        .with_model("gpt-3.5-turbo")
}

#[tokio::test]
async fn test_generate() {
    let body = serde_json::to_string(&CompletionResponse {
        choices: vec![CompletionChoiceResponse {
            message: CompletionMessageResponse {
                content: Some("What do you think a variable is for?".to_string()),
            },
            finish_reason: Some("stop".to_string()),
        }],
    })
    .unwrap();

    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .match_header("Authorization", "Bearer test_token")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.7,
        })))
        .with_body(body)
        .create();

    let backend = setup_backend(&server.url());
    let messages = vec![
        ChatMessage::system("You are a Socratic tutor."),
        ChatMessage::user("What is a variable?"),
    ];

    let res = backend
        .generate(&messages)
        .await
        .expect("Failed to generate");
    assert_eq!(res, "What do you think a variable is for?");
    completion_handler.assert();
}

#[tokio::test]
async fn test_generate_error_response() {
    let body = serde_json::to_string(&ErrorResponse {
        error: OpenAIError {
            http_code: 0,
            message: "Incorrect API key provided".to_string(),
            err_type: "invalid_request_error".to_string(),
            param: None,
            code: Some("invalid_api_key".to_string()),
        },
    })
    .unwrap();

    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(body)
        .create();

    let backend = setup_backend(&server.url());
    let err = backend
        .generate(&[ChatMessage::user("hello")])
        .await
        .expect_err("Expected an error");

    let err = err.downcast::<OpenAIError>().expect("Unexpected error type");
    assert_eq!(err.http_code, 401);
    assert_eq!(err.message, "Incorrect API key provided");
    completion_handler.assert();
}

#[tokio::test]
async fn test_generate_empty_response() {
    let body = serde_json::to_string(&CompletionResponse { choices: vec![] }).unwrap();

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = setup_backend(&server.url());
    let err = backend
        .generate(&[ChatMessage::user("hello")])
        .await
        .expect_err("Expected an error");
    assert!(err.to_string().contains("empty completion response"));
}
