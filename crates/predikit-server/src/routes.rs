//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use predikit_core::{
    types, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    CompletionRequest, CompletionResponse, Error,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::state::AppState;

/// Build the router, mounting inference surfaces according to the
/// component's capability flags.
pub fn create_router(state: AppState) -> Router {
    let capabilities = state.capabilities();

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics));

    if capabilities.completion {
        router = router.route("/v1/completions", post(completions));
    }

    // Chat is served natively, or emulated through templating + completion.
    if capabilities.chat_completion || (capabilities.chat_template && capabilities.completion) {
        router = router.route("/v1/chat/completions", post(chat_completions));
    }

    router.fallback(fallback).with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

async fn completions(
    State(state): State<AppState>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    metrics::counter!("predikit_requests_total", "endpoint" => "completions").increment(1);

    let component = state.component()?;
    let backend = component
        .instance()
        .as_completion()
        .ok_or_else(|| ApiError::not_implemented("completion"))?;

    debug!("Serving completion for model '{}'", request.model);
    let response = backend.create_completion(request).await?;
    Ok(Json(response))
}

async fn chat_completions(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Result<Json<ChatCompletionResponse>, ApiError> {
    metrics::counter!("predikit_requests_total", "endpoint" => "chat_completions").increment(1);

    let component = state.component()?;
    let instance = component.instance();

    if let Some(backend) = instance.as_chat_completion() {
        debug!("Serving chat completion for model '{}'", request.model);
        let response = backend.create_chat_completion(request).await?;
        return Ok(Json(response));
    }

    // No native chat support: render the conversation through the
    // component's chat template and run it as a plain completion.
    let (Some(templating), Some(completion)) =
        (instance.as_chat_templating(), instance.as_completion())
    else {
        return Err(ApiError::not_implemented("chat completion"));
    };

    debug!("Emulating chat completion for model '{}'", request.model);
    let prompt = templating.apply_chat_template(&request.messages).await?;

    let mut completion_request = CompletionRequest::new(request.model.clone(), prompt);
    completion_request.max_tokens = request.max_tokens;
    completion_request.temperature = request.temperature;

    let completed = completion.create_completion(completion_request).await?;
    Ok(Json(chat_from_completion(request.model, completed)))
}

fn chat_from_completion(model: String, completed: CompletionResponse) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: types::response_id("chatcmpl"),
        object: "chat.completion".to_string(),
        created: completed.created,
        model,
        choices: completed
            .choices
            .into_iter()
            .map(|choice| ChatChoice {
                index: choice.index,
                message: ChatMessage::assistant(choice.text),
                finish_reason: choice.finish_reason,
            })
            .collect(),
        usage: completed.usage,
    }
}

async fn fallback() -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        message: "not found".to_string(),
    }
}

/// Error envelope returned by request handlers
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_implemented(what: &str) -> Self {
        Self {
            status: StatusCode::NOT_IMPLEMENTED,
            message: format!("{} is not supported by the loaded predictor", what),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::ComponentUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Error::Platform(_) => StatusCode::BAD_GATEWAY,
            Error::Serialization(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            metrics::counter!("predikit_request_errors_total").increment(1);
            warn!("Request failed: {}", self.message);
        }
        let body = Json(json!({ "error": { "message": self.message } }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use predikit_core::{Result, Usage};
    use predikit_host::LoadedComponent;
    use predikit_plugin::{ChatTemplating, Predictor, TextCompletion};
    use tower::ServiceExt;

    struct EchoCompletion;

    impl Predictor for EchoCompletion {
        fn as_completion(&self) -> Option<&dyn TextCompletion> {
            Some(self)
        }
    }

    #[async_trait]
    impl TextCompletion for EchoCompletion {
        async fn create_completion(&self, request: CompletionRequest) -> Result<CompletionResponse> {
            Ok(CompletionResponse {
                id: "cmpl-test".into(),
                object: "text_completion".into(),
                created: 0,
                model: request.model,
                choices: vec![predikit_core::CompletionChoice {
                    index: 0,
                    text: request.prompt,
                    finish_reason: "stop".into(),
                }],
                usage: Usage::new(1, 1),
            })
        }
    }

    struct TemplatedEcho;

    impl Predictor for TemplatedEcho {
        fn as_chat_templating(&self) -> Option<&dyn ChatTemplating> {
            Some(self)
        }
        fn as_completion(&self) -> Option<&dyn TextCompletion> {
            Some(&EchoCompletion)
        }
    }

    #[async_trait]
    impl ChatTemplating for TemplatedEcho {
        async fn apply_chat_template(&self, messages: &[ChatMessage]) -> Result<String> {
            Ok(messages
                .iter()
                .map(|m| format!("{}: {}", m.role, m.content))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }

    fn state_with(component: Option<LoadedComponent>) -> AppState {
        let config = ServerConfig {
            model_name: "demo".into(),
            api_protocol: "v1".into(),
            predictor_file: None,
            listen: "127.0.0.1".into(),
            port: 0,
        };
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState::new(config, component, handle)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_always_mounted() {
        let app = create_router(state_with(None));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn inference_surfaces_absent_without_a_component() {
        let app = create_router(state_with(None));
        let response = app
            .oneshot(post_json("/v1/completions", json!({"model": "m", "prompt": "p"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn completion_endpoint_delegates_to_the_component() {
        let component = LoadedComponent::from_instance("echo", Box::new(EchoCompletion));
        let app = create_router(state_with(Some(component)));

        let response = app
            .oneshot(post_json(
                "/v1/completions",
                json!({"model": "m", "prompt": "hello"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["choices"][0]["text"], "hello");
    }

    #[tokio::test]
    async fn chat_surface_not_mounted_for_completion_only_components() {
        let component = LoadedComponent::from_instance("echo", Box::new(EchoCompletion));
        let app = create_router(state_with(Some(component)));

        let response = app
            .oneshot(post_json(
                "/v1/chat/completions",
                json!({"model": "m", "messages": []}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chat_is_emulated_through_template_and_completion() {
        let component = LoadedComponent::from_instance("templated", Box::new(TemplatedEcho));
        assert!(component.capabilities().chat_template);
        assert!(!component.capabilities().chat_completion);

        let app = create_router(state_with(Some(component)));
        let response = app
            .oneshot(post_json(
                "/v1/chat/completions",
                json!({"model": "m", "messages": [{"role": "user", "content": "hi"}]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["choices"][0]["message"]["role"], "assistant");
        assert_eq!(body["choices"][0]["message"]["content"], "user: hi");
    }
}
