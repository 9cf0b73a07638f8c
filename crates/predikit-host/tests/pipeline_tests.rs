//! End-to-end tests for the predictor initialization pipeline

use predikit_core::Result;
use predikit_host::{initialize_component, load_component, ProvisionContext};
use predikit_platform::{Handles, MemoryPlatform, ModelHandle};
use predikit_plugin::{
    ChatCompletion, Predictor, PredictorDeclaration, ABI_VERSION, CONTRACT_VERSION,
};
use std::sync::Mutex;

/// Model handle captured by the recording constructor, for assertions.
static SEEN_MODEL: Mutex<Option<ModelHandle>> = Mutex::new(None);

struct NullPredictor;
impl Predictor for NullPredictor {}

fn construct_recording(handles: Handles) -> Result<Box<dyn Predictor>> {
    *SEEN_MODEL.lock().unwrap() = handles.model.clone();
    Ok(Box::new(NullPredictor))
}

fn construct_null(_handles: Handles) -> Result<Box<dyn Predictor>> {
    Ok(Box::new(NullPredictor))
}

struct ChatPredictor;

impl Predictor for ChatPredictor {
    fn as_chat_completion(&self) -> Option<&dyn ChatCompletion> {
        Some(self)
    }
}

#[async_trait::async_trait]
impl ChatCompletion for ChatPredictor {
    async fn create_chat_completion(
        &self,
        request: predikit_core::ChatCompletionRequest,
    ) -> Result<predikit_core::ChatCompletionResponse> {
        Ok(predikit_core::ChatCompletionResponse {
            id: "chatcmpl-0".into(),
            object: "chat.completion".into(),
            created: 0,
            model: request.model,
            choices: vec![],
            usage: predikit_core::Usage::default(),
        })
    }
}

fn construct_chat(_handles: Handles) -> Result<Box<dyn Predictor>> {
    Ok(Box::new(ChatPredictor))
}

fn declaration(requested: &'static [&'static str], construct: predikit_plugin::ConstructFn) -> PredictorDeclaration {
    PredictorDeclaration {
        abi_version: ABI_VERSION,
        contract_version: CONTRACT_VERSION,
        requested_handles: requested,
        construct,
    }
}

fn platform_with_model() -> MemoryPlatform {
    MemoryPlatform::new("demo").with_model(ModelHandle {
        name: "foo".into(),
        version: 1,
        model_path: Some("/models/foo/1".into()),
    })
}

fn model_ctx() -> ProvisionContext {
    ProvisionContext {
        deployment_name: None,
        model_name: Some("foo".into()),
        model_version: Some(1),
    }
}

#[tokio::test]
async fn model_requesting_predictor_initializes_end_to_end() {
    let platform = platform_with_model();
    let decl = declaration(&["model"], construct_recording);

    let component = initialize_component("my_predictor", &decl, &platform, &model_ctx())
        .await
        .unwrap();

    assert_eq!(component.name(), "my_predictor");

    // Constructor saw the model handle resolved from the env-derived names.
    let seen = SEEN_MODEL.lock().unwrap().take().unwrap();
    assert_eq!(seen.name, "foo");
    assert_eq!(seen.version, 1);

    // No capability traits implemented: all flags false.
    let capabilities = component.capabilities();
    assert!(!capabilities.chat_template);
    assert!(!capabilities.completion);
    assert!(!capabilities.chat_completion);
}

#[tokio::test]
async fn zero_argument_predictor_never_contacts_the_platform() {
    let platform = platform_with_model();
    let decl = declaration(&[], construct_null);

    initialize_component("standalone", &decl, &platform, &ProvisionContext::default())
        .await
        .unwrap();

    assert_eq!(platform.login_count(), 0);
}

#[tokio::test]
async fn unsupported_handle_fails_before_any_login() {
    let platform = platform_with_model();
    let decl = declaration(&["model", "feature_store"], construct_null);

    let err = initialize_component("fancy", &decl, &platform, &model_ctx())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("fancy"));
    assert!(err.to_string().contains("'feature_store'"));
    assert_eq!(platform.login_count(), 0);
}

#[tokio::test]
async fn capability_flags_follow_the_implemented_traits() {
    let platform = platform_with_model();
    let decl = declaration(&[], construct_chat);

    let component = initialize_component("chatty", &decl, &platform, &ProvisionContext::default())
        .await
        .unwrap();

    let capabilities = component.capabilities();
    assert!(capabilities.chat_completion);
    assert!(!capabilities.completion);
    assert!(!capabilities.chat_template);
    assert!(component.instance().as_chat_completion().is_some());
}

#[tokio::test]
async fn no_configured_file_yields_no_component() {
    let platform = platform_with_model();

    let component = load_component(None, &platform, &ProvisionContext::default())
        .await
        .unwrap();

    assert!(component.is_none());
    assert_eq!(platform.login_count(), 0);
}
