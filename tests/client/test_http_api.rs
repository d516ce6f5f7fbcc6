// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HttpRoastApi against the real router over TCP

use crate::helpers::{image_reply, prompts_dir, text_reply, StubSpeech, IMAGE_MODEL, VISION_MODEL};
use async_trait::async_trait;
use costume_roast::{
    api::http_server::{create_app, AppState},
    client::{ClientError, HttpRoastApi, MemeState, RoastApi, RoastSession},
    gateway::{GenerateContentRequest, GenerateContentResponse, GenerativeBackend, ModelGateway},
    prompts::PromptLibrary,
    tts::{SpeechSynthesizer, VoiceSelection},
    upstream::UpstreamError,
    vision::ImageLimits,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

/// Backend answering calls with replies in order
struct SequencedBackend {
    replies: Mutex<VecDeque<GenerateContentResponse>>,
}

impl SequencedBackend {
    fn new(replies: Vec<GenerateContentResponse>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl GenerativeBackend for SequencedBackend {
    async fn generate_content(
        &self,
        _model: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| UpstreamError::new("gemini", "no more replies"))
    }
}

async fn serve(backend: Arc<SequencedBackend>, speech: Option<Arc<StubSpeech>>) -> HttpRoastApi {
    let state = AppState {
        gateway: ModelGateway::new(backend, VISION_MODEL, IMAGE_MODEL),
        speech: speech.map(|s| s as Arc<dyn SpeechSynthesizer>),
        prompts: PromptLibrary::new(prompts_dir()),
        limits: ImageLimits::default(),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_app(Arc::new(state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpRoastApi::new(&format!("http://{}/", addr)).unwrap()
}

#[tokio::test]
async fn test_full_session_over_http() {
    let backend = SequencedBackend::new(vec![
        text_reply(r#"```json
{"costumeType": "Ghost", "failPoints": ["bedsheet has a floral print"], "overallAssessment": "Haunting, for the wrong reasons."}
```"#),
        text_reply("  Boo. Mostly at the linen choice.  "),
        image_reply("image/png", "iVBORw0KGgo="),
        image_reply("image/png", "iVBORw0KGgoAAAA="),
    ]);
    let api = serve(backend, Some(StubSpeech::replying(b"ID3-roast"))).await;
    let mut session = RoastSession::new(api);

    session.upload_and_roast(JPEG, "image/jpeg").await.unwrap();

    let ready = session.ready().expect("roast ready");
    assert_eq!(ready.analysis.costume_type, "Ghost");
    assert_eq!(ready.analysis.fail_points, vec!["bedsheet has a floral print"]);
    assert_eq!(ready.roast, "Boo. Mostly at the linen choice.");

    assert!(session.request_meme().await.unwrap());
    assert_eq!(
        session.ready().unwrap().meme,
        MemeState::Ready {
            image: "data:image/png;base64,iVBORw0KGgo=".to_string()
        }
    );

    assert!(session.request_modification("add chains").await.unwrap());
    let ready = session.ready().unwrap();
    assert_eq!(ready.meme, MemeState::None);
    assert_eq!(ready.modified_image.as_deref(), Some("data:image/png;base64,iVBORw0KGgoAAAA="));
    assert_eq!(ready.history[1].content, "Here you go");

    assert!(session.play_audio(VoiceSelection::Spongebob).await.unwrap());
}

#[tokio::test]
async fn test_server_errors_surface_as_api_errors() {
    let api = serve(SequencedBackend::new(vec![]), None).await;

    let err = api.analyze("data:image/gif;base64,R0lGODlh").await.unwrap_err();
    match &err {
        ClientError::Api { status, message } => {
            assert_eq!(*status, 400);
            assert!(!message.is_empty());
        }
        other => panic!("expected api error, got {:?}", other),
    }

    let err = api.generate_audio("boo", VoiceSelection::Elmo).await.unwrap_err();
    assert_eq!(err.user_message(), "Audio service not configured");
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let api = HttpRoastApi::new("http://127.0.0.1:9").unwrap();

    let err = api.generate_meme("boo").await.unwrap_err();

    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.user_message(), "Could not reach the roast service. Please try again.");
}
