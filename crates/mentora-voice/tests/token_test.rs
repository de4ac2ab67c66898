use mentora_voice::{LiveKitConfig, VoiceService};

const DEFAULT_URL: &str = "http://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "secret";

#[tokio::test]
async fn generate_join_token() {
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    let service = VoiceService::new(config);

    let token = service
        .generate_join_token("test-room", "user-123", "Test User")
        .expect("Failed to generate token");

    assert!(!token.is_empty());
}

#[tokio::test]
async fn join_token_grants_data_publishing() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;

    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    let service = VoiceService::new(config);

    let token = service
        .generate_join_token("perm-room", "user-perm", "Perm User")
        .expect("Failed to generate token");

    #[derive(Deserialize)]
    struct Claims {
        video: VideoClaims,
    }

    #[derive(Deserialize)]
    struct VideoClaims {
        #[serde(rename = "roomJoin")]
        room_join: bool,
        room: String,
        #[serde(rename = "canPublish")]
        can_publish: bool,
        #[serde(rename = "canSubscribe")]
        can_subscribe: bool,
        #[serde(rename = "canPublishData")]
        can_publish_data: bool,
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims::<&str>(&[]);
    validation.validate_exp = false;

    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(DEFAULT_SECRET.as_bytes()),
        &validation,
    )
    .expect("token should verify against the configured secret");

    let video = decoded.claims.video;
    assert!(video.room_join);
    assert_eq!(video.room, "perm-room");
    assert!(video.can_publish);
    assert!(video.can_subscribe);
    assert!(video.can_publish_data);
}

#[tokio::test]
async fn service_enablement_tracks_configuration() {
    let configured = VoiceService::new(LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET));
    assert!(configured.is_enabled());
    assert_eq!(configured.room_name(), "mentora-voice-agent");

    let unconfigured = VoiceService::new(LiveKitConfig::default());
    assert!(!unconfigured.is_enabled());
}
