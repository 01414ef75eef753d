//! Wayfarer installation binary.
//!
//! Wires the HTTP adapters to the conversation core and runs one visitor
//! session: intro narration, 15 stages of question/answer, then the
//! timeline image finalization. The kiosk front-end owns the microphone
//! and the speakers; this process drives everything else.

mod cli;
mod observability;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use wayfarer_interface::{CredentialSource, SynthesisOptions};
use wayfarer_models::{
    CloudinaryStore, ElevenLabsClient, EmailJsMailer, EnvCredentials, OpenAiChatClient,
    OpenAiImageClient, SpooledCapture, StoredAudioSink, WhisperClient,
};
use wayfarer_session::{
    ChatLoopController, ConversationEngine, FinalizationPipeline, SessionConfig,
};
use wayfarer_storage::FileSystemStore;

const REQUIRED_CREDENTIALS: &[&str] = &[
    "OPENAI_API_KEY",
    "ELEVENLABS_API_KEY",
    "ELEVENLABS_VOICE_ID",
];

const EMAIL_CREDENTIALS: &[&str] = &[
    "CLOUDINARY_CLOUD_NAME",
    "CLOUDINARY_UPLOAD_PRESET",
    "EMAILJS_SERVICE_ID",
    "EMAILJS_TEMPLATE_ID",
    "EMAILJS_PUBLIC_KEY",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    observability::init_tracing();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let credentials = EnvCredentials::new();
    credentials.mark_ready();
    credentials.log_presence(REQUIRED_CREDENTIALS);
    if !credentials.wait_for(REQUIRED_CREDENTIALS).await {
        tracing::warn!("Proceeding with missing credentials; upstream calls will fail explicitly");
    }

    let data_dir = cli.resolved_data_dir();
    let spool_dir = cli.resolved_spool_dir();
    std::fs::create_dir_all(&spool_dir)
        .with_context(|| format!("creating spool dir {}", spool_dir.display()))?;

    let openai_key = credentials.get("OPENAI_API_KEY");
    let elevenlabs_key = credentials.get("ELEVENLABS_API_KEY");
    let voice_id = credentials.get("ELEVENLABS_VOICE_ID");

    let config = SessionConfig::builder()
        .language(cli.language.clone())
        .transcription(wayfarer_interface::TranscribeOptions {
            language: cli.transcription_language.clone(),
        })
        .synthesis(SynthesisOptions::builder().voice_id(voice_id).build()?)
        .build()?;

    let engine = ConversationEngine::new(
        OpenAiChatClient::new(openai_key.clone()),
        config.clone(),
        cli.email.clone(),
    );

    let capture = SpooledCapture::new(&spool_dir, WhisperClient::new(openai_key.clone()));
    let sink = StoredAudioSink::new(FileSystemStore::new(&data_dir)?);

    let mut finalizer = FinalizationPipeline::new(
        Box::new(OpenAiChatClient::new(openai_key.clone())),
        Box::new(OpenAiImageClient::new(openai_key)),
        Box::new(FileSystemStore::new(&data_dir)?),
    )
    .with_image_options(config.image.clone())
    .with_timeline_temperature(config.timeline_temperature);

    if cli.email.is_some() {
        credentials.log_presence(EMAIL_CREDENTIALS);
        if credentials.wait_for(EMAIL_CREDENTIALS).await {
            finalizer = finalizer
                .with_uploader(Box::new(CloudinaryStore::new(
                    credentials.get("CLOUDINARY_CLOUD_NAME"),
                    credentials.get("CLOUDINARY_UPLOAD_PRESET"),
                )))
                .with_mailer(Box::new(EmailJsMailer::new(
                    credentials.get("EMAILJS_SERVICE_ID"),
                    credentials.get("EMAILJS_TEMPLATE_ID"),
                    credentials.get("EMAILJS_PUBLIC_KEY"),
                )));
        } else {
            tracing::warn!("Email channel credentials missing; the image will only be stored locally");
        }
    }

    let mut controller = ChatLoopController::new(
        engine,
        Box::new(ElevenLabsClient::new(elevenlabs_key)),
        Box::new(capture),
        Box::new(sink),
    )
    .with_finalizer(finalizer);

    // Ctrl-C requests a cooperative stop at the next stage boundary
    let stop = controller.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping after the current stage");
            stop.stop();
        }
    });

    controller.start().await?;

    tracing::info!(
        phase = %controller.phase(),
        stages = controller.engine().history().len(),
        "Session over"
    );
    Ok(())
}
