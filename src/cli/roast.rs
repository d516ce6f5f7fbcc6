// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::client::upload::mime_for_path;
use crate::client::{AudioState, HttpRoastApi, ModificationState, RoastSession, SessionStage};
use crate::tts::VoiceSelection;
use crate::vision::parse_image_data;

/// Arguments for the roast command
#[derive(Args, Debug)]
pub struct RoastArgs {
    /// Costume photo (JPG, PNG or WebP)
    pub image: PathBuf,

    /// Narrate the roast with this voice
    #[arg(long)]
    pub voice: Option<VoiceSelection>,

    /// Where to write the narration
    #[arg(long, default_value = "roast.mp3")]
    pub audio_out: PathBuf,

    /// Change requests applied to the photo, in order
    #[arg(long = "modify")]
    pub modifications: Vec<String>,

    /// Where to write the last modified image
    #[arg(long)]
    pub modified_out: Option<PathBuf>,

    /// Generate a meme and write it here
    #[arg(long)]
    pub meme_out: Option<PathBuf>,

    /// Generate an improved costume and write it here
    #[arg(long)]
    pub costume_out: Option<PathBuf>,
}

pub fn list_voices() {
    println!("🎙️  Available voices:");
    for voice in VoiceSelection::ALL {
        let marker = if voice == VoiceSelection::default() { " (default)" } else { "" };
        println!("  {:<14} {}{}", voice.id(), voice.description(), marker);
    }
}

/// Decode a `data:` URL and write its bytes to `path`
async fn write_data_url(path: &Path, data_url: &str) -> Result<()> {
    let parsed = parse_image_data(data_url);
    let bytes = STANDARD
        .decode(parsed.base64.as_bytes())
        .context("server returned an image that is not valid base64")?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!("Wrote {} image to {}", parsed.mime_type, path.display());
    Ok(())
}

pub async fn run_roast(server: &str, args: RoastArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read {}", args.image.display()))?;

    let api = HttpRoastApi::new(server)?;
    let mut session = RoastSession::new(api);

    println!("👻 Uploading {}...", args.image.display());
    session
        .upload_and_roast(&bytes, mime_for_path(&args.image))
        .await?;

    match session.stage() {
        SessionStage::RoastReady(ready) => {
            println!("\n📋 Costume: {}", ready.analysis.costume_type);
            for point in &ready.analysis.fail_points {
                println!("  - {}", point);
            }
            println!("  {}", ready.analysis.overall_assessment);
            println!("\n🔥 {}", ready.roast);
        }
        SessionStage::RoastFailed { analysis, error, .. } => {
            println!("\n📋 Costume: {}", analysis.costume_type);
            bail!("roast failed: {}", error);
        }
        SessionStage::AnalysisFailed { error, .. } => bail!("analysis failed: {}", error),
        other => bail!("unexpected session stage: {}", other.name()),
    }

    if let Some(voice) = args.voice {
        println!("\n🎙️  Narrating as {}...", voice.display_name());
        session
            .play_audio(voice)
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        if let Some(AudioState::Playing { clip, .. }) = session.ready().map(|r| &r.audio) {
            tokio::fs::write(&args.audio_out, clip).await?;
            println!("✅ Audio saved to {}", args.audio_out.display());
        }
        session.finish_playback();
    }

    for prompt in &args.modifications {
        println!("\n🪄 Modifying: {}", prompt);
        session
            .request_modification(prompt)
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        if let Some(ModificationState::Ready { analysis, .. }) =
            session.ready().map(|r| &r.modification)
        {
            println!("{}", analysis);
        }
    }
    if let (Some(path), Some(image)) = (
        &args.modified_out,
        session.ready().and_then(|r| r.modified_image.as_deref()),
    ) {
        write_data_url(path, image).await?;
        println!("✅ Modified image saved to {}", path.display());
    }

    if let Some(path) = &args.meme_out {
        println!("\n🖼️  Generating meme...");
        session
            .request_meme()
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        if let Some(crate::client::MemeState::Ready { image }) = session.ready().map(|r| &r.meme) {
            write_data_url(path, image).await?;
            println!("✅ Meme saved to {}", path.display());
        }
    }

    if let Some(path) = &args.costume_out {
        println!("\n🎃 Generating improved costume...");
        session
            .request_improved_costume(None)
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        if let Some(artifact) = session.ready().and_then(|r| r.improved_costume.as_ref()) {
            write_data_url(path, &artifact.image).await?;
            println!("✅ Improved costume saved to {}", path.display());
        }
    }

    Ok(())
}
