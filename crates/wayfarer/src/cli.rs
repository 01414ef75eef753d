//! Command-line interface for the installation engine.

use clap::Parser;
use std::path::PathBuf;

/// Run one visitor session of the Wayfarer installation.
#[derive(Debug, Parser)]
#[command(name = "wayfarer", version, about)]
pub struct Cli {
    /// Email address to send the final summary image to
    #[arg(long)]
    pub email: Option<String>,

    /// Spoken language the narrator replies in
    #[arg(long, default_value = "Brazilian Portuguese")]
    pub language: String,

    /// ISO language hint for transcription
    #[arg(long, default_value = "pt")]
    pub transcription_language: String,

    /// Directory where session artifacts (image, audio) are persisted
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory the kiosk front-end drops recorded utterances into
    #[arg(long)]
    pub spool_dir: Option<PathBuf>,
}

impl Cli {
    /// Artifact directory, defaulting to the platform data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("wayfarer")
        })
    }

    /// Utterance spool directory, defaulting to `<data_dir>/spool`.
    pub fn resolved_spool_dir(&self) -> PathBuf {
        self.spool_dir
            .clone()
            .unwrap_or_else(|| self.resolved_data_dir().join("spool"))
    }
}
