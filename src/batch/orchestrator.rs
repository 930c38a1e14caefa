use super::result::{BatchResult, FileStatus, REASON_SKIPPED_QUOTA};
use super::scripts::artifact_path;
use crate::error::{ExportError, ProcessError};
use crate::script::{parse, resolve};
use crate::synth::{compose, ClipSource, ComposeOptions};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Generated(PathBuf),
    Skipped(PathBuf),
}

/// Runs scripts through parse -> resolve -> compose -> export, one file at a
/// time, sharing a single clip source (and so a single quota latch).
pub struct BatchOrchestrator<S> {
    source: S,
    output_dir: PathBuf,
    options: ComposeOptions,
    cancel: CancellationToken,
}

impl<S: ClipSource> BatchOrchestrator<S> {
    pub fn new(source: S, output_dir: impl Into<PathBuf>, options: ComposeOptions) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            options,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn run(&mut self, script_files: &[PathBuf], force_regenerate: bool) -> BatchResult {
        let mut result = BatchResult::default();
        info!("Found {} script files to process", script_files.len());

        for script in script_files {
            if self.cancel.is_cancelled() {
                warn!("Cancellation requested, stopping before {}", script.display());
                result.interrupted = true;
                break;
            }

            let name = display_name(script);

            if result.quota_exhausted || self.source.is_exhausted() {
                warn!("Skipping {}: quota exhausted", name);
                result.quota_exhausted = true;
                result.record(name, FileStatus::Failed(REASON_SKIPPED_QUOTA.to_string()));
                continue;
            }

            match self.process_file(script, force_regenerate).await {
                Ok(ProcessOutcome::Generated(path)) => {
                    result.record(name, FileStatus::Generated(path));
                }
                Ok(ProcessOutcome::Skipped(path)) => {
                    result.record(name, FileStatus::Skipped(path));
                }
                Err(ProcessError::QuotaExhausted) => {
                    error!("Quota exhausted while processing {}", name);
                    result.quota_exhausted = true;
                    result.record(name, FileStatus::Failed(ProcessError::QuotaExhausted.to_string()));
                }
                Err(ProcessError::Interrupted) => {
                    warn!("Interrupted while processing {}, discarding it", name);
                    result.interrupted = true;
                    result.record(name, FileStatus::Failed(ProcessError::Interrupted.to_string()));
                    break;
                }
                Err(e) => {
                    error!("Error processing {}: {}", name, e);
                    result.record(name, FileStatus::Failed(e.to_string()));
                }
            }
        }

        result
    }

    /// Processes one script. Nothing is written unless the whole timeline
    /// was built.
    pub async fn process_file(
        &mut self,
        script: &Path,
        force_regenerate: bool,
    ) -> Result<ProcessOutcome, ProcessError> {
        info!("=== Processing {} ===", script.display());

        if !script.is_file() {
            return Err(ProcessError::MissingInput(script.to_path_buf()));
        }

        let output = artifact_path(&self.output_dir, script);
        if output.exists() && !force_regenerate {
            info!("Skipping {}: {} already exists", script.display(), output.display());
            return Ok(ProcessOutcome::Skipped(output));
        }

        let text = tokio::fs::read_to_string(script).await?;
        let cues = parse(&text);
        if cues.is_empty() {
            return Err(ProcessError::NoCues);
        }
        info!("Found {} speech segments", cues.len());

        let duration = resolve(&text, &cues);
        let timeline = compose(&cues, duration, &mut self.source, &self.options, &self.cancel).await?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        info!("Exporting to {}", output.display());
        let path = output.clone();
        tokio::task::spawn_blocking(move || timeline.export_wav(&path))
            .await
            .map_err(|e| ExportError::Io(std::io::Error::other(e.to_string())))??;

        info!("Generated: {}", output.display());
        Ok(ProcessOutcome::Generated(output))
    }
}

fn display_name(script: &Path) -> String {
    script
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| script.display().to_string())
}
