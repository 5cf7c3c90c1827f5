// ABOUTME: Generation session for the script-deck application
// ABOUTME: Runs the plan, resolve, preview pipeline and holds the result until export

use crate::deck::RenderModel;
use crate::errors::{DeckError, Result};
use crate::gemini::{ImageGenerator, TextGenerator};
use crate::media::{self, SourceImage};
use crate::planner::SlidePlanner;
use crate::pptx::{self, PptxConfig};
use crate::preview;
use crate::quota::QuotaTracker;
use crate::resolver::ImageResolver;
use crate::status::{Status, StatusReporter};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Input for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub script: String,
    pub images: Vec<PathBuf>,
    /// Where to write the HTML preview, if anywhere.
    pub preview_path: Option<PathBuf>,
    pub title: Option<String>,
}

/// Settings for how images are resolved.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub cooldown: Duration,
    pub aspect_ratio: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(crate::config::DEFAULT_COOLDOWN_MS),
            aspect_ratio: "16:9".to_string(),
        }
    }
}

/// The result of the last successful run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub model: RenderModel,
    pub preview_html: String,
    pub title: String,
}

pub struct DeckSession {
    quota: QuotaTracker,
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
    settings: ResolverSettings,
    current: Option<Generated>,
}

impl DeckSession {
    pub fn new(
        quota: QuotaTracker,
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            quota,
            text,
            images,
            settings,
            current: None,
        }
    }

    pub fn remaining_quota(&mut self) -> Result<u32> {
        self.quota.remaining()
    }

    pub fn current(&self) -> Option<&Generated> {
        self.current.as_ref()
    }

    /// Run the whole pipeline. The previous result is replaced only when the
    /// run succeeds; on failure it is left as it was.
    pub async fn generate(
        &mut self,
        request: &GenerationRequest,
        reporter: &dyn StatusReporter,
    ) -> Result<&Generated> {
        if self.quota.remaining()? == 0 {
            return Err(DeckError::QuotaExhausted {
                limit: self.quota.limit(),
            });
        }

        let script = request.script.trim();
        if script.is_empty() {
            return Err(DeckError::EmptyScript);
        }

        let sources: Vec<SourceImage> = media::load_sources(&request.images).await?;

        reporter.report(&Status::AnalyzingScript);
        let plan = SlidePlanner::new(self.text.as_ref())
            .plan(script, &sources)
            .await?;

        reporter.report(&Status::PreparingImages);
        let supplied = media::normalize_all(&sources);
        let resolver = ImageResolver::new(
            self.images.as_ref(),
            self.settings.cooldown,
            &self.settings.aspect_ratio,
        );
        let resolved = resolver.resolve(&plan, &supplied, reporter).await;

        let model = RenderModel::new(plan, resolved)?;
        let title = request
            .title
            .clone()
            .unwrap_or_else(|| "AI Presentation".to_string());
        let preview_html = preview::generate_preview(&model, &title);
        if let Some(path) = &request.preview_path {
            preview::write_preview_to_file(&preview_html, path)?;
        }
        reporter.report(&Status::PreviewReady {
            slides: model.len(),
        });

        if let Err(e) = self.quota.increment() {
            warn!("Failed to record usage: {}", e);
        }

        info!("Generation finished with {} slides", model.len());
        Ok(self.current.insert(Generated {
            model,
            preview_html,
            title,
        }))
    }

    /// Write the current result as a PPTX file. Failure leaves the result in
    /// place so the export can be retried.
    pub fn export(&self, output_file: &Path) -> Result<()> {
        let generated = self.current.as_ref().ok_or_else(|| {
            DeckError::ValidationError("Nothing to export; generate a deck first".to_string())
        })?;
        let config = PptxConfig {
            title: generated.title.clone(),
        };
        pptx::generate_pptx(&generated.model, output_file, &config)
    }
}
