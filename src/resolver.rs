// ABOUTME: Image resolution for the script-deck application
// ABOUTME: Picks a supplied image or generates one for each slide, strictly in order

use crate::errors::DeckError;
use crate::gemini::ImageGenerator;
use crate::media::NormalizedImage;
use crate::planner::SlidePlanEntry;
use crate::status::{Status, StatusReporter};
use log::{debug, warn};
use std::time::Duration;

/// Per-slide progress through resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideImageState {
    Pending,
    UsingSuppliedImage(usize),
    GeneratingImage,
    Resolved,
    Unresolved,
}

pub struct ImageResolver<'a> {
    generator: &'a dyn ImageGenerator,
    cooldown: Duration,
    aspect_ratio: String,
}

impl<'a> ImageResolver<'a> {
    pub fn new(generator: &'a dyn ImageGenerator, cooldown: Duration, aspect_ratio: &str) -> Self {
        Self {
            generator,
            cooldown,
            aspect_ratio: aspect_ratio.to_string(),
        }
    }

    /// Resolve one image slot per plan entry. Never fails: a slide whose image
    /// cannot be produced gets `None`.
    pub async fn resolve(
        &self,
        plan: &[SlidePlanEntry],
        supplied: &[Option<NormalizedImage>],
        reporter: &dyn StatusReporter,
    ) -> Vec<Option<NormalizedImage>> {
        let total = plan.len();
        let mut resolved = Vec::with_capacity(total);
        let mut generation_calls = 0usize;

        for (index, entry) in plan.iter().enumerate() {
            let position = index + 1;
            debug!("Slide {}: {:?}", position, SlideImageState::Pending);

            let supplied_image = entry
                .image
                .supplied_index()
                .and_then(|i| supplied.get(i).and_then(Option::as_ref).map(|image| (i, image)));

            let image = match supplied_image {
                Some((i, image)) => {
                    debug!("Slide {}: {:?}", position, SlideImageState::UsingSuppliedImage(i));
                    Some(image.clone())
                }
                None => {
                    // Cooldown applies only between generation calls.
                    if generation_calls > 0 && !self.cooldown.is_zero() {
                        tokio::time::sleep(self.cooldown).await;
                    }
                    generation_calls += 1;

                    debug!("Slide {}: {:?}", position, SlideImageState::GeneratingImage);
                    reporter.report(&Status::GeneratingImage { position, total });

                    match self.generate(entry.image.generation_prompt(), position).await {
                        Ok(Some(image)) => Some(image),
                        Ok(None) => {
                            reporter.report(&Status::ImageUnavailable {
                                position,
                                rate_limited: false,
                            });
                            None
                        }
                        Err(e) => {
                            warn!("Slide {}: image generation failed: {}", position, e);
                            reporter.report(&Status::ImageUnavailable {
                                position,
                                rate_limited: matches!(e, DeckError::RateLimited),
                            });
                            None
                        }
                    }
                }
            };

            let state = if image.is_some() {
                SlideImageState::Resolved
            } else {
                SlideImageState::Unresolved
            };
            debug!("Slide {}: {:?}", position, state);
            resolved.push(image);
        }

        resolved
    }

    async fn generate(
        &self,
        prompt: &str,
        position: usize,
    ) -> Result<Option<NormalizedImage>, DeckError> {
        let Some(generated) = self
            .generator
            .generate_image(prompt, &self.aspect_ratio)
            .await?
        else {
            warn!("Slide {}: response contained no image", position);
            return Ok(None);
        };

        match NormalizedImage::from_bytes(&generated.mime_type, &generated.data) {
            Ok(image) => Ok(Some(image)),
            Err(e) => {
                warn!("Slide {}: generated image is unreadable: {}", position, e);
                Ok(None)
            }
        }
    }
}
