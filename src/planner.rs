// ABOUTME: Slide planning for the script-deck application
// ABOUTME: Builds the structured planning request and translates the reply into slide entries

use crate::errors::{DeckError, Result};
use crate::gemini::{InlineImage, StructuredRequest, TextGenerator};
use crate::media::SourceImage;
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};

/// Where a slide's image comes from. Both variants carry the prompt to use
/// if an image has to be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageChoice {
    UseSupplied { index: usize, fallback_prompt: String },
    Generate { prompt: String },
}

impl ImageChoice {
    pub fn supplied_index(&self) -> Option<usize> {
        match self {
            ImageChoice::UseSupplied { index, .. } => Some(*index),
            ImageChoice::Generate { .. } => None,
        }
    }

    pub fn generation_prompt(&self) -> &str {
        match self {
            ImageChoice::UseSupplied {
                fallback_prompt, ..
            } => fallback_prompt,
            ImageChoice::Generate { prompt } => prompt,
        }
    }
}

/// One planned slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePlanEntry {
    pub title: String,
    pub content: Vec<String>,
    pub image: ImageChoice,
}

/// Slide as the service returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSlide {
    title: String,
    content: Vec<String>,
    image_index: i64,
    #[serde(default)]
    image_generation_prompt: Option<String>,
}

impl From<WireSlide> for SlidePlanEntry {
    fn from(wire: WireSlide) -> Self {
        let prompt = wire
            .image_generation_prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| fallback_prompt(&wire.title));

        let image = match usize::try_from(wire.image_index) {
            Ok(index) => ImageChoice::UseSupplied {
                index,
                fallback_prompt: prompt,
            },
            Err(_) => ImageChoice::Generate { prompt },
        };

        SlidePlanEntry {
            title: wire.title,
            content: wire.content,
            image,
        }
    }
}

/// Prompt used when the plan does not provide one.
pub fn fallback_prompt(title: &str) -> String {
    format!(
        "A high quality, professional presentation slide image for \"{}\", modern style.",
        title
    )
}

/// Asks the text generator to split a script into slides.
pub struct SlidePlanner<'a> {
    generator: &'a dyn TextGenerator,
}

impl<'a> SlidePlanner<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self { generator }
    }

    pub async fn plan(&self, script: &str, sources: &[SourceImage]) -> Result<Vec<SlidePlanEntry>> {
        let script = script.trim();
        if script.is_empty() {
            return Err(DeckError::EmptyScript);
        }

        let request = StructuredRequest {
            prompt: build_prompt(script, sources.len()),
            attachments: sources
                .iter()
                .map(|source| InlineImage {
                    mime_type: source.mime_type.clone(),
                    data_base64: source.base64_data(),
                })
                .collect(),
            response_schema: response_schema(),
        };

        let text = self.generator.generate_structured(&request).await?;
        let plan = parse_plan(&text)?;
        info!("Planner returned {} slides", plan.len());
        Ok(plan)
    }
}

/// Instruction sent with the script.
pub fn build_prompt(script: &str, image_count: usize) -> String {
    format!(
        r#"You are an expert presentation designer. Analyse the text below and turn it into an engaging slide deck in which every slide carries exactly one image.

Top-priority constraints:
1. Every slide must include exactly one image.
2. {image_count} source images are attached. When one of them fits a slide's content, use it.
3. When no images are attached, or none of them fits a slide, you must set 'imageIndex' to -1 and write a detailed English prompt for generating the best image for that slide in 'imageGenerationPrompt'.

For each slide provide:
- 'title': the slide title
- 'content': the bullet points of the slide body (array of strings)
- 'imageIndex': the 0-based index of the attached image to use, or -1 to generate a new one
- 'imageGenerationPrompt': required when 'imageIndex' is -1; a detailed, photographic-quality English prompt

---
{script}
---"#
    )
}

/// Strict schema for the planner's JSON answer.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "content": { "type": "ARRAY", "items": { "type": "STRING" } },
                "imageIndex": { "type": "INTEGER" },
                "imageGenerationPrompt": {
                    "type": "STRING",
                    "description": "Detailed English prompt, required when imageIndex is -1",
                },
            },
            "required": ["title", "content", "imageIndex", "imageGenerationPrompt"],
        },
    })
}

/// Parse the planner's answer. Anything other than a non-empty array of
/// well-formed slides is rejected as a whole.
pub fn parse_plan(text: &str) -> Result<Vec<SlidePlanEntry>> {
    let wire: Vec<WireSlide> = serde_json::from_str(text.trim())
        .map_err(|e| DeckError::PlanParseError(e.to_string()))?;
    if wire.is_empty() {
        return Err(DeckError::PlanParseError(
            "Planner returned no slides".to_string(),
        ));
    }
    Ok(wire.into_iter().map(SlidePlanEntry::from).collect())
}
