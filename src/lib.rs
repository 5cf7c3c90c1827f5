// ABOUTME: Library module for the script-deck program.
// ABOUTME: Contains the slide planning, image resolution, preview, and PPTX export pipeline.

// Reexport modules
pub mod config;
pub mod deck;
pub mod errors;
pub mod gemini;
pub mod media;
pub mod planner;
pub mod pptx;
pub mod preview;
pub mod quota;
pub mod resolver;
pub mod session;
pub mod status;
pub mod utils;

// Reexport common types and functions
pub use config::Config;
pub use deck::{RenderModel, SlideLayout};
pub use errors::{DeckError, Result};
pub use gemini::{GeminiClient, ImageGenerator, TextGenerator};
pub use media::{NormalizedImage, SourceImage};
pub use planner::{ImageChoice, SlidePlanEntry};
pub use pptx::{PptxConfig, generate_pptx};
pub use preview::{generate_preview, write_preview_to_file};
pub use quota::{FileQuotaStore, MemoryQuotaStore, QuotaTracker};
pub use session::{DeckSession, GenerationRequest};
pub use status::{Status, StatusReporter};
