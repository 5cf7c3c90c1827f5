// ABOUTME: Render model for the script-deck application
// ABOUTME: Pairs planned slides with resolved images and decides each slide's layout

use crate::errors::{DeckError, Result};
use crate::media::NormalizedImage;
use crate::planner::SlidePlanEntry;

/// A rectangle on the slide, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

pub const SLIDE_WIDTH_IN: f64 = 10.0;
pub const SLIDE_HEIGHT_IN: f64 = 5.625;

pub const TITLE_FRAME: Frame = Frame::new(0.5, 0.25, 9.0, 0.75);
const FULL_BODY_FRAME: Frame = Frame::new(0.5, 1.2, 9.0, 4.0);
const LEFT_BODY_FRAME: Frame = Frame::new(0.5, 1.2, 4.5, 4.0);
const RIGHT_BODY_FRAME: Frame = Frame::new(5.0, 1.2, 4.5, 4.0);
const LEFT_IMAGE_SLOT: Frame = Frame::new(0.5, 1.2, 4.3, 3.5);
const RIGHT_IMAGE_SLOT: Frame = Frame::new(5.2, 1.2, 4.3, 3.5);

/// How a slide's body and image are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    TextOnly,
    TextLeftImageRight,
    ImageLeftTextRight,
}

impl SlideLayout {
    /// Image slides alternate sides: even indices put the image on the right.
    pub fn for_slide(index: usize, has_image: bool) -> Self {
        match (has_image, index % 2 == 0) {
            (false, _) => SlideLayout::TextOnly,
            (true, true) => SlideLayout::TextLeftImageRight,
            (true, false) => SlideLayout::ImageLeftTextRight,
        }
    }

    pub fn body_frame(self) -> Frame {
        match self {
            SlideLayout::TextOnly => FULL_BODY_FRAME,
            SlideLayout::TextLeftImageRight => LEFT_BODY_FRAME,
            SlideLayout::ImageLeftTextRight => RIGHT_BODY_FRAME,
        }
    }

    pub fn image_slot(self) -> Option<Frame> {
        match self {
            SlideLayout::TextOnly => None,
            SlideLayout::TextLeftImageRight => Some(RIGHT_IMAGE_SLOT),
            SlideLayout::ImageLeftTextRight => Some(LEFT_IMAGE_SLOT),
        }
    }

    /// Body text size in points.
    pub fn body_font_size(self) -> u32 {
        match self {
            SlideLayout::TextOnly => 16,
            _ => 14,
        }
    }
}

/// Scale `width` x `height` to fit inside `slot` keeping its aspect ratio,
/// centred in the slot.
pub fn letterbox(slot: Frame, width: u32, height: u32) -> Frame {
    if width == 0 || height == 0 {
        return slot;
    }
    let scale = (slot.w / width as f64).min(slot.h / height as f64);
    let w = width as f64 * scale;
    let h = height as f64 * scale;
    Frame {
        x: slot.x + (slot.w - w) / 2.0,
        y: slot.y + (slot.h - h) / 2.0,
        w,
        h,
    }
}

/// One slide ready to render.
#[derive(Debug, Clone, Copy)]
pub struct RenderSlide<'a> {
    pub index: usize,
    pub entry: &'a SlidePlanEntry,
    pub image: Option<&'a NormalizedImage>,
    pub layout: SlideLayout,
}

impl RenderSlide<'_> {
    /// Where the image is drawn, already letterboxed.
    pub fn image_frame(&self) -> Option<Frame> {
        let image = self.image?;
        let slot = self.layout.image_slot()?;
        Some(letterbox(slot, image.width, image.height))
    }
}

/// The finished slide set handed from generation to preview and export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    slides: Vec<SlidePlanEntry>,
    images: Vec<Option<NormalizedImage>>,
}

impl RenderModel {
    pub fn new(slides: Vec<SlidePlanEntry>, images: Vec<Option<NormalizedImage>>) -> Result<Self> {
        if slides.len() != images.len() {
            return Err(DeckError::ValidationError(format!(
                "Slide and image counts differ: {} slides, {} images",
                slides.len(),
                images.len()
            )));
        }
        Ok(Self { slides, images })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[SlidePlanEntry] {
        &self.slides
    }

    pub fn images(&self) -> &[Option<NormalizedImage>] {
        &self.images
    }

    pub fn iter(&self) -> impl Iterator<Item = RenderSlide<'_>> {
        self.slides
            .iter()
            .zip(self.images.iter())
            .enumerate()
            .map(|(index, (entry, image))| RenderSlide {
                index,
                entry,
                image: image.as_ref(),
                layout: SlideLayout::for_slide(index, image.is_some()),
            })
    }
}
