// ABOUTME: Media handling for the script-deck application
// ABOUTME: Loads supplied images and normalizes them into data URIs with pixel dimensions

use crate::errors::{DeckError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, ImageReader};
use log::{debug, info, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// An image file supplied by the user, as read from disk.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl SourceImage {
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        let path = path.into();
        let mime_type = detect_mime_type(&data, Some(&path));
        Self {
            path,
            mime_type,
            data,
        }
    }

    /// Read an image file. A file that cannot be read is reported with its path.
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| DeckError::MediaReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_bytes(path, data))
    }

    pub fn base64_data(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// Read every supplied image in order.
pub async fn load_sources(paths: &[PathBuf]) -> Result<Vec<SourceImage>> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        sources.push(SourceImage::load(path).await?);
    }
    info!("Loaded {} supplied images", sources.len());
    Ok(sources)
}

/// An image ready for embedding: a self-describing data URI plus its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub encoded_payload: String,
    pub width: u32,
    pub height: u32,
}

impl NormalizedImage {
    /// Build from raw bytes. Fails if the bytes do not decode to an image
    /// with non-zero dimensions.
    pub fn from_bytes(mime_type: &str, data: &[u8]) -> Result<Self> {
        let (width, height) = measure(data)?;
        Ok(Self {
            encoded_payload: format!("data:{};base64,{}", mime_type, STANDARD.encode(data)),
            width,
            height,
        })
    }

    /// MIME type declared by the data URI.
    pub fn mime_type(&self) -> Option<&str> {
        let header = self.encoded_payload.strip_prefix("data:")?;
        let (mime, _) = header.split_once(';')?;
        Some(mime)
    }

    /// Decode the data URI back into its MIME type and bytes.
    pub fn decode_payload(&self) -> Result<(String, Vec<u8>)> {
        let (header, body) = self
            .encoded_payload
            .split_once(',')
            .ok_or_else(|| DeckError::ImageError("Payload is not a data URI".to_string()))?;
        let mime = header
            .strip_prefix("data:")
            .and_then(|h| h.strip_suffix(";base64"))
            .ok_or_else(|| {
                DeckError::ImageError(format!("Unsupported data URI header: {}", header))
            })?;
        let bytes = STANDARD
            .decode(body)
            .map_err(|e| DeckError::ImageError(format!("Invalid base64 payload: {}", e)))?;
        Ok((mime.to_string(), bytes))
    }
}

/// Normalize every source. The output has one slot per input; a source that
/// cannot be decoded leaves `None` in its slot.
pub fn normalize_all(sources: &[SourceImage]) -> Vec<Option<NormalizedImage>> {
    sources
        .iter()
        .enumerate()
        .map(
            |(index, source)| match NormalizedImage::from_bytes(&source.mime_type, &source.data) {
                Ok(image) => {
                    debug!(
                        "Normalized image {} ({:?}): {}x{}",
                        index, source.path, image.width, image.height
                    );
                    Some(image)
                }
                Err(e) => {
                    warn!("Failed to normalize image {:?}: {}", source.path, e);
                    None
                }
            },
        )
        .collect()
}

/// Pixel dimensions of an encoded image.
pub fn measure(data: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(DeckError::FileReadError)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DeckError::ImageError(format!("Failed to read image dimensions: {}", e)))?;
    if width == 0 || height == 0 {
        return Err(DeckError::ImageError(format!(
            "Image has empty dimensions {}x{}",
            width, height
        )));
    }
    Ok((width, height))
}

/// Sniff the MIME type from the bytes, falling back to the file extension.
pub fn detect_mime_type(data: &[u8], path: Option<&Path>) -> String {
    if let Ok(format) = image::guess_format(data) {
        return format.to_mime_type().to_string();
    }
    path.and_then(|p| ImageFormat::from_path(p).ok())
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// File extension used when packaging an image of the given MIME type.
pub fn extension_for_mime_type(mime_type: &str) -> &'static str {
    ImageFormat::from_mime_type(mime_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("png")
}
