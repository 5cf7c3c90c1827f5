// ABOUTME: Utility functions for the script-deck application
// ABOUTME: Provides path validation, directory creation, and image path expansion

use crate::errors::{DeckError, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(DeckError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(DeckError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Expand the image arguments given on the command line.
///
/// Plain paths are kept in the order given; glob patterns are expanded and
/// their matches sorted. Positions in the result are the indices the slide
/// plan refers to.
pub fn expand_image_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if !is_glob_pattern(input) {
            let path = PathBuf::from(input);
            validate_file_exists(&path)?;
            paths.push(path);
            continue;
        }

        let mut matches: Vec<PathBuf> = glob::glob(input)
            .map_err(|e| DeckError::ValidationError(format!("Invalid glob pattern: {}", e)))?
            .flatten()
            .filter(|p| p.is_file())
            .collect();
        matches.sort();

        if matches.is_empty() {
            return Err(DeckError::ValidationError(format!(
                "No images found matching pattern: {}",
                input
            )));
        }
        info!("Pattern {} matched {} images", input, matches.len());
        paths.extend(matches);
    }

    Ok(paths)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
