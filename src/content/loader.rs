//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::MotionTuning;

/// Path of the per-character motion tuning, relative to the working directory.
pub const MOTION_DATA_PATH: &str = "assets/data/motion.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single RON struct. `file` only labels errors.
pub fn parse_single<T>(contents: &str, file: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct from disk.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_single(&contents, &file_name)
}

/// Load motion tuning. Values are not validated here; the character
/// constructor rejects invalid tuning.
pub fn load_motion_tuning(path: &Path) -> Result<MotionTuning, ContentLoadError> {
    load_single_file(path)
}

/// Insert the motion tuning resource before the player is spawned.
/// Falls back to the built-in tuning if the file can't be read or parsed.
pub(crate) fn load_motion_content(mut commands: Commands) {
    match load_motion_tuning(Path::new(MOTION_DATA_PATH)) {
        Ok(tuning) => {
            info!("Loaded motion tuning from {}", MOTION_DATA_PATH);
            commands.insert_resource(tuning);
        }
        Err(e) => {
            warn!("{}; using default motion tuning", e);
        }
    }
}
