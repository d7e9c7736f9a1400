//! Content domain: data-driven tuning loaded from RON files.

mod loader;


pub use loader::{ContentLoadError, MOTION_DATA_PATH, load_motion_tuning, parse_single};

use bevy::prelude::*;

use crate::content::loader::load_motion_content;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_motion_content);
    }
}
