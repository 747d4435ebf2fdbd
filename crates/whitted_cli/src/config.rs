//! Render configuration loaded from JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use whitted_renderer::{RenderRequest, RenderSettings};

/// Everything the CLI needs besides the scene itself.
///
/// Missing fields fall back to their defaults, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub width: u32,
    pub height: u32,
    pub view_plane_width: f32,
    pub threads: Option<usize>,
    pub settings: RenderSettings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            view_plane_width: 1.0,
            threads: None,
            settings: RenderSettings {
                max_recursion_level: 5,
                anti_aliasing_factor: 2,
                reflections: true,
                refractions: true,
                ambient: whitted_renderer::Color::splat(0.2),
                ..RenderSettings::default()
            },
        }
    }
}

impl CliConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn request(&self) -> RenderRequest {
        RenderRequest {
            width: self.width,
            height: self.height,
            view_plane_width: self.view_plane_width,
            threads: self.threads,
        }
    }
}
