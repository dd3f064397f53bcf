// Copyright 2025. Scene rendering for pixel comparison.
//
// Scenes are either one of the library's built-ins or a JSON file on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use sw_renderer::rect_rasterizer::RectRasterizer;
use sw_renderer::scene::{self, Scene};
use sw_renderer::surface::Surface;

/// Resolve a built-in scene name, falling back to reading a JSON file.
pub fn load_scene(name_or_path: &str) -> Result<Scene> {
    if let Some(scene) = scene::builtin(name_or_path) {
        return Ok(scene);
    }
    let path = Path::new(name_or_path);
    let json = fs::read_to_string(path)
        .with_context(|| format!("'{name_or_path}' is neither a built-in scene nor a readable file"))?;
    Scene::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

/// Render a scene with the default rasterizer.
pub fn render_scene(scene: &Scene) -> Result<Surface> {
    Ok(scene.render(&RectRasterizer::new())?)
}

/// A short label for output file names: the built-in name or the file stem.
pub fn scene_label(name_or_path: &str) -> String {
    Path::new(name_or_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene")
        .to_string()
}

/// List all built-in scene names.
pub fn available_scenes() -> &'static [&'static str] {
    scene::builtin_names()
}
