//! Scenes: ordered lists of draw and clear operations.
//!
//! A scene is what the comparison tooling renders on both backends: a
//! surface size, an optional background, and the rectangle operations to
//! run in order. Later operations overwrite earlier pixels.

use crate::basics::PointD;
use crate::color::Rgba8;
use crate::line_stroker::LineStroker;
use crate::rect_rasterizer::RectRasterizer;
use crate::rect_shape::RectShape;
use crate::surface::Surface;
use thiserror::Error;

/// Largest accepted scene width or height.
pub const MAX_SCENE_DIM: u32 = 1 << 14;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene size {width}x{height} must be between 1 and {max} on each axis", max = MAX_SCENE_DIM)]
    Size { width: u32, height: u32 },
    #[cfg(feature = "serde")]
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One rasterizer call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "lowercase"))]
pub enum SceneOp {
    Draw(RectShape),
    Clear(RectShape),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub background: Option<Rgba8>,
    pub ops: Vec<SceneOp>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            ops: Vec::new(),
        }
    }

    pub fn with_background(mut self, c: Rgba8) -> Self {
        self.background = Some(c);
        self
    }

    pub fn draw(mut self, shape: RectShape) -> Self {
        self.ops.push(SceneOp::Draw(shape));
        self
    }

    pub fn clear(mut self, shape: RectShape) -> Self {
        self.ops.push(SceneOp::Clear(shape));
        self
    }

    /// Check the surface size is renderable.
    pub fn validate(&self) -> Result<(), SceneError> {
        let ok = |d: u32| (1..=MAX_SCENE_DIM).contains(&d);
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(SceneError::Size {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Parse and validate a scene from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run every operation in order on a fresh surface.
    pub fn render<L: LineStroker>(&self, ras: &RectRasterizer<L>) -> Result<Surface, SceneError> {
        self.validate()?;
        let mut surface = Surface::new(self.width, self.height);
        if let Some(bg) = self.background {
            surface.fill(bg);
        }
        for op in &self.ops {
            match op {
                SceneOp::Draw(shape) => ras.draw(&mut surface, shape),
                SceneOp::Clear(shape) => ras.clear(&mut surface, shape),
            }
        }
        log::debug!(
            "rendered scene {}x{} with {} ops",
            self.width,
            self.height,
            self.ops.len()
        );
        Ok(surface)
    }
}

// ============================================================================
// Built-in comparison scenes
// ============================================================================

const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);
const BLUE: Rgba8 = Rgba8::new_opaque(0, 0, 255);
const ORANGE: Rgba8 = Rgba8::new_opaque(255, 165, 0);
const TEAL: Rgba8 = Rgba8::new_opaque(0, 128, 128);

fn rect(cx: f64, cy: f64, w: f64, h: f64) -> RectShape {
    RectShape::new(PointD::new(cx, cy), w, h)
}

/// Names accepted by [`builtin`].
pub fn builtin_names() -> &'static [&'static str] {
    &[
        "filled_rect",
        "stroked_rect",
        "rotated_rect",
        "thick_stroked_rotated_rect",
        "hairline_rotated_rect",
        "clear_round_trip",
        "everything_together",
    ]
}

/// A named comparison scene, or `None` if the name is unknown.
pub fn builtin(name: &str) -> Option<Scene> {
    let scene = match name {
        "filled_rect" => Scene::new(10, 10).draw(rect(5.0, 5.0, 4.0, 4.0).with_fill(RED)),
        "stroked_rect" => Scene::new(40, 40)
            .with_background(Rgba8::WHITE)
            .draw(rect(20.0, 20.0, 20.0, 12.0).with_stroke(3.0, Rgba8::BLACK)),
        "rotated_rect" => Scene::new(60, 60).draw(
            rect(30.0, 30.0, 30.0, 18.0)
                .with_rotation(std::f64::consts::FRAC_PI_6)
                .with_fill(BLUE),
        ),
        "thick_stroked_rotated_rect" => Scene::new(60, 60).with_background(Rgba8::WHITE).draw(
            rect(30.0, 30.0, 28.0, 20.0)
                .with_rotation(0.4)
                .with_fill(ORANGE)
                .with_stroke(6.0, Rgba8::BLACK),
        ),
        "hairline_rotated_rect" => Scene::new(60, 60).with_background(Rgba8::WHITE).draw(
            rect(30.0, 30.0, 36.0, 16.0)
                .with_rotation(-0.25)
                .with_stroke(1.0, Rgba8::BLACK),
        ),
        "clear_round_trip" => {
            let shape = rect(20.0, 20.0, 15.0, 9.0).with_rotation(0.6).with_fill(RED);
            Scene::new(40, 40).draw(shape).clear(shape)
        }
        "everything_together" => {
            let mut scene = Scene::new(200, 150).with_background(Rgba8::WHITE);
            for i in 0..5 {
                let fi = i as f64;
                scene = scene.draw(
                    rect(25.0 + fi * 37.0, 30.0, 24.0, 16.0 + fi * 2.0)
                        .with_fill(TEAL)
                        .with_stroke(fi, Rgba8::BLACK),
                );
                scene = scene.draw(
                    rect(25.0 + fi * 37.0, 80.0, 24.0, 16.0)
                        .with_rotation(fi * 0.3 + 0.15)
                        .with_fill(ORANGE)
                        .with_stroke(1.0 + fi, BLUE),
                );
            }
            scene
                .draw(rect(100.0, 125.0, 180.0, 20.0).with_fill(RED))
                .clear(rect(100.0, 125.0, 60.0, 10.0))
        }
        _ => return None,
    };
    Some(scene)
}

// ============================================================================
// Tests
// ============================================================================
