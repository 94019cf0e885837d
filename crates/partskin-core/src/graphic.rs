//! Appearance types shared by parts, rules, and the graphic-initialization hook.
//!
//! The host owns rendering. This crate only fills in a [`GraphicData`]
//! descriptor and asks a [`GraphicInit`] implementation to turn it into a
//! [`RenderedGraphic`].

use serde::{Deserialize, Serialize};
use std::convert::Infallible;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGBA color with linear float components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// ---------------------------------------------------------------------------
// Graphic descriptor
// ---------------------------------------------------------------------------

/// How the host draws a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphicClass {
    /// One texture tinted by `color`.
    #[default]
    Single,
    /// A base texture plus a mask selecting where `color_two` applies.
    SingleWithMask,
}

/// Shader used for the drawn texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    #[default]
    Cutout,
    /// Two-color cutout; required by masked graphics.
    CutoutComplex,
}

/// Width/height of the drawn graphic in host units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawSize {
    pub x: f32,
    pub y: f32,
}

impl DrawSize {
    pub const ONE: DrawSize = DrawSize { x: 1.0, y: 1.0 };
}

impl Default for DrawSize {
    fn default() -> Self {
        Self::ONE
    }
}

/// A part's graphic descriptor: what the host reads to build its graphic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphicData {
    pub texture_path: String,
    #[serde(default)]
    pub class: GraphicClass,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub color_two: Color,
    #[serde(default)]
    pub draw_size: DrawSize,
    #[serde(default)]
    pub shader: ShaderKind,
    /// Mask texture for [`GraphicClass::SingleWithMask`].
    #[serde(default)]
    pub mask_path: Option<String>,
}

impl GraphicData {
    pub fn single(texture_path: impl Into<String>) -> Self {
        Self {
            texture_path: texture_path.into(),
            ..Self::default()
        }
    }
}

/// What the host hands back after initializing a graphic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedGraphic {
    /// Texture the host will show as the part's icon.
    pub main_texture: String,
    pub color: Color,
    pub class: GraphicClass,
}

// ---------------------------------------------------------------------------
// Initialization hook
// ---------------------------------------------------------------------------

/// Host hook that turns a filled-in descriptor into a rendered graphic.
///
/// Invoked by the applier after the override fields are written and before
/// the rendered icon is copied back onto the part.
pub trait GraphicInit {
    type Error: std::error::Error;

    fn init(&mut self, data: &GraphicData) -> Result<RenderedGraphic, Self::Error>;
}

/// Renders the descriptor's texture path as-is. Used by the CLI and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughInit;

impl GraphicInit for PassthroughInit {
    type Error = Infallible;

    fn init(&mut self, data: &GraphicData) -> Result<RenderedGraphic, Infallible> {
        Ok(RenderedGraphic {
            main_texture: data.texture_path.clone(),
            color: data.color,
            class: data.class,
        })
    }
}
