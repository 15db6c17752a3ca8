//! WASM API module for browser/JS interop
//!
//! Exposes validation, conversion and rendering of sprite documents to
//! JavaScript. Errors are returned as messages rather than thrown.

use wasm_bindgen::prelude::*;

use crate::builder::unused_colors;
use crate::file::Loader;
use crate::models::SpriteModel;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of converting a document between formats.
#[wasm_bindgen]
pub struct ConvertResult {
    output: String,
    error: Option<String>,
}

#[wasm_bindgen]
impl ConvertResult {
    /// Converted document text (empty on failure)
    #[wasm_bindgen(getter)]
    pub fn output(&self) -> String {
        self.output.clone()
    }

    /// Error message, if conversion failed
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Result of rendering a sprite to RGBA pixels.
#[wasm_bindgen]
pub struct RenderResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    error: Option<String>,
}

#[wasm_bindgen]
impl RenderResult {
    /// Width of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Error message, if the document could not be rendered
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Validate a document and return its problems.
///
/// Errors stop validation, so at most one error is reported, followed by
/// warnings for unused colors. An empty array means the document is valid.
#[wasm_bindgen]
pub fn validate(text: &str, format: &str) -> Vec<String> {
    match Loader::new().load_str(text, format) {
        Ok(model) => unused_colors(&model)
            .into_iter()
            .map(|ch| format!("warning: color '{}' is never used", ch))
            .collect(),
        Err(e) => vec![format!("error: {}", e)],
    }
}

/// Convert a document from one format to another.
#[wasm_bindgen]
pub fn convert(text: &str, from: &str, to: &str) -> ConvertResult {
    let loader = Loader::new();
    match loader.load_str(text, from).and_then(|m| loader.save_string(&m, to)) {
        Ok(output) => ConvertResult { output, error: None },
        Err(e) => ConvertResult { output: String::new(), error: Some(e.to_string()) },
    }
}

/// Render a static sprite, or the first frame of the first animation.
#[wasm_bindgen]
pub fn render_to_rgba(text: &str, format: &str) -> RenderResult {
    let grid = Loader::new().load_str(text, format).map(|model| match model {
        SpriteModel::Static(s) => Some(s.grid().clone()),
        SpriteModel::Animated(a) => a
            .animations()
            .values()
            .next()
            .and_then(|anim| anim.frames().first())
            .and_then(|f| f.grid().cloned()),
    });

    match grid {
        Ok(Some(grid)) => {
            let image = grid.to_image();
            RenderResult {
                width: image.width(),
                height: image.height(),
                pixels: image.into_raw(),
                error: None,
            }
        }
        Ok(None) => RenderResult {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            error: Some("sprite has no frame to render".to_string()),
        },
        Err(e) => RenderResult { width: 0, height: 0, pixels: Vec::new(), error: Some(e.to_string()) },
    }
}
