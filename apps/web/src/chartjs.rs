use serde::Serialize;
use t20_core::charts::{ChartSpec, ChartSurface, FALLBACK_NOTE};
use t20_core::ChartError;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::api::describe;

// Chart.js is loaded by the page template as a global.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(item: &Element, config: &JsValue) -> Result<ChartJs, JsValue>;
}

/// Canvases of the current document, drawn with the global `Chart`.
pub struct CanvasSurface {
    document: Document,
}

impl CanvasSurface {
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ChartSurface for CanvasSurface {
    fn draw(&mut self, spec: &ChartSpec) -> Result<(), ChartError> {
        let canvas_id = spec.canvas_id();
        let canvas = self
            .document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| ChartError::MissingCanvas(canvas_id.to_string()))?;

        let config = spec
            .config()
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|error| ChartError::Library(error.to_string()))?;

        // Chart.js keeps the instance attached to the canvas.
        ChartJs::new(&canvas, &config)
            .map(drop)
            .map_err(|error| ChartError::Library(describe(&error)))
    }

    fn show_fallback(&mut self, canvas_id: &str) {
        let Some(canvas) = self.document.get_element_by_id(canvas_id) else {
            return;
        };
        let note = format!("<div class=\"chart-error\">{FALLBACK_NOTE}</div>");
        if let Err(error) = canvas.insert_adjacent_html("afterend", &note) {
            log::warn!("could not add fallback note for {canvas_id}: {}", describe(&error));
        }
    }
}
