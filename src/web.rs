//! Browser entry points.
//!
//! A host page loads the generated module and calls `run` with the id of a canvas element:
//!
//! ```js
//! import init, { run, run_with_shaders } from "./web_draw_demos.js";
//!
//! await init();
//! run("glcanvas", { mode: "draw-elements" });
//! ```
//!
//! `run_with_shaders` takes the vertex and fragment shader source text as two extra arguments
//! instead of using the bundled shaders.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::error::RendererError;
use crate::logging::init_logging;
use crate::options::{ContextVersion, DemoOptions};
use crate::renderer::Renderer;
use crate::runtime::{AnimationFrames, FrameProvider, GraphicsContext, WebGl2Context, WebGlContext};
use crate::shader::ShaderSources;
use crate::surface::SurfaceSize;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Runs a demo with the bundled shaders on the canvas with the id `canvas_id`.
///
/// `options` is a plain object with any subset of the [DemoOptions] fields in camelCase; pass
/// `undefined` to run the default demo. Setup errors are logged to the console and returned as a
/// rejected value; once setup succeeds the demo keeps running on animation frames.
#[wasm_bindgen]
pub fn run(canvas_id: &str, options: JsValue) -> Result<(), JsValue> {
    run_demo(canvas_id, &options, ShaderSources::default())
}

/// Like [run], but compiles the given shader source text.
///
/// The vertex shader must declare the `position` and `color` attributes and the `mvpMatrix`
/// uniform.
#[wasm_bindgen]
pub fn run_with_shaders(
    canvas_id: &str,
    options: JsValue,
    vertex_shader: String,
    fragment_shader: String,
) -> Result<(), JsValue> {
    run_demo(
        canvas_id,
        &options,
        ShaderSources::new(vertex_shader, fragment_shader),
    )
}

fn run_demo(canvas_id: &str, options: &JsValue, sources: ShaderSources) -> Result<(), JsValue> {
    let options = parse_options(options)?;

    init_logging(options.log_level);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{}`", canvas_id)))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("element `{}` is not a canvas", canvas_id)))?;

    canvas.set_width(options.canvas_size);
    canvas.set_height(options.canvas_size);

    let surface = SurfaceSize::new(canvas.width(), canvas.height()).map_err(to_js)?;
    let frames = AnimationFrames::new(window);

    let result = match options.context_version {
        ContextVersion::WebGl => launch(
            WebGlContext::from_canvas(&canvas)?,
            surface,
            &options,
            &sources,
            frames,
        ),
        ContextVersion::WebGl2 => launch(
            WebGl2Context::from_canvas(&canvas)?,
            surface,
            &options,
            &sources,
            frames,
        ),
    };

    result.map_err(to_js)
}

/// Builds a renderer on `context` and starts its animation loop on `frames`.
fn launch<C, P>(
    mut context: C,
    surface: SurfaceSize,
    options: &DemoOptions,
    sources: &ShaderSources,
    frames: P,
) -> Result<(), RendererError>
where
    C: GraphicsContext + 'static,
    P: FrameProvider + Clone + 'static,
{
    let renderer = Renderer::new(&mut context, surface, options, sources)?;

    renderer.start(context, frames);

    Ok(())
}

#[allow(deprecated)]
fn parse_options(options: &JsValue) -> Result<DemoOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(DemoOptions::default());
    }

    options
        .into_serde()
        .map_err(|err| JsValue::from_str(&format!("invalid options: {}", err)))
}

fn to_js(err: RendererError) -> JsValue {
    log::error!("{}", err);

    JsValue::from_str(&err.to_string())
}
