//! [GraphicsContext] implementations on top of the browser's WebGL 1 and WebGL 2 rendering
//! contexts.
//!
//! Both APIs expose the exact same entry points for everything the demos use, so a single macro
//! generates both implementations.

use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlRenderingContext,
    WebGlShader, WebGlUniformLocation,
};

use crate::runtime::graphics_context::{
    AttributeFormat, AttributeSlot, ClearValues, GraphicsContext, IndexFormat, PrimitiveTopology,
    ShaderStage,
};

macro_rules! topology_to_gl {
    ($gl:ident, $topology:expr) => {
        match $topology {
            PrimitiveTopology::Triangles => $gl::TRIANGLES,
        }
    };
}

macro_rules! impl_graphics_context {
    ($name:ident, $gl:ident, $context_id:literal) => {
        impl $name {
            pub fn new(gl: $gl) -> Self {
                $name { gl }
            }

            /// Obtains a fresh rendering context from the `canvas`.
            pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
                let gl = canvas
                    .get_context($context_id)?
                    .ok_or_else(|| {
                        JsValue::from_str(concat!("canvas does not support `", $context_id, "`"))
                    })?
                    .dyn_into::<$gl>()?;

                Ok($name::new(gl))
            }

            pub fn gl(&self) -> &$gl {
                &self.gl
            }
        }

        impl GraphicsContext for $name {
            type Shader = WebGlShader;

            type Program = WebGlProgram;

            type Buffer = WebGlBuffer;

            type UniformLocation = WebGlUniformLocation;

            fn clear(&mut self, values: &ClearValues) {
                let [r, g, b, a] = values.color;

                self.gl.clear_color(r, g, b, a);
                self.gl.clear_depth(values.depth);
                self.gl.clear($gl::COLOR_BUFFER_BIT | $gl::DEPTH_BUFFER_BIT);
            }

            fn create_shader(&mut self, stage: ShaderStage, source: &str) -> Option<WebGlShader> {
                let tpe = match stage {
                    ShaderStage::Vertex => $gl::VERTEX_SHADER,
                    ShaderStage::Fragment => $gl::FRAGMENT_SHADER,
                };

                let shader = self.gl.create_shader(tpe)?;

                self.gl.shader_source(&shader, source);
                self.gl.compile_shader(&shader);

                Some(shader)
            }

            fn shader_compiled(&self, shader: &WebGlShader) -> bool {
                self.gl
                    .get_shader_parameter(shader, $gl::COMPILE_STATUS)
                    .as_bool()
                    .unwrap_or(false)
            }

            fn shader_info_log(&self, shader: &WebGlShader) -> String {
                self.gl.get_shader_info_log(shader).unwrap_or_default()
            }

            fn link_program(
                &mut self,
                vertex_shader: &WebGlShader,
                fragment_shader: &WebGlShader,
            ) -> Option<WebGlProgram> {
                let program = self.gl.create_program()?;

                self.gl.attach_shader(&program, vertex_shader);
                self.gl.attach_shader(&program, fragment_shader);
                self.gl.link_program(&program);

                Some(program)
            }

            fn program_linked(&self, program: &WebGlProgram) -> bool {
                self.gl
                    .get_program_parameter(program, $gl::LINK_STATUS)
                    .as_bool()
                    .unwrap_or(false)
            }

            fn program_info_log(&self, program: &WebGlProgram) -> String {
                self.gl.get_program_info_log(program).unwrap_or_default()
            }

            fn use_program(&mut self, program: &WebGlProgram) {
                self.gl.use_program(Some(program));
            }

            fn attribute_slot(&self, program: &WebGlProgram, name: &str) -> Option<AttributeSlot> {
                let location = self.gl.get_attrib_location(program, name);

                // -1 signals that the program has no active attribute with this name.
                if location < 0 {
                    None
                } else {
                    Some(AttributeSlot(location as u32))
                }
            }

            fn uniform_location(
                &self,
                program: &WebGlProgram,
                name: &str,
            ) -> Option<WebGlUniformLocation> {
                self.gl.get_uniform_location(program, name)
            }

            fn create_vertex_buffer(&mut self, data: &[f32]) -> Option<WebGlBuffer> {
                let buffer = self.gl.create_buffer()?;
                let array = Float32Array::from(data);

                self.gl.bind_buffer($gl::ARRAY_BUFFER, Some(&buffer));
                self.gl
                    .buffer_data_with_array_buffer_view($gl::ARRAY_BUFFER, &array, $gl::STATIC_DRAW);
                self.gl.bind_buffer($gl::ARRAY_BUFFER, None);

                Some(buffer)
            }

            fn create_index_buffer(&mut self, data: &[u16]) -> Option<WebGlBuffer> {
                let buffer = self.gl.create_buffer()?;
                let array = Uint16Array::from(data);

                self.gl.bind_buffer($gl::ELEMENT_ARRAY_BUFFER, Some(&buffer));
                self.gl.buffer_data_with_array_buffer_view(
                    $gl::ELEMENT_ARRAY_BUFFER,
                    &array,
                    $gl::STATIC_DRAW,
                );
                self.gl.bind_buffer($gl::ELEMENT_ARRAY_BUFFER, None);

                Some(buffer)
            }

            fn bind_attribute(
                &mut self,
                slot: AttributeSlot,
                buffer: &WebGlBuffer,
                format: AttributeFormat,
            ) {
                self.gl.bind_buffer($gl::ARRAY_BUFFER, Some(buffer));
                self.gl.enable_vertex_attrib_array(slot.0);
                self.gl.vertex_attrib_pointer_with_i32(
                    slot.0,
                    format.components() as i32,
                    $gl::FLOAT,
                    false,
                    0,
                    0,
                );
                self.gl.bind_buffer($gl::ARRAY_BUFFER, None);
            }

            fn upload_matrix4(
                &mut self,
                program: &WebGlProgram,
                location: &WebGlUniformLocation,
                matrix: &[f32; 16],
            ) {
                self.gl.use_program(Some(program));
                self.gl
                    .uniform_matrix4fv_with_f32_array(Some(location), false, &matrix[..]);
            }

            fn draw_arrays(
                &mut self,
                program: &WebGlProgram,
                topology: PrimitiveTopology,
                first: u32,
                count: u32,
            ) {
                self.gl.use_program(Some(program));
                self.gl
                    .draw_arrays(topology_to_gl!($gl, topology), first as i32, count as i32);
            }

            fn draw_elements(
                &mut self,
                program: &WebGlProgram,
                index_buffer: &WebGlBuffer,
                topology: PrimitiveTopology,
                count: u32,
                format: IndexFormat,
                offset: u32,
            ) {
                let tpe = match format {
                    IndexFormat::UnsignedShort => $gl::UNSIGNED_SHORT,
                };

                self.gl.use_program(Some(program));
                self.gl
                    .bind_buffer($gl::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
                self.gl.draw_elements_with_i32(
                    topology_to_gl!($gl, topology),
                    count as i32,
                    tpe,
                    offset as i32,
                );
            }

            fn flush(&mut self) {
                self.gl.flush();
            }
        }
    };
}

/// A [GraphicsContext] backed by a `webgl` (WebGL 1) rendering context.
#[derive(Clone)]
pub struct WebGlContext {
    gl: WebGlRenderingContext,
}

impl_graphics_context!(WebGlContext, WebGlRenderingContext, "webgl");

/// A [GraphicsContext] backed by a `webgl2` rendering context.
#[derive(Clone)]
pub struct WebGl2Context {
    gl: WebGl2RenderingContext,
}

impl_graphics_context!(WebGl2Context, WebGl2RenderingContext, "webgl2");
