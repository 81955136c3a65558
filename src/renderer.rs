use cgmath::{Matrix4, SquareMatrix};

use crate::error::RendererError;
use crate::options::{DemoOptions, DrawMode};
use crate::runtime::{
    AnimationLoop, AttributeFormat, ClearValues, FrameProvider, GraphicsContext, IndexFormat,
    PrimitiveTopology,
};
use crate::shader::{self, ShaderSources, COLOR_ATTRIBUTE, MVP_UNIFORM, POSITION_ATTRIBUTE};
use crate::surface::SurfaceSize;
use crate::task::{GpuTask, Progress};
use crate::transform::{self, FrameCounter, Transform};

struct IndexBuffer<B> {
    buffer: B,
    len: u32,
}

enum DrawCall<B> {
    /// Unindexed vertices, drawn a single time.
    Arrays { vertex_count: u32 },

    /// Indexed vertices, redrawn with a fresh rotation on every frame.
    Elements {
        indices: IndexBuffer<B>,
        rotation_axis: [f32; 3],
    },
}

/// Owns the GPU resources and transform state of one demo and draws it.
///
/// A renderer is created against a [GraphicsContext] with [Renderer::new], which performs all
/// one-time setup: it compiles and links the program, uploads the static geometry and computes
/// the camera's view and projection. It then acts as a [GpuTask] that either draws once and
/// finishes ([DrawMode::DrawArrays]) or draws a rotating frame every time it is progressed and
/// never finishes ([DrawMode::DrawElements]). Use [Renderer::start] to drive it with an
/// [AnimationLoop].
pub struct Renderer<C>
where
    C: GraphicsContext,
{
    program: C::Program,
    // Attribute slots read from these buffers; they must live as long as the renderer draws.
    _position_buffer: C::Buffer,
    _color_buffer: C::Buffer,
    mvp_location: C::UniformLocation,
    draw_call: DrawCall<C::Buffer>,
    transform: Transform,
    frame_counter: FrameCounter,
    clear_values: ClearValues,
}

impl<C> Renderer<C>
where
    C: GraphicsContext,
{
    pub fn new(
        context: &mut C,
        surface: SurfaceSize,
        options: &DemoOptions,
        sources: &ShaderSources,
    ) -> Result<Self, RendererError> {
        options.validate()?;

        let geometry = options.geometry();
        let clear_values = options.clear_values();

        context.clear(&clear_values);

        let program = shader::build_program(context, sources)?;

        let position_slot = context
            .attribute_slot(&program, POSITION_ATTRIBUTE)
            .ok_or_else(|| RendererError::MissingAttribute(POSITION_ATTRIBUTE.to_string()))?;
        let color_slot = context
            .attribute_slot(&program, COLOR_ATTRIBUTE)
            .ok_or_else(|| RendererError::MissingAttribute(COLOR_ATTRIBUTE.to_string()))?;
        let mvp_location = context
            .uniform_location(&program, MVP_UNIFORM)
            .ok_or_else(|| RendererError::MissingUniform(MVP_UNIFORM.to_string()))?;

        let position_buffer = context
            .create_vertex_buffer(&geometry.position_data())
            .ok_or(RendererError::ResourceAllocation("position buffer"))?;
        let color_buffer = context
            .create_vertex_buffer(&geometry.color_data())
            .ok_or(RendererError::ResourceAllocation("color buffer"))?;

        context.bind_attribute(position_slot, &position_buffer, AttributeFormat::Float3);
        context.bind_attribute(color_slot, &color_buffer, AttributeFormat::Float4);

        log::debug!("uploaded {} vertices", geometry.vertex_count());

        let draw_call = match options.mode {
            DrawMode::DrawArrays => DrawCall::Arrays {
                vertex_count: geometry.vertex_count() as u32,
            },
            DrawMode::DrawElements => {
                // Presence of indices is checked by `validate`.
                let indices = geometry.indices.as_ref().map(Vec::as_slice).unwrap_or(&[]);
                let buffer = context
                    .create_index_buffer(indices)
                    .ok_or(RendererError::ResourceAllocation("index buffer"))?;

                log::debug!("uploaded {} indices", indices.len());

                DrawCall::Elements {
                    indices: IndexBuffer {
                        buffer,
                        len: indices.len() as u32,
                    },
                    rotation_axis: options.rotation_axis,
                }
            }
        };

        let transform = Transform::new(&options.camera(), surface.aspect());

        log::info!(
            "renderer ready: {:?} on a {}x{} surface",
            options.mode,
            surface.width(),
            surface.height()
        );

        Ok(Renderer {
            program,
            _position_buffer: position_buffer,
            _color_buffer: color_buffer,
            mvp_location,
            draw_call,
            transform,
            frame_counter: FrameCounter::new(),
            clear_values,
        })
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The number of frames rendered so far; stays `0` for [DrawMode::DrawArrays].
    pub fn frame(&self) -> u64 {
        self.frame_counter.frame()
    }

    /// Hands the renderer and its context to an [AnimationLoop] driven by `frames`.
    ///
    /// The first draw happens before this returns.
    pub fn start<P>(self, context: C, frames: P)
    where
        C: 'static,
        P: FrameProvider + Clone + 'static,
    {
        AnimationLoop::new(self, context, frames).start();
    }

    fn upload_mvp(&self, context: &mut C, mvp: &Matrix4<f32>) {
        context.upload_matrix4(
            &self.program,
            &self.mvp_location,
            &transform::to_column_major(mvp),
        );
    }
}

impl<C> GpuTask<C> for Renderer<C>
where
    C: GraphicsContext,
{
    type Output = ();

    fn progress(&mut self, context: &mut C) -> Progress<()> {
        match &self.draw_call {
            DrawCall::Arrays { vertex_count } => {
                let vertex_count = *vertex_count;
                let mvp = *self.transform.set_model(Matrix4::identity());

                self.upload_mvp(context, &mvp);
                context.draw_arrays(&self.program, PrimitiveTopology::Triangles, 0, vertex_count);
                context.flush();

                Progress::Finished(())
            }
            DrawCall::Elements {
                indices,
                rotation_axis,
            } => {
                context.clear(&self.clear_values);

                let frame = self.frame_counter.advance();
                let model = transform::model_for_frame(frame, *rotation_axis);
                let mvp = *self.transform.set_model(model);

                log::trace!("frame {}", frame);

                self.upload_mvp(context, &mvp);
                context.draw_elements(
                    &self.program,
                    &indices.buffer,
                    PrimitiveTopology::Triangles,
                    indices.len,
                    IndexFormat::UnsignedShort,
                    0,
                );
                context.flush();

                Progress::ContinueNextFrame
            }
        }
    }
}
