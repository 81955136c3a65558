use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::{
    AttributeFormat, AttributeSlot, ClearValues, GraphicsContext, IndexFormat, PrimitiveTopology,
    ShaderStage,
};
use crate::shader::{COLOR_ATTRIBUTE, MVP_UNIFORM, POSITION_ATTRIBUTE};

/// A call made on a [RecordingContext]. Object handles are plain ids, allocated in creation order
/// starting at 1 and shared between shaders, programs and buffers.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Call {
    Clear(ClearValues),
    CreateShader(ShaderStage),
    LinkProgram,
    UseProgram(u32),
    CreateVertexBuffer(Vec<f32>),
    CreateIndexBuffer(Vec<u16>),
    BindAttribute {
        slot: AttributeSlot,
        buffer: u32,
        format: AttributeFormat,
    },
    UploadMatrix4 {
        program: u32,
        location: u32,
        matrix: [f32; 16],
    },
    DrawArrays {
        program: u32,
        topology: PrimitiveTopology,
        first: u32,
        count: u32,
    },
    DrawElements {
        program: u32,
        index_buffer: u32,
        topology: PrimitiveTopology,
        count: u32,
        format: IndexFormat,
        offset: u32,
    },
    Flush,
}

/// A [GraphicsContext] that records every call instead of talking to a GPU.
pub(crate) struct RecordingContext {
    calls: Rc<RefCell<Vec<Call>>>,
    sources: Rc<RefCell<Vec<String>>>,
    next_id: u32,
    failing_stage: Option<(ShaderStage, String)>,
    failing_link: Option<String>,
    compiled: Vec<(u32, ShaderStage)>,
    attributes: Vec<&'static str>,
    uniforms: Vec<&'static str>,
}

/// Uniform location handed out for [MVP_UNIFORM].
pub(crate) const MVP_LOCATION: u32 = 100;

impl RecordingContext {
    pub(crate) fn new() -> Self {
        RecordingContext {
            calls: Rc::new(RefCell::new(Vec::new())),
            sources: Rc::new(RefCell::new(Vec::new())),
            next_id: 1,
            failing_stage: None,
            failing_link: None,
            compiled: Vec::new(),
            attributes: vec![POSITION_ATTRIBUTE, COLOR_ATTRIBUTE],
            uniforms: vec![MVP_UNIFORM],
        }
    }

    /// A handle on the call log that stays usable after the context is moved.
    pub(crate) fn calls(&self) -> Rc<RefCell<Vec<Call>>> {
        self.calls.clone()
    }

    /// A handle on the source text of every shader created, in creation order.
    pub(crate) fn shader_sources(&self) -> Rc<RefCell<Vec<String>>> {
        self.sources.clone()
    }

    pub(crate) fn fail_compile(&mut self, stage: ShaderStage, log: &str) {
        self.failing_stage = Some((stage, log.to_string()));
    }

    pub(crate) fn fail_link(&mut self, log: &str) {
        self.failing_link = Some(log.to_string());
    }

    pub(crate) fn without_attribute(&mut self, name: &str) {
        self.attributes.retain(|a| *a != name);
    }

    pub(crate) fn without_uniform(&mut self, name: &str) {
        self.uniforms.retain(|u| *u != name);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;

        self.next_id += 1;

        id
    }

    fn stage_of(&self, shader: u32) -> Option<ShaderStage> {
        self.compiled
            .iter()
            .find(|(id, _)| *id == shader)
            .map(|(_, stage)| *stage)
    }
}

impl GraphicsContext for RecordingContext {
    type Shader = u32;

    type Program = u32;

    type Buffer = u32;

    type UniformLocation = u32;

    fn clear(&mut self, values: &ClearValues) {
        self.record(Call::Clear(*values));
    }

    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> Option<u32> {
        let id = self.allocate();

        self.sources.borrow_mut().push(source.to_string());
        self.compiled.push((id, stage));
        self.record(Call::CreateShader(stage));

        Some(id)
    }

    fn shader_compiled(&self, shader: &u32) -> bool {
        match (&self.failing_stage, self.stage_of(*shader)) {
            (Some((failing, _)), Some(stage)) => *failing != stage,
            _ => true,
        }
    }

    fn shader_info_log(&self, shader: &u32) -> String {
        match (&self.failing_stage, self.stage_of(*shader)) {
            (Some((failing, log)), Some(stage)) if *failing == stage => log.clone(),
            _ => String::new(),
        }
    }

    fn link_program(&mut self, _vertex_shader: &u32, _fragment_shader: &u32) -> Option<u32> {
        let id = self.allocate();

        self.record(Call::LinkProgram);

        Some(id)
    }

    fn program_linked(&self, _program: &u32) -> bool {
        self.failing_link.is_none()
    }

    fn program_info_log(&self, _program: &u32) -> String {
        self.failing_link.clone().unwrap_or_default()
    }

    fn use_program(&mut self, program: &u32) {
        self.record(Call::UseProgram(*program));
    }

    fn attribute_slot(&self, _program: &u32, name: &str) -> Option<AttributeSlot> {
        match name {
            POSITION_ATTRIBUTE if self.attributes.contains(&POSITION_ATTRIBUTE) => {
                Some(AttributeSlot(0))
            }
            COLOR_ATTRIBUTE if self.attributes.contains(&COLOR_ATTRIBUTE) => Some(AttributeSlot(1)),
            _ => None,
        }
    }

    fn uniform_location(&self, _program: &u32, name: &str) -> Option<u32> {
        if name == MVP_UNIFORM && self.uniforms.contains(&MVP_UNIFORM) {
            Some(MVP_LOCATION)
        } else {
            None
        }
    }

    fn create_vertex_buffer(&mut self, data: &[f32]) -> Option<u32> {
        let id = self.allocate();

        self.record(Call::CreateVertexBuffer(data.to_vec()));

        Some(id)
    }

    fn create_index_buffer(&mut self, data: &[u16]) -> Option<u32> {
        let id = self.allocate();

        self.record(Call::CreateIndexBuffer(data.to_vec()));

        Some(id)
    }

    fn bind_attribute(&mut self, slot: AttributeSlot, buffer: &u32, format: AttributeFormat) {
        self.record(Call::BindAttribute {
            slot,
            buffer: *buffer,
            format,
        });
    }

    fn upload_matrix4(&mut self, program: &u32, location: &u32, matrix: &[f32; 16]) {
        self.record(Call::UploadMatrix4 {
            program: *program,
            location: *location,
            matrix: *matrix,
        });
    }

    fn draw_arrays(&mut self, program: &u32, topology: PrimitiveTopology, first: u32, count: u32) {
        self.record(Call::DrawArrays {
            program: *program,
            topology,
            first,
            count,
        });
    }

    fn draw_elements(
        &mut self,
        program: &u32,
        index_buffer: &u32,
        topology: PrimitiveTopology,
        count: u32,
        format: IndexFormat,
        offset: u32,
    ) {
        self.record(Call::DrawElements {
            program: *program,
            index_buffer: *index_buffer,
            topology,
            count,
            format,
            offset,
        });
    }

    fn flush(&mut self) {
        self.record(Call::Flush);
    }
}
