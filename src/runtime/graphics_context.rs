/// The kind of shader stage to compile.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Values the color and depth buffers are reset to by [GraphicsContext::clear].
///
/// Both the color buffer and the depth buffer are always cleared.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ClearValues {
    pub color: [f32; 4],
    pub depth: f32,
}

impl Default for ClearValues {
    fn default() -> Self {
        ClearValues {
            color: [0.0, 0.0, 0.0, 1.0],
            depth: 1.0,
        }
    }
}

/// Location of a vertex attribute in a linked program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AttributeSlot(pub u32);

/// Layout of one vertex attribute inside a tightly packed buffer of 32-bit floats.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttributeFormat {
    Float3,
    Float4,
}

impl AttributeFormat {
    pub fn components(&self) -> u32 {
        match self {
            AttributeFormat::Float3 => 3,
            AttributeFormat::Float4 => 4,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrimitiveTopology {
    Triangles,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndexFormat {
    UnsignedShort,
}

/// The subset of a WebGL-style rendering API the demos need.
///
/// Unlike the underlying API, no operation relies on a previously bound "current" buffer or
/// program: every operation that targets a program or buffer receives it as an argument, and
/// implementations perform whatever binding is necessary internally.
pub trait GraphicsContext {
    type Shader;

    type Program;

    type Buffer;

    type UniformLocation;

    fn clear(&mut self, values: &ClearValues);

    /// Creates a shader object for the `stage` and compiles `source` into it.
    ///
    /// Returns `None` only if no shader object could be created; compilation failures are
    /// queried afterwards with [shader_compiled] and [shader_info_log].
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> Option<Self::Shader>;

    fn shader_compiled(&self, shader: &Self::Shader) -> bool;

    fn shader_info_log(&self, shader: &Self::Shader) -> String;

    /// Creates a program object, attaches both shaders and links it.
    ///
    /// Returns `None` only if no program object could be created; link failures are queried
    /// afterwards with [program_linked] and [program_info_log].
    fn link_program(
        &mut self,
        vertex_shader: &Self::Shader,
        fragment_shader: &Self::Shader,
    ) -> Option<Self::Program>;

    fn program_linked(&self, program: &Self::Program) -> bool;

    fn program_info_log(&self, program: &Self::Program) -> String;

    fn use_program(&mut self, program: &Self::Program);

    fn attribute_slot(&self, program: &Self::Program, name: &str) -> Option<AttributeSlot>;

    fn uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    /// Uploads `data` into a new static array buffer.
    fn create_vertex_buffer(&mut self, data: &[f32]) -> Option<Self::Buffer>;

    /// Uploads `data` into a new static element array buffer.
    fn create_index_buffer(&mut self, data: &[u16]) -> Option<Self::Buffer>;

    /// Points the attribute `slot` at `buffer` and enables it.
    fn bind_attribute(&mut self, slot: AttributeSlot, buffer: &Self::Buffer, format: AttributeFormat);

    /// Uploads a column-major 4x4 matrix to the uniform at `location` of `program`.
    fn upload_matrix4(
        &mut self,
        program: &Self::Program,
        location: &Self::UniformLocation,
        matrix: &[f32; 16],
    );

    fn draw_arrays(
        &mut self,
        program: &Self::Program,
        topology: PrimitiveTopology,
        first: u32,
        count: u32,
    );

    fn draw_elements(
        &mut self,
        program: &Self::Program,
        index_buffer: &Self::Buffer,
        topology: PrimitiveTopology,
        count: u32,
        format: IndexFormat,
        offset: u32,
    );

    /// Asks the device to start executing the submitted commands; does not wait for them.
    fn flush(&mut self);
}
