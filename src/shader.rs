use crate::error::{RendererError, ShaderBuildFailure, ShaderBuildStage};
use crate::runtime::{GraphicsContext, ShaderStage};

/// Name of the 3-component vertex position attribute.
pub const POSITION_ATTRIBUTE: &str = "position";

/// Name of the 4-component vertex color attribute.
pub const COLOR_ATTRIBUTE: &str = "color";

/// Name of the 4x4 model-view-projection matrix uniform.
pub const MVP_UNIFORM: &str = "mvpMatrix";

/// The source text of a vertex and a fragment shader.
///
/// The renderer expects the vertex shader to declare the [POSITION_ATTRIBUTE] and
/// [COLOR_ATTRIBUTE] attributes and the [MVP_UNIFORM] uniform.
#[derive(Clone, PartialEq, Debug)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new<V, F>(vertex: V, fragment: F) -> Self
    where
        V: Into<String>,
        F: Into<String>,
    {
        ShaderSources {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        ShaderSources::new(
            include_str!("shaders/vertex.glsl"),
            include_str!("shaders/fragment.glsl"),
        )
    }
}

/// Compiles `source` as a shader of the given `stage`.
///
/// On failure the backend's info log is logged and returned as part of the error.
pub fn compile_shader<C>(
    context: &mut C,
    stage: ShaderStage,
    source: &str,
) -> Result<C::Shader, RendererError>
where
    C: GraphicsContext,
{
    let shader = context
        .create_shader(stage, source)
        .ok_or(RendererError::ResourceAllocation("shader object"))?;

    if context.shader_compiled(&shader) {
        Ok(shader)
    } else {
        let stage = match stage {
            ShaderStage::Vertex => ShaderBuildStage::Vertex,
            ShaderStage::Fragment => ShaderBuildStage::Fragment,
        };

        Err(report(ShaderBuildFailure {
            stage,
            log: context.shader_info_log(&shader),
        }))
    }
}

/// Links the two shaders into a program and makes it the active program.
pub fn link_program<C>(
    context: &mut C,
    vertex_shader: &C::Shader,
    fragment_shader: &C::Shader,
) -> Result<C::Program, RendererError>
where
    C: GraphicsContext,
{
    let program = context
        .link_program(vertex_shader, fragment_shader)
        .ok_or(RendererError::ResourceAllocation("program object"))?;

    if context.program_linked(&program) {
        context.use_program(&program);

        log::info!("shader program linked");

        Ok(program)
    } else {
        Err(report(ShaderBuildFailure {
            stage: ShaderBuildStage::Link,
            log: context.program_info_log(&program),
        }))
    }
}

/// Compiles both stages of `sources` and links them into an active program.
pub fn build_program<C>(context: &mut C, sources: &ShaderSources) -> Result<C::Program, RendererError>
where
    C: GraphicsContext,
{
    let vertex_shader = compile_shader(context, ShaderStage::Vertex, &sources.vertex)?;
    let fragment_shader = compile_shader(context, ShaderStage::Fragment, &sources.fragment)?;

    link_program(context, &vertex_shader, &fragment_shader)
}

fn report(failure: ShaderBuildFailure) -> RendererError {
    log::error!("{}", failure);

    RendererError::ShaderBuild(failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{Call, RecordingContext};

    #[test]
    fn test_default_sources_declare_expected_names() {
        let sources = ShaderSources::default();

        assert!(sources.vertex.contains("attribute vec3 position;"));
        assert!(sources.vertex.contains("attribute vec4 color;"));
        assert!(sources.vertex.contains("uniform mat4 mvpMatrix;"));
        assert!(sources.fragment.contains("gl_FragColor"));
    }

    #[test]
    fn test_build_program() {
        let mut context = RecordingContext::new();
        let calls = context.calls();

        let program = build_program(&mut context, &ShaderSources::default()).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                Call::CreateShader(ShaderStage::Vertex),
                Call::CreateShader(ShaderStage::Fragment),
                Call::LinkProgram,
                Call::UseProgram(program),
            ]
        );
    }

    #[test]
    fn test_vertex_compile_failure() {
        let mut context = RecordingContext::new();
        let calls = context.calls();

        context.fail_compile(ShaderStage::Vertex, "ERROR: 0:1: 'vec5' : syntax error");

        match build_program(&mut context, &ShaderSources::new("vec5 oops;", "")) {
            Err(RendererError::ShaderBuild(failure)) => {
                assert_eq!(failure.stage, ShaderBuildStage::Vertex);
                assert_eq!(failure.log, "ERROR: 0:1: 'vec5' : syntax error");
            }
            other => panic!("expected a vertex shader failure, got {:?}", other.map(|_| ())),
        }

        // Nothing after the failing stage is attempted.
        assert_eq!(*calls.borrow(), vec![Call::CreateShader(ShaderStage::Vertex)]);
    }

    #[test]
    fn test_fragment_compile_failure() {
        let mut context = RecordingContext::new();

        context.fail_compile(ShaderStage::Fragment, "undeclared identifier");

        match build_program(&mut context, &ShaderSources::default()) {
            Err(RendererError::ShaderBuild(failure)) => {
                assert_eq!(failure.stage, ShaderBuildStage::Fragment);
                assert_eq!(failure.log, "undeclared identifier");
            }
            other => panic!("expected a fragment shader failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_link_failure_does_not_activate_program() {
        let mut context = RecordingContext::new();
        let calls = context.calls();

        context.fail_link("varyings do not match");

        match build_program(&mut context, &ShaderSources::default()) {
            Err(RendererError::ShaderBuild(failure)) => {
                assert_eq!(failure.stage, ShaderBuildStage::Link);
                assert_eq!(failure.log, "varyings do not match");
            }
            other => panic!("expected a link failure, got {:?}", other.map(|_| ())),
        }

        assert!(!calls
            .borrow()
            .iter()
            .any(|call| matches!(call, Call::UseProgram(_))));
    }
}
