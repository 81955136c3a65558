use std::fmt;

use failure::Fail;

/// The step of a shader build that failed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShaderBuildStage {
    Vertex,
    Fragment,
    Link,
}

impl fmt::Display for ShaderBuildStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderBuildStage::Vertex => f.write_str("vertex shader compilation"),
            ShaderBuildStage::Fragment => f.write_str("fragment shader compilation"),
            ShaderBuildStage::Link => f.write_str("program linking"),
        }
    }
}

/// Compiling one of the shader stages or linking the program failed.
///
/// Carries the diagnostic log reported by the graphics backend verbatim.
#[derive(Clone, PartialEq, Debug, Fail)]
#[fail(display = "{} failed: {}", stage, log)]
pub struct ShaderBuildFailure {
    pub stage: ShaderBuildStage,
    pub log: String,
}

#[derive(Debug, Fail)]
pub enum RendererError {
    #[fail(display = "{}", _0)]
    ShaderBuild(#[cause] ShaderBuildFailure),
    #[fail(display = "invalid surface size {}x{}", width, height)]
    InvalidSurface { width: u32, height: u32 },
    #[fail(display = "invalid options: {}", _0)]
    InvalidOptions(String),
    #[fail(display = "invalid geometry: {}", _0)]
    InvalidGeometry(String),
    #[fail(display = "program has no active attribute named `{}`", _0)]
    MissingAttribute(String),
    #[fail(display = "program has no active uniform named `{}`", _0)]
    MissingUniform(String),
    #[fail(display = "the context failed to allocate a {}", _0)]
    ResourceAllocation(&'static str),
}

impl From<ShaderBuildFailure> for RendererError {
    fn from(failure: ShaderBuildFailure) -> Self {
        RendererError::ShaderBuild(failure)
    }
}
