//! Two small WebGL demos: a triangle drawn once from unindexed vertices, and an indexed quad that
//! spins about an axis on every animation frame.
//!
//! The [Renderer] draws through the [GraphicsContext](runtime::GraphicsContext) trait, which is
//! implemented on top of WebGL 1 and WebGL 2 in [runtime]. Browser pages start a demo with the
//! `run` function exported from [web].

pub mod error;
pub use self::error::{RendererError, ShaderBuildFailure, ShaderBuildStage};

pub mod geometry;
pub use self::geometry::Geometry;

pub mod logging;

pub mod options;
pub use self::options::{ContextVersion, DemoOptions, DemoOptionsBuilder, DrawMode};

pub mod renderer;
pub use self::renderer::Renderer;

pub mod runtime;

pub mod shader;
pub use self::shader::ShaderSources;

pub mod surface;
pub use self::surface::SurfaceSize;

pub mod task;

pub mod transform;
pub use self::transform::{Camera, FrameCounter, Transform};

pub mod web;

#[cfg(test)]
mod testing;
