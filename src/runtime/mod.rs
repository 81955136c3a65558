//! Provides the execution side of the demos: the [GraphicsContext] abstraction the renderer draws
//! through, its WebGL implementations, and the frame-driven [AnimationLoop] that progresses
//! renderer tasks.
//!
//! Everything here is single threaded and meant to run on the main WASM thread.

mod animation;
pub use self::animation::{AnimationFrames, AnimationLoop, FrameCallback, FrameProvider, ManualFrames};

mod graphics_context;
pub use self::graphics_context::{
    AttributeFormat, AttributeSlot, ClearValues, GraphicsContext, IndexFormat, PrimitiveTopology,
    ShaderStage,
};

mod web_gl;
pub use self::web_gl::{WebGl2Context, WebGlContext};
