use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::task::{GpuTask, Progress};

/// A one-shot callback that receives the frame's timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Schedules callbacks to run on the next display refresh.
pub trait FrameProvider {
    fn request_frame(&self, callback: FrameCallback);
}

/// A [FrameProvider] backed by the browser's `window.requestAnimationFrame`.
#[derive(Clone)]
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        AnimationFrames { window }
    }
}

impl FrameProvider for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) {
        let closure = wasm_bindgen::closure::Closure::once_into_js(move |time: f64| callback(time));

        if let Err(err) = self
            .window
            .request_animation_frame(closure.unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {:?}", err);
        }
    }
}

/// A [FrameProvider] that only runs frames when told to.
///
/// Useful for driving an animation without a display, e.g. in tests. Callbacks requested while a
/// frame runs are queued for a later frame, never run as part of the current one.
#[derive(Clone, Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        ManualFrames::default()
    }

    /// The number of callbacks waiting for a frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs every callback that was requested before this frame started.
    ///
    /// Returns the number of callbacks that ran.
    pub fn run_frame(&self, time: f64) -> usize {
        let due: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let count = due.len();

        for callback in due {
            callback(time);
        }

        count
    }

    /// Runs `frames` consecutive frames spaced at 60Hz, starting at time zero.
    ///
    /// Returns the number of callbacks that ran across all frames.
    pub fn run_frames(&self, frames: usize) -> usize {
        (0..frames)
            .map(|i| self.run_frame(i as f64 * 1000.0 / 60.0))
            .sum()
    }
}

impl FrameProvider for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push_back(callback);
    }
}

/// Drives a [GpuTask] once per display refresh until it finishes.
///
/// The loop owns the task, the execution context the task runs against and the frame provider.
/// Each step runs to completion; only when a step returns [Progress::ContinueNextFrame] is exactly
/// one new step requested from the provider. There is no way to cancel a running loop other than
/// tearing down whatever backs the frame provider.
pub struct AnimationLoop<T, Ec, P> {
    task: T,
    execution_context: Ec,
    frames: P,
}

impl<T, Ec, P> AnimationLoop<T, Ec, P>
where
    T: GpuTask<Ec> + 'static,
    Ec: 'static,
    P: FrameProvider + Clone + 'static,
{
    pub fn new(task: T, execution_context: Ec, frames: P) -> Self {
        AnimationLoop {
            task,
            execution_context,
            frames,
        }
    }

    /// Runs the first step right away and keeps requesting frames for as long as the task wants to
    /// continue.
    pub fn start(self) {
        log::info!("animation loop started");

        self.step();
    }

    fn step(mut self) {
        match self.task.progress(&mut self.execution_context) {
            Progress::Finished(_) => log::debug!("animation loop finished"),
            Progress::ContinueNextFrame => {
                let frames = self.frames.clone();

                frames.request_frame(Box::new(move |_time| self.step()));
            }
        }
    }
}
