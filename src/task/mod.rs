mod gpu_task;
pub use self::gpu_task::{GpuTask, Progress};
