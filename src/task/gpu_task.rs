/// The result of making progress on a [GpuTask].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Progress<T> {
    /// The task is done and will not be progressed again.
    Finished(T),

    /// The task wants to be progressed again on the next display refresh.
    ContinueNextFrame,
}

impl<T> Progress<T> {
    pub fn is_finished(&self) -> bool {
        match self {
            Progress::Finished(_) => true,
            Progress::ContinueNextFrame => false,
        }
    }
}

/// A unit of GPU work that runs against an execution context `Ec`.
///
/// A call to [progress] always runs to completion; a task that is not yet done returns
/// [Progress::ContinueNextFrame] and is expected to be progressed again by whoever drives it (see
/// [AnimationLoop](crate::runtime::AnimationLoop)).
pub trait GpuTask<Ec> {
    type Output;

    fn progress(&mut self, execution_context: &mut Ec) -> Progress<Self::Output>;
}
