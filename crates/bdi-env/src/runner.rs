use crate::EnvironmentError;

/// Drives the ticks of a run.
///
/// `iterations` is `None` when the run has no bound. A runner must stop at the first failing tick
/// and hand the error back.
pub trait Runner {
    fn drive(
        &self,
        iterations: Option<u64>,
        tick: &mut dyn FnMut() -> Result<(), EnvironmentError>,
    ) -> Result<(), EnvironmentError>;
}

/// Runs ticks back to back on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopRunner;

impl Runner for LoopRunner {
    fn drive(
        &self,
        iterations: Option<u64>,
        tick: &mut dyn FnMut() -> Result<(), EnvironmentError>,
    ) -> Result<(), EnvironmentError> {
        match iterations {
            Some(n) => (0..n).try_for_each(|_| tick()),
            None => loop {
                tick()?;
            },
        }
    }
}

impl<F> Runner for F
where
    F: Fn(Option<u64>, &mut dyn FnMut() -> Result<(), EnvironmentError>) -> Result<(), EnvironmentError>,
{
    fn drive(
        &self,
        iterations: Option<u64>,
        tick: &mut dyn FnMut() -> Result<(), EnvironmentError>,
    ) -> Result<(), EnvironmentError> {
        self(iterations, tick)
    }
}
