use crate::State;

/// Receives the world state after every tick.
pub trait Render {
    fn render(&mut self, state: &State);
}

impl<F> Render for F
where
    F: FnMut(&State),
{
    fn render(&mut self, state: &State) {
        self(state)
    }
}

/// Logs every state as JSON at `info` level.
#[derive(Debug, Default)]
pub struct LogRender {
    tick: u64,
}

impl Render for LogRender {
    fn render(&mut self, state: &State) {
        self.tick += 1;
        tracing::info!(target: "bdi::render", tick = self.tick, state = %state.to_json(), "state");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRender;

impl Render for NullRender {
    fn render(&mut self, _state: &State) {}
}
