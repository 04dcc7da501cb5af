/// Engine contract driven by the frame scheduler.
///
/// Both calls are synchronous and must not block. Each executed frame calls
/// `update` exactly once, followed by `render` exactly once. An `Err` from
/// either call halts the loop; the scheduler never retries.
pub trait EngineClient {
    /// Advances the simulation.
    ///
    /// `elapsed_ms` is measured from loop start, not from the previous frame.
    /// `height` and `width` are the surface dimensions configured this frame.
    fn update(&mut self, elapsed_ms: f64, height: f64, width: f64) -> anyhow::Result<()>;

    /// Draws the current state to the surface.
    fn render(&mut self) -> anyhow::Result<()>;
}

impl<T: EngineClient + ?Sized> EngineClient for Box<T> {
    fn update(&mut self, elapsed_ms: f64, height: f64, width: f64) -> anyhow::Result<()> {
        (**self).update(elapsed_ms, height, width)
    }

    fn render(&mut self) -> anyhow::Result<()> {
        (**self).render()
    }
}
