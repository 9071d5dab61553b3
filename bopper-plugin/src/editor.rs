/// How often the host drives `Editor::on_frame`.
pub const FRAME_RATE_HZ: u32 = 60;

/// Main-thread half of a plugin's user interface.
pub trait Editor {
    /// Logical size in points, before scaling.
    const SIZE: (f64, f64);
    const IS_RESIZABLE: bool;

    /// Display scale factor reported by the host window.
    fn set_scale(&mut self, scale: f64);

    /// One UI tick, called at [`FRAME_RATE_HZ`] while the plugin is instantiated.
    fn on_frame(&mut self);

    fn window_size(&self) -> (f64, f64) {
        Self::SIZE
    }
}
