/// World-wide visual flags read by foliage on every tick.
///
/// Owned by the [`FloraPlacer`](crate::FloraPlacer) and handed to each
/// entity update by reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisualState {
    /// Set while the avatar has just jumped; drives color cycling and leaf sweeps.
    pub special_mode: bool,
}

impl VisualState {
    pub const CALM: VisualState = VisualState {
        special_mode: false,
    };
    pub const SPECIAL: VisualState = VisualState { special_mode: true };
}
