#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

/// Discrete keyboard-style queries, sampled once per tick.
pub trait InputSource {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Nothing is ever pressed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    #[inline]
    fn is_pressed(&self, _key: Key) -> bool {
        false
    }
}

impl<F> InputSource for F
where
    F: Fn(Key) -> bool,
{
    #[inline]
    fn is_pressed(&self, key: Key) -> bool {
        self(key)
    }
}
