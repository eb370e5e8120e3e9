/// Movement intent for one outer loop iteration.
///
/// Each field is `-1`, `0` or `+1`, derived from held keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCmd {
    pub forward: i8, // back / forward
    pub strafe: i8,  // left / right
    pub turn: i8,    // toward decreasing / increasing heading
}

impl InputCmd {
    /// `+1` when only `pos` is held, `-1` when only `neg` is, else `0`.
    #[inline]
    pub fn axis(pos: bool, neg: bool) -> i8 {
        pos as i8 - neg as i8
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// What one poll of the input source produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub quit: bool,
    pub cmd: InputCmd,
}
