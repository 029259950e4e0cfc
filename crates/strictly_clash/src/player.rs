//! A participant's side of a session.

use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_reversi::Color;

/// Which color a participant plays, plus their display preference for
/// highlighting legal moves. The preference has no effect on the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Side {
    /// Color this participant plays.
    pub color: Color,
    /// Whether legal targets should be shown.
    pub show_targets: bool,
}

impl Side {
    /// A side for `color` with targets hidden.
    pub fn of(color: Color) -> Self {
        Self::new(color, false)
    }
}
