//! Game rules for Reversi.
//!
//! Pure functions over a [`Board`](crate::Board): which cells a side may play,
//! which discs a move flips, and who wins once play stops. Nothing here
//! caches between calls.

pub mod capture;
pub mod outcome;

pub use capture::{captures, is_legal, valid_moves};
pub use outcome::{end_status, majority};
