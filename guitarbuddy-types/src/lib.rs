//! # guitarbuddy-types
//!
//! Music-theory tables and the pure functions over them: the twelve pitch
//! classes with their enharmonic spellings, the letter and chromatic
//! rotators, the interval resolver, and the supported scale formulas.
//!
//! Everything here is immutable `const` data plus side-effect-free functions,
//! safe to share across threads. Input normalization and request handling live
//! in `guitarbuddy-core`.

mod error;
pub mod interval;
pub mod pitch;
pub mod scale;

pub use error::{InputField, ValidationError};
pub use interval::{resolve_intervals, resolve_intervals_with, Interval, IntervalMap};
pub use pitch::{
    find_pitch_class_index, rotate_alphabet, rotate_chromatic, Letter, PitchClass, PitchTable,
    RotatedAlphabet, RotatedChromatic, TableError,
};
pub use scale::{get_formula, Scale, ScaleType};
