//! Read an array of numbers from a console and compute its mean.

pub mod array;
pub mod console;
pub mod parse;
pub mod stats;

mod utils;
