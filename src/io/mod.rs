//! I/O module for reading decoded drawings and writing semantic objects

pub mod json;

pub use json::{read_selections, JsonReader, JsonWriter};
