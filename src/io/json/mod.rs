//! JSON input and output

mod reader;
mod writer;

pub use reader::{read_selections, JsonReader};
pub use writer::JsonWriter;
