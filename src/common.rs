//! Miscellaneous common structs used throughout the library.

mod address;
mod id;
mod node;

pub use address::*;
pub use id::*;
pub use node::*;
