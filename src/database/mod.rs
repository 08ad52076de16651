pub use error::*;
pub use structs::*;

mod error;
pub mod structs;
