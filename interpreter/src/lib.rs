pub mod driver;
pub mod encoding;
pub mod error;
pub mod eval;

pub use driver::{FizzBuzzRange, run_encodings, run_program, run_range, sequence};
pub use encoding::Encoding;
pub use error::RuntimeError;
pub use eval::interpret;
