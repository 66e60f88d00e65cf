pub mod command;
pub mod context;
pub mod parser;
pub mod program;

pub use command::Command;
pub use context::Context;
pub use program::Program;
