use std::fmt;

/// A single instruction of the FizzBuzz language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// No-op.
    Skip,
    /// Stops execution of the current program.
    Halt,
    /// Prints its argument.
    Print(String),
}

impl Command {
    pub fn print(text: impl Into<String>) -> Self {
        Command::Print(text.into())
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Skip => "skip",
            Command::Halt => "halt",
            Command::Print(_) => "print",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Skip | Command::Halt => write!(f, "{}", self.keyword()),
            Command::Print(text) => {
                write!(f, "print \"")?;
                for ch in text.chars() {
                    match ch {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}
