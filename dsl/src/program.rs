use std::fmt;

use crate::command::Command;

/// An ordered sequence of commands.
///
/// Programs are values: every operation returns a new program and leaves the
/// receiver untouched. The empty program is the identity for [`Program::concat`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Program {
    commands: Vec<Command>,
}

impl Program {
    /// The empty program.
    pub fn empty() -> Self {
        Program {
            commands: Vec::new(),
        }
    }

    /// A program running `commands` in order.
    pub fn of(commands: impl IntoIterator<Item = Command>) -> Self {
        Program {
            commands: commands.into_iter().collect(),
        }
    }

    /// A one-command program.
    pub fn single(command: Command) -> Self {
        Program {
            commands: vec![command],
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The receiver's commands followed by `other`'s.
    pub fn concat(&self, other: &Program) -> Program {
        let mut commands = Vec::with_capacity(self.len() + other.len());
        commands.extend_from_slice(&self.commands);
        commands.extend_from_slice(&other.commands);
        Program { commands }
    }

    /// The receiver with `command` run after it.
    pub fn append(&self, command: Command) -> Program {
        self.concat(&Program::single(command))
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

impl From<Command> for Program {
    fn from(command: Command) -> Self {
        Program::single(command)
    }
}

impl From<Vec<Command>> for Program {
    fn from(commands: Vec<Command>) -> Self {
        Program { commands }
    }
}

impl FromIterator<Command> for Program {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Program::of(iter)
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}
