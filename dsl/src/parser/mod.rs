pub mod error;
mod lexer;

pub use error::ParseError;

use std::ops::Range;

use crate::command::Command;
use crate::parser::lexer::{Token, tokenize};
use crate::program::Program;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse program source (`print "fizz"; halt`) into a Program.
    ///
    /// Errors are collected for every malformed command rather than stopping
    /// at the first one.
    pub fn parse(&self) -> Result<Program, Vec<ParseError>> {
        let (tokens, mut errors) = tokenize(&self.source, self.file_id);
        let mut parser = CommandParser {
            tokens,
            pos: 0,
            file_id: self.file_id,
            end: self.source.len(),
        };
        let (commands, parse_errors) = parser.parse_commands();
        errors.extend(parse_errors);

        if errors.is_empty() {
            Ok(Program::of(commands))
        } else {
            errors.sort_by_key(|e| e.span.start);
            log::debug!("{} parse error(s) in file {}", errors.len(), self.file_id);
            Err(errors)
        }
    }
}

struct CommandParser {
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
    file_id: usize,
    end: usize,
}

impl CommandParser {
    fn parse_commands(&mut self) -> (Vec<Command>, Vec<ParseError>) {
        let mut commands = Vec::new();
        let mut errors = Vec::new();

        while !self.at_end() {
            match self.parse_command() {
                Ok(command) => {
                    commands.extend(command);
                    match self.peek() {
                        None => {}
                        Some((Token::Semi, _)) => self.pos += 1,
                        Some((_, span)) => {
                            errors.push(ParseError::error(
                                "expected `;` between commands",
                                span.clone(),
                                self.file_id,
                            ));
                            self.recover();
                        }
                    }
                }
                Err(e) => {
                    errors.push(e);
                    self.recover();
                }
            }
        }

        (commands, errors)
    }

    /// `Ok(None)` marks a command whose argument failed to lex; the lexer has
    /// already reported it.
    fn parse_command(&mut self) -> Result<Option<Command>, ParseError> {
        let (token, span) = match self.next() {
            Some(t) => t,
            None => return Err(self.error_at_end("expected a command")),
        };

        match token {
            Token::Ident(word) => match word.as_str() {
                "skip" => Ok(Some(Command::Skip)),
                "halt" => Ok(Some(Command::Halt)),
                "print" => match self.peek() {
                    Some((Token::Str(text), _)) => {
                        let text = text.clone();
                        self.pos += 1;
                        Ok(Some(Command::Print(text)))
                    }
                    Some((Token::Invalid, _)) => {
                        self.pos += 1;
                        Ok(None)
                    }
                    Some((_, arg_span)) => Err(ParseError::error(
                        "expected a string after `print`",
                        arg_span.clone(),
                        self.file_id,
                    )),
                    None => Err(self.error_at_end("expected a string after `print`")),
                },
                other => Err(ParseError::error(
                    format!("unknown command `{}`", other),
                    span,
                    self.file_id,
                )
                .with_note("expected one of `skip`, `halt`, `print`")),
            },
            Token::Str(_) => Err(ParseError::error(
                "expected a command, found a string",
                span,
                self.file_id,
            )
            .with_note("strings are only valid as the argument of `print`")),
            Token::Invalid => Ok(None),
            Token::Semi => Err(ParseError::error(
                "expected a command, found `;`",
                span,
                self.file_id,
            )),
        }
    }

    /// Skip past the next `;` so parsing resumes at the following command.
    fn recover(&mut self) {
        if self.pos > 0 && self.tokens[self.pos - 1].0 == Token::Semi {
            return;
        }
        while let Some((token, _)) = self.next() {
            if token == Token::Semi {
                break;
            }
        }
    }

    fn error_at_end(&self, message: &str) -> ParseError {
        ParseError::error(message, self.end..self.end, self.file_id)
    }

    fn peek(&self) -> Option<&(Token, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<(Token, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
