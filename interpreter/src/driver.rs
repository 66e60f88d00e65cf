use std::io::Write;
use std::ops::RangeInclusive;

use dsl::Program;

use crate::encoding::Encoding;
use crate::error::RuntimeError;
use crate::eval::interpret;

/// An inclusive range of positive integers to run FizzBuzz over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FizzBuzzRange {
    start: u64,
    end: u64,
}

impl FizzBuzzRange {
    pub const DEFAULT_START: u64 = 1;
    pub const DEFAULT_END: u64 = 20;

    pub fn new(start: u64, end: u64) -> Result<Self, RuntimeError> {
        if start == 0 || start > end {
            return Err(RuntimeError::InvalidRange { start, end });
        }
        Ok(FizzBuzzRange { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn iter(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl Default for FizzBuzzRange {
    fn default() -> Self {
        FizzBuzzRange {
            start: Self::DEFAULT_START,
            end: Self::DEFAULT_END,
        }
    }
}

/// The FizzBuzz line for every n in `range`, in ascending order.
pub fn sequence(range: &FizzBuzzRange, encoding: Encoding) -> Vec<String> {
    range.iter().map(|n| encoding.fizz_buzz(n)).collect()
}

/// Write the FizzBuzz sequence for `range`, one line per number.
pub fn run_range(
    range: &FizzBuzzRange,
    encoding: Encoding,
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    log::info!(
        "running {}..={} with the {} encoding",
        range.start,
        range.end,
        encoding
    );
    for n in range.iter() {
        writeln!(output, "{}", encoding.fizz_buzz(n))?;
    }
    output.flush()?;
    Ok(())
}

/// Write the sequence once per encoding, each under a `## NAME ##` header.
pub fn run_encodings(
    range: &FizzBuzzRange,
    encodings: &[Encoding],
    output: &mut dyn Write,
) -> Result<(), RuntimeError> {
    for encoding in encodings {
        writeln!(output, "## {} ##", encoding.name().to_uppercase())?;
        run_range(range, *encoding, output)?;
    }
    Ok(())
}

/// Interpret `program` and write its output followed by a newline.
pub fn run_program(program: &Program, output: &mut dyn Write) -> Result<(), RuntimeError> {
    log::debug!("interpreting {} command(s)", program.len());
    writeln!(output, "{}", interpret(program))?;
    output.flush()?;
    Ok(())
}
