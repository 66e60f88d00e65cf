//! FizzBuzz built from `Context` values: each rule is a program with a hole,
//! and the whole line is `base ∘ fizz ∘ buzz` filled with `skip`.

use dsl::context::compose_all;
use dsl::{Command, Context, Program};

use crate::eval::interpret;

/// `〈•; print "n"〉`
pub fn base(n: u64) -> Context {
    Context::with_tail(Command::Print(n.to_string()))
}

/// `〈print "fizz"; •; halt〉` when `n` is a multiple of 3, else `〈•〉`.
pub fn fizz(n: u64) -> Context {
    rule(n, 3, "fizz")
}

/// `〈print "buzz"; •; halt〉` when `n` is a multiple of 5, else `〈•〉`.
pub fn buzz(n: u64) -> Context {
    rule(n, 5, "buzz")
}

fn rule(n: u64, divisor: u64, word: &str) -> Context {
    if n % divisor == 0 {
        Context::around(Command::print(word), Command::Halt)
    } else {
        Context::empty()
    }
}

/// The complete program for `n`.
pub fn program(n: u64) -> Program {
    let context = compose_all([&base(n), &fizz(n), &buzz(n)]);
    log::trace!("context for {}: {}", n, context);
    context.fill_command(Command::Skip)
}

pub fn fizz_buzz(n: u64) -> String {
    let program = program(n);
    log::debug!("program for {}: {}", n, program);
    interpret(&program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_number_program() {
        assert_eq!(program(1).to_string(), "skip; print \"1\"");
    }

    #[test]
    fn fizz_program_halts_before_number() {
        assert_eq!(
            program(3).to_string(),
            "print \"fizz\"; skip; halt; print \"3\""
        );
    }

    #[test]
    fn fizzbuzz_program_nests_buzz_inside_fizz() {
        assert_eq!(
            program(15),
            Program::of([
                Command::print("fizz"),
                Command::print("buzz"),
                Command::Skip,
                Command::Halt,
                Command::Halt,
                Command::print("15"),
            ])
        );
    }

    #[test]
    fn contexts_render_their_shape() {
        assert_eq!(fizz(9).to_string(), "〈print \"fizz\"; •; halt〉");
        assert_eq!(fizz(10).to_string(), "〈•〉");
        assert_eq!(base(7).to_string(), "〈•; print \"7\"〉");
    }

    #[test]
    fn composed_fill_matches_nested_fill() {
        for n in 1..=30 {
            let seed = Program::single(Command::Skip);
            let nested = base(n).fill(&fizz(n).fill(&buzz(n).fill(&seed)));
            assert_eq!(program(n), nested, "n = {}", n);
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(fizz_buzz(1), "1");
        assert_eq!(fizz_buzz(3), "fizz");
        assert_eq!(fizz_buzz(5), "buzz");
        assert_eq!(fizz_buzz(15), "fizzbuzz");
        assert_eq!(fizz_buzz(20), "buzz");
    }
}
