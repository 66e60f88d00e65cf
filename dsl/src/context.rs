use std::fmt;

use crate::command::Command;
use crate::program::Program;

/// A program with a single hole: `〈head; •; tail〉`.
///
/// Possible shapes:
/// - `〈•〉`
/// - `〈•; print "tail"〉`
/// - `〈print "head"; •〉`
/// - `〈print "keep"; •; print "calm"〉`
///
/// An empty side is treated as absent, so a context built with an empty
/// head renders and behaves exactly like one built without it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    head: Program,
    tail: Program,
}

impl Context {
    /// The empty context `〈•〉`. Filling it returns its argument.
    pub fn empty() -> Self {
        Context::default()
    }

    /// The middle-hole context.
    pub fn new(head: Program, tail: Program) -> Self {
        Context { head, tail }
    }

    /// The tail-hole context `〈head; •〉`.
    pub fn with_head(head: impl Into<Program>) -> Self {
        Context {
            head: head.into(),
            tail: Program::empty(),
        }
    }

    /// The head-hole context `〈•; tail〉`.
    pub fn with_tail(tail: impl Into<Program>) -> Self {
        Context {
            head: Program::empty(),
            tail: tail.into(),
        }
    }

    /// The middle-hole context around single commands.
    pub fn around(head: Command, tail: Command) -> Self {
        Context::new(Program::single(head), Program::single(tail))
    }

    pub fn head(&self) -> &Program {
        &self.head
    }

    pub fn tail(&self) -> &Program {
        &self.tail
    }

    /// Fills the hole with `program`, producing `head ++ program ++ tail`.
    pub fn fill(&self, program: &Program) -> Program {
        self.head.concat(program).concat(&self.tail)
    }

    /// Fills the hole with a single command.
    pub fn fill_command(&self, command: Command) -> Program {
        self.fill(&Program::single(command))
    }

    /// `self ∘ other`: filling the result equals filling `other` first and
    /// then `self`.
    pub fn compose(&self, other: &Context) -> Context {
        Context {
            head: self.head.concat(&other.head),
            tail: other.tail.concat(&self.tail),
        }
    }
}

/// Composes contexts right to left, so `compose_all([a, b, c])` is `a ∘ b ∘ c`.
pub fn compose_all<'a>(contexts: impl IntoIterator<Item = &'a Context>) -> Context {
    contexts
        .into_iter()
        .fold(Context::empty(), |acc, next| acc.compose(next))
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.head.is_empty(), self.tail.is_empty()) {
            (true, true) => write!(f, "〈•〉"),
            (false, true) => write!(f, "〈{}; •〉", self.head),
            (true, false) => write!(f, "〈•; {}〉", self.tail),
            (false, false) => write!(f, "〈{}; •; {}〉", self.head, self.tail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn print(s: &str) -> Program {
        Program::single(Command::print(s))
    }

    #[test]
    fn renders_each_shape() {
        assert_eq!(Context::empty().to_string(), "〈•〉");
        assert_eq!(
            Context::with_tail(Command::print("tail")).to_string(),
            "〈•; print \"tail\"〉"
        );
        assert_eq!(
            Context::with_head(Command::print("head")).to_string(),
            "〈print \"head\"; •〉"
        );
        assert_eq!(
            Context::new(print("keep"), print("calm")).to_string(),
            "〈print \"keep\"; •; print \"calm\"〉"
        );
    }

    #[test]
    fn fill_surrounds_program() {
        let ctx = Context::around(Command::print("fizz"), Command::Halt);
        assert_eq!(
            ctx.fill_command(Command::Skip),
            Program::of([Command::print("fizz"), Command::Skip, Command::Halt])
        );
    }

    #[test]
    fn empty_context_is_identity() {
        let p = print("x");
        assert_eq!(Context::empty().fill(&p), p);
        let ctx = Context::with_head(Command::Skip);
        assert_eq!(Context::empty().compose(&ctx), ctx);
        assert_eq!(ctx.compose(&Context::empty()), ctx);
    }

    #[test]
    fn compose_is_not_commutative() {
        let a = Context::with_tail(Command::print("a"));
        let b = Context::with_tail(Command::print("b"));
        let seed = Program::empty();
        assert_eq!(
            a.compose(&b).fill(&seed),
            Program::of([Command::print("b"), Command::print("a")])
        );
        assert_ne!(a.compose(&b), b.compose(&a));
    }

    #[test]
    fn compose_all_applies_right_to_left() {
        let a = Context::with_tail(Command::print("a"));
        let b = Context::with_tail(Command::print("b"));
        let c = Context::with_tail(Command::print("c"));
        let composed = compose_all([&a, &b, &c]);
        assert_eq!(composed, a.compose(&b).compose(&c));
        assert_eq!(composed.to_string(), "〈•; print \"c\"; print \"b\"; print \"a\"〉");
    }

    fn arb_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::Skip),
            Just(Command::Halt),
            "[a-z]{0,4}".prop_map(Command::Print),
        ]
    }

    fn arb_program() -> impl Strategy<Value = Program> {
        prop::collection::vec(arb_command(), 0..5).prop_map(Program::of)
    }

    fn arb_context() -> impl Strategy<Value = Context> {
        (arb_program(), arb_program()).prop_map(|(head, tail)| Context::new(head, tail))
    }

    proptest! {
        #[test]
        fn composition_is_hole_substitution(
            a in arb_context(),
            b in arb_context(),
            p in arb_program(),
        ) {
            prop_assert_eq!(a.compose(&b).fill(&p), a.fill(&b.fill(&p)));
        }

        #[test]
        fn composition_is_associative(
            a in arb_context(),
            b in arb_context(),
            c in arb_context(),
            p in arb_program(),
        ) {
            prop_assert_eq!(
                a.compose(&b).compose(&c).fill(&p),
                a.compose(&b.compose(&c)).fill(&p)
            );
        }

        #[test]
        fn concat_is_associative(a in arb_program(), b in arb_program(), c in arb_program()) {
            prop_assert_eq!(a.concat(&b).concat(&c), a.concat(&b.concat(&c)));
        }

        #[test]
        fn empty_program_is_identity(p in arb_program()) {
            prop_assert_eq!(Program::empty().concat(&p), p.clone());
            prop_assert_eq!(p.concat(&Program::empty()), p);
        }
    }
}
