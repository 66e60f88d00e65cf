//! FizzBuzz over plain command vectors. A context is any closure from
//! commands to commands, and composition is function composition.

use dsl::Command;

pub type Commands = Vec<Command>;

/// A program with a hole, represented by what it does to the hole's filling.
pub type Context = Box<dyn Fn(Commands) -> Commands>;

/// `f ∘ g`
pub fn compose(f: Context, g: Context) -> Context {
    Box::new(move |x| f(g(x)))
}

fn identity() -> Context {
    Box::new(|x| x)
}

fn rule(n: u64, divisor: u64, word: &'static str) -> Context {
    if n % divisor != 0 {
        return identity();
    }
    Box::new(move |x| {
        let mut out = Vec::with_capacity(x.len() + 2);
        out.push(Command::print(word));
        out.extend(x);
        out.push(Command::Halt);
        out
    })
}

pub fn fizz(n: u64) -> Context {
    rule(n, 3, "fizz")
}

pub fn buzz(n: u64) -> Context {
    rule(n, 5, "buzz")
}

pub fn base(n: u64) -> Context {
    Box::new(move |mut x| {
        x.push(Command::Print(n.to_string()));
        x
    })
}

pub fn program(n: u64) -> Commands {
    compose(compose(base(n), fizz(n)), buzz(n))(vec![Command::Skip])
}

/// Lazy right fold: `step` receives the current item and a thunk for the
/// fold of the remaining items, which it may never force.
///
/// Recurses once per forced item.
pub fn fold_right<T, B: Clone>(
    items: &[T],
    init: B,
    step: &impl Fn(&T, &mut dyn FnMut() -> B) -> B,
) -> B {
    match items.split_first() {
        None => init,
        Some((first, rest)) => step(first, &mut || fold_right(rest, init.clone(), step)),
    }
}

fn step(command: &Command, rest: &mut dyn FnMut() -> String) -> String {
    match command {
        Command::Skip => rest(),
        Command::Halt => String::new(),
        Command::Print(text) => {
            let mut out = text.clone();
            out.push_str(&rest());
            out
        }
    }
}

pub fn interpret(commands: &[Command]) -> String {
    fold_right(commands, String::new(), &step)
}

pub fn fizz_buzz(n: u64) -> String {
    interpret(&program(n))
}
