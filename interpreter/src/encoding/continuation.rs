//! FizzBuzz where a program is the function it computes: it takes the
//! output of everything after it and returns the full output.

/// A program in continuation-passing form.
pub type Program = Box<dyn Fn(String) -> String>;

pub fn skip() -> Program {
    Box::new(|rest| rest)
}

pub fn halt() -> Program {
    Box::new(|_| String::new())
}

pub fn print(text: impl Into<String>) -> Program {
    let text = text.into();
    Box::new(move |rest| {
        let mut out = text.clone();
        out.push_str(&rest);
        out
    })
}

/// `first ∘ second`: run `first`, then `second`.
pub fn then(first: Program, second: Program) -> Program {
    Box::new(move |rest| first(second(rest)))
}

/// Run a program with nothing after it.
pub fn run(program: &Program) -> String {
    program(String::new())
}

fn rule(n: u64, divisor: u64, word: &'static str, x: Program) -> Program {
    if n % divisor == 0 {
        then(then(print(word), x), halt())
    } else {
        x
    }
}

pub fn fizz(n: u64, x: Program) -> Program {
    rule(n, 3, "fizz", x)
}

pub fn buzz(n: u64, x: Program) -> Program {
    rule(n, 5, "buzz", x)
}

pub fn base(n: u64, x: Program) -> Program {
    then(x, print(n.to_string()))
}

pub fn fizz_buzz(n: u64) -> String {
    run(&base(n, fizz(n, buzz(n, skip()))))
}
