use interpreter::{Encoding, FizzBuzzRange};
use proptest::prelude::*;

const CANONICAL: [&str; 20] = [
    "1", "2", "fizz", "4", "buzz", "fizz", "7", "8", "fizz", "buzz", "11", "fizz", "13", "14",
    "fizzbuzz", "16", "17", "fizz", "19", "buzz",
];

fn run(source: &str) -> String {
    let parser = dsl::parser::Parser::new(source.to_string(), 0);
    let program = parser.parse().expect("parse failed");
    interpreter::interpret(&program)
}

fn expected(n: u64) -> String {
    match (n % 3, n % 5) {
        (0, 0) => "fizzbuzz".to_string(),
        (0, _) => "fizz".to_string(),
        (_, 0) => "buzz".to_string(),
        _ => n.to_string(),
    }
}

#[test]
fn scenarios() {
    for encoding in Encoding::ALL {
        assert_eq!(encoding.fizz_buzz(1), "1", "{}", encoding);
        assert_eq!(encoding.fizz_buzz(3), "fizz", "{}", encoding);
        assert_eq!(encoding.fizz_buzz(5), "buzz", "{}", encoding);
        assert_eq!(encoding.fizz_buzz(15), "fizzbuzz", "{}", encoding);
        assert_eq!(encoding.fizz_buzz(20), "buzz", "{}", encoding);
    }
}

#[test]
fn canonical_sequence() {
    for encoding in Encoding::ALL {
        let lines = interpreter::sequence(&FizzBuzzRange::default(), encoding);
        assert_eq!(lines, CANONICAL, "{}", encoding);
    }
}

#[test]
fn default_run_output() {
    let mut out = Vec::new();
    interpreter::run_range(&FizzBuzzRange::default(), Encoding::default(), &mut out).unwrap();
    let expected = CANONICAL.join("\n") + "\n";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn encodings_agree_on_a_wide_range() {
    let range = FizzBuzzRange::new(1, 3000).unwrap();
    let direct = interpreter::sequence(&range, Encoding::Direct);
    let structures = interpreter::sequence(&range, Encoding::Structures);
    let continuation = interpreter::sequence(&range, Encoding::Continuation);
    assert_eq!(direct, structures);
    assert_eq!(structures, continuation);
}

#[test]
fn rendered_programs_run_the_same() {
    for n in 1..=45 {
        let program = interpreter::encoding::structures::program(n);
        assert_eq!(run(&program.to_string()), expected(n), "n = {}", n);
    }
}

#[test]
fn source_programs() {
    assert_eq!(run(""), "");
    assert_eq!(run("skip"), "");
    assert_eq!(run(r#"print "a"; print "b""#), "ab");
    assert_eq!(run(r#"print "fizz"; skip; halt; print "3""#), "fizz");
    assert_eq!(run(r#"halt; print "unreachable""#), "");
}

#[test]
fn large_numbers() {
    assert_eq!(Encoding::Structures.fizz_buzz(u64::MAX), expected(u64::MAX));
    assert_eq!(Encoding::Direct.fizz_buzz(1_000_000_007), "1000000007");
}

proptest! {
    #[test]
    fn every_encoding_matches_the_rules(n in 1u64..1_000_000) {
        for encoding in Encoding::ALL {
            prop_assert_eq!(encoding.fizz_buzz(n), expected(n));
        }
    }
}
