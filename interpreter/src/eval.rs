use std::ops::ControlFlow;

use dsl::{Command, Program};

/// Interpret a program into the text it prints.
///
/// Commands are scanned left to right and the scan exits early at the first
/// `halt`, so the output is every `print` payload before it. This gives the
/// same result as the lazy right fold in [`crate::encoding::direct::fold_right`]
/// without recursing once per command.
pub fn interpret(program: &Program) -> String {
    let folded = program
        .commands()
        .iter()
        .try_fold(String::new(), |mut out, command| match command {
            Command::Skip => ControlFlow::Continue(out),
            Command::Halt => ControlFlow::Break(out),
            Command::Print(text) => {
                out.push_str(text);
                ControlFlow::Continue(out)
            }
        });

    match folded {
        ControlFlow::Continue(out) | ControlFlow::Break(out) => out,
    }
}
