/*!
Turn plain functions into command-line interfaces.

Each function is described by a table of parameters (names, types, defaults)
and a docstring. From that, `signet` derives a command line in one of three
[styles](Style):

- **positional**: `prog alice 3`
- **keyword**: `prog --name alice -t 3 -v`
- **mixed** (the default): switches anywhere, plain tokens for the rest, as
  in `prog -v alice --times 3`

A [`Registry`] holds one or more functions. With one, the command line is
its arguments; with several, the first token picks the function. Usage text
comes from the parameter table and the docstring, and `-h`, `--help`, `/?`,
`?` or `-?` print it.

The parameter table can be built by hand with [`Command`] and
[`ParameterSpec`], but usually it's generated by [`#[command]`][command]:

```
/// Greet someone.
///
/// name: who to greet
/// times: how many times to do it
/// loud: shout it
#[signet::command]
fn greet(name: String, #[signet(default = 1)] times: u32, loud: bool) -> String {
    let greeting = format!("Hello, {name}!");
    let greeting = if loud { greeting.to_uppercase() } else { greeting };
    vec![greeting; times as usize].join("\n")
}

let mut registry = signet::Registry::new();
registry.register(greet_command()).unwrap();

let dispatch = registry.setup(&["prog", "alice", "-t", "2"]).unwrap();
let signet::Dispatch::Call(call) = dispatch else { panic!() };
assert_eq!(call.invoke().unwrap(), "Hello, alice!\nHello, alice!");
```

In a real program, [`run`] does all of this against the process's actual
command line, and prints whatever needs to be printed.
*/

mod arguments;
mod binding;
pub mod cast;
mod dispatch;
pub mod docstring;
pub mod errors;
pub mod help;
mod impls;
pub mod parameter;
mod printers;
mod registry;
mod run;
pub mod signature;
pub mod strategy;
pub mod value;

pub use arguments::{Arguments, LoadedArguments};
pub use binding::{Command, FunctionBinding};
pub use cast::{Cast, Castable, Casts};
pub use dispatch::{Call, Dispatch};
pub use docstring::Docs;
pub use errors::{ConfigurationError, Error, ParsingError};
pub use parameter::{Parameter, ParameterSpec};
pub use registry::{HELP_TRIGGERS, Registry, Settings};
pub use run::{Outcome, USAGE_EXIT_CODE, execute, run};
pub use signature::Signature;
pub use strategy::{ParseResult, Style};
pub use value::{FromValue, Value};

pub use signet_derive::command;
