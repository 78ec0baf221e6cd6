mod command;
mod common;

use proc_macro::TokenStream;

/**
Make a function available from the command line.

The function is left as it is, and a companion function, named after it
with a `_command` suffix, is added beside it. It returns the
[`Command`](../signet/struct.Command.html) to register:

```ignore
/// Copy a file.
///
/// source: the file to copy
/// target: where to put it
#[signet::command(style = "positional")]
fn copy(source: PathBuf, target: PathBuf, #[signet(default = 1)] retries: u32) {
    ...
}

registry.register(copy_command())?;
```

Each parameter's type decides how it's parsed: `bool` parameters are flags,
`Option<T>` parameters are optional, and everything else must implement
`Castable`. `#[signet(default = expr)]` gives a parameter a default, and
`#[signet(cast = "tag")]` parses it with a special cast registered on the
registry (the parameter's type must then match what the cast produces).

The `///` comments become the help text: everything up to the first line
that starts with a parameter name is the summary, and those lines describe
their parameters.

The attribute itself accepts `name = "..."`, to use a different name on the
command line, and `style = "positional" | "keyword" | "mixed"`.
*/
#[proc_macro_attribute]
pub fn command(attrs: TokenStream, item: TokenStream) -> TokenStream {
    match command::decorate_command(attrs.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
