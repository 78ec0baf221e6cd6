/*!
Usage text: the one-line synopsis for each strategy, and the full help
message for a function or a whole registry.

Overall structure:

```text
SUMMARY

Usage:
  program [command] SYNOPSIS

Arguments:
  <NAME>            help text

Options:
  -n, --name <NAME> help text
  -d, --debug       help text
```
*/

use std::fmt::{self, Display, Write as _};

use indent_write::fmt::IndentWriter;
use joinery::JoinableIterator as _;
use lazy_format::lazy_format;

use crate::{docstring::Docs, parameter::Parameter, signature::Signature, strategy::Style};

/// Descriptions longer than this don't line up with the others
const MAX_COLUMN: usize = 24;

/// Narrowest column that descriptions will be wrapped to
const MIN_DESCRIPTION_WIDTH: usize = 20;

/// The synopsis of every parameter in `signature`, separated by spaces
pub fn synopsis(style: Style, signature: &Signature) -> impl Display {
    signature
        .parameters()
        .iter()
        .map(move |parameter| synopsis_item(style, parameter))
        .join_with(' ')
}

fn synopsis_item(style: Style, parameter: &Parameter) -> impl Display {
    let placeholder = parameter.placeholder();
    let long = parameter.long();

    lazy_format!(match ((style, parameter.is_flag(), parameter.is_required())) {
        (Style::Positional, _, true) => "<{placeholder}>",
        (Style::Positional, _, false) => "[{placeholder}]",
        (_, true, _) => "[--{long}]",
        (Style::Keyword, false, true) => "--{long} <{placeholder}>",
        (Style::Keyword, false, false) => "[--{long} <{placeholder}>]",
        (Style::Mixed, false, true) => "<{placeholder}>",
        (Style::Mixed, false, false) => "[{placeholder}]",
    })
}

fn option_tags(parameter: &Parameter) -> impl Display {
    let long = parameter.long();
    let placeholder = parameter.placeholder();

    let tags = lazy_format!(match (parameter.short()) {
        Some(short) => "-{short}, --{long}",
        None => "    --{long}",
    });

    lazy_format!(match (parameter.is_flag()) {
        true => "{tags}",
        false => "{tags} <{placeholder}>",
    })
}

/// A parameter's docstring help, plus its default if it has one
fn describe_parameter(parameter: &Parameter, docs: &Docs) -> String {
    let help = docs.help(parameter.name()).unwrap_or("");

    match parameter.default() {
        Some(default) if !parameter.is_flag() => match help.is_empty() {
            true => format!("[default: {default}]"),
            false => format!("{help} [default: {default}]"),
        },
        _ => help.to_owned(),
    }
}

struct Entry {
    item: String,
    description: String,
}

/// Write a section by writing a blank separator line (unless this is the
/// very start of the text), then the `header`, then an indented `body`.
fn section(
    out: &mut String,
    header: &str,
    body: impl FnOnce(&mut IndentWriter<&mut String>) -> fmt::Result,
) -> fmt::Result {
    if !out.is_empty() {
        out.push('\n');
    }

    writeln!(out, "{header}:")?;
    body(&mut IndentWriter::new("  ", out))
}

/// Write a section of aligned entries, only if there are any
fn maybe_section(out: &mut String, header: &str, entries: &[Entry], width: usize) -> fmt::Result {
    match entries.is_empty() {
        true => Ok(()),
        false => section(out, header, |out| write_entries(out, entries, width)),
    }
}

/**
Write each entry's item, followed by its description. Descriptions line up
in a column just past the longest item; items too long for that column get
their description on the following line instead.
*/
fn write_entries(out: &mut impl fmt::Write, entries: &[Entry], width: usize) -> fmt::Result {
    let column = entries
        .iter()
        .map(|entry| entry.item.len())
        .filter(|&len| len <= MAX_COLUMN)
        .max()
        .unwrap_or(0)
        + 2;

    // The section indent eats two more columns
    let description_width = width
        .saturating_sub(column + 2)
        .max(MIN_DESCRIPTION_WIDTH);

    entries.iter().try_for_each(|entry| {
        let item = &entry.item;

        if entry.description.is_empty() {
            return writeln!(out, "{item}");
        }

        match item.len() + 2 <= column {
            true => write!(out, "{item:column$}")?,
            false => write!(out, "{item}\n{:column$}", "")?,
        }

        let mut lines = textwrap::wrap(&entry.description, description_width).into_iter();

        if let Some(first) = lines.next() {
            writeln!(out, "{first}")?;
        }

        lines.try_for_each(|line| writeln!(out, "{:column$}{line}", ""))
    })
}

/// Render the complete usage message for one function
pub(crate) fn write_usage(
    out: &mut String,
    program: &str,
    command: Option<&str>,
    style: Style,
    signature: &Signature,
    docs: &Docs,
    width: usize,
) -> fmt::Result {
    if !docs.summary().is_empty() {
        writeln!(out, "{}", textwrap::fill(docs.summary(), width))?;
    }

    let synopsis = synopsis(style, signature).to_string();
    let invocation = lazy_format!(match (command) {
        Some(command) => "{program} {command}",
        None => "{program}",
    });

    section(out, "Usage", |out| match synopsis.is_empty() {
        true => writeln!(out, "{invocation}"),
        false => writeln!(out, "{invocation} {synopsis}"),
    })?;

    let parameters = signature.parameters();

    let arguments: Vec<Entry> = parameters
        .iter()
        .filter(|parameter| match style {
            Style::Positional => true,
            Style::Keyword => false,
            Style::Mixed => !parameter.is_flag(),
        })
        .map(|parameter| Entry {
            item: synopsis_item(Style::Positional, parameter).to_string(),
            description: describe_parameter(parameter, docs),
        })
        .collect();

    let options: Vec<Entry> = match style {
        Style::Positional => Vec::new(),
        Style::Keyword | Style::Mixed => parameters
            .iter()
            .map(|parameter| Entry {
                item: option_tags(parameter).to_string(),
                // Mixed value parameters are already described as arguments
                description: match style == Style::Mixed && !parameter.is_flag() {
                    true => String::new(),
                    false => describe_parameter(parameter, docs),
                },
            })
            .collect(),
    };

    maybe_section(out, "Arguments", &arguments, width)?;
    maybe_section(out, "Options", &options, width)
}

/// Render the top-level usage message for a registry of several functions,
/// given each function's name and one-line summary.
pub(crate) fn write_overview<'a>(
    out: &mut String,
    program: &str,
    commands: impl IntoIterator<Item = (&'a str, &'a str)>,
    width: usize,
) -> fmt::Result {
    let commands: Vec<Entry> = commands
        .into_iter()
        .map(|(name, headline)| Entry {
            item: name.to_owned(),
            description: headline.to_owned(),
        })
        .collect();

    section(out, "Usage", |out| writeln!(out, "{program} <COMMAND> [ARGS]..."))?;
    maybe_section(out, "Commands", &commands, width)?;

    writeln!(
        out,
        "\nRun '{program} --help <COMMAND>' for more information on a command."
    )
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::{Casts, ParameterSpec};

    fn signature() -> Signature {
        Signature::extract(
            [
                ParameterSpec::new("name"),
                ParameterSpec::new("times").typed::<u32>().default(1u32),
                ParameterSpec::flag("loud"),
            ],
            &Casts::standard(),
        )
        .unwrap()
    }

    fn docs() -> Docs {
        Docs::annotate(
            Some("Greet someone.\n\nname: who to greet\nloud: shout it"),
            ["name", "times", "loud"],
        )
    }

    fn usage(style: Style) -> String {
        let mut out = String::new();
        write_usage(&mut out, "prog", None, style, &signature(), &docs(), 80).unwrap();
        out
    }

    #[test]
    fn synopses() {
        let signature = signature();

        assert_eq!(
            synopsis(Style::Positional, &signature).to_string(),
            "<NAME> [TIMES] [LOUD]"
        );
        assert_eq!(
            synopsis(Style::Keyword, &signature).to_string(),
            "--name <NAME> [--times <TIMES>] [--loud]"
        );
        assert_eq!(
            synopsis(Style::Mixed, &signature).to_string(),
            "<NAME> [TIMES] [--loud]"
        );
    }

    #[test]
    fn keyword_usage() {
        expect![[r#"
            Greet someone.

            Usage:
              prog --name <NAME> [--times <TIMES>] [--loud]

            Options:
              -n, --name <NAME>    who to greet
              -t, --times <TIMES>  [default: 1]
              -l, --loud           shout it
        "#]]
        .assert_eq(&usage(Style::Keyword));
    }

    #[test]
    fn positional_usage() {
        expect![[r#"
            Greet someone.

            Usage:
              prog <NAME> [TIMES] [LOUD]

            Arguments:
              <NAME>   who to greet
              [TIMES]  [default: 1]
              [LOUD]   shout it
        "#]]
        .assert_eq(&usage(Style::Positional));
    }

    #[test]
    fn mixed_usage() {
        expect![[r#"
            Greet someone.

            Usage:
              prog <NAME> [TIMES] [--loud]

            Arguments:
              <NAME>   who to greet
              [TIMES]  [default: 1]

            Options:
              -n, --name <NAME>
              -t, --times <TIMES>
              -l, --loud           shout it
        "#]]
        .assert_eq(&usage(Style::Mixed));
    }

    #[test]
    fn long_descriptions_wrap() {
        let signature =
            Signature::extract([ParameterSpec::new("path")], &Casts::standard()).unwrap();
        let docs = Docs::annotate(
            Some("path: the file to read, which must exist and be readable"),
            ["path"],
        );

        let mut out = String::new();
        write_usage(&mut out, "prog", Some("cat"), Style::Positional, &signature, &docs, 40)
            .unwrap();

        expect![[r#"
            Usage:
              prog cat <PATH>

            Arguments:
              <PATH>  the file to read, which must
                      exist and be readable
        "#]]
        .assert_eq(&out);
    }

    #[test]
    fn overview() {
        let mut out = String::new();
        write_overview(
            &mut out,
            "prog",
            [("greet", "Greet someone."), ("count", "")],
            80,
        )
        .unwrap();

        expect![[r#"
            Usage:
              prog <COMMAND> [ARGS]...

            Commands:
              greet  Greet someone.
              count

            Run 'prog --help <COMMAND>' for more information on a command.
        "#]]
        .assert_eq(&out);
    }
}
