/*!
Docstring annotation: finding per-parameter help text in a function's
free-form documentation.

A docstring like

```text
Greet someone.

name: who to greet
times - how many times to do it
```

produces the summary `"Greet someone."` and help text for `name` and `times`.
*/

use std::collections::HashMap;

/// The summary and per-parameter help extracted from a docstring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docs {
    summary: String,
    help: HashMap<String, String>,
}

impl Docs {
    /**
    Scan `docstring` for lines that start with one of `names`.

    Each line is trimmed. A line matches a name if it is exactly that name,
    or starts with that name followed by at least one space, `-`, or `:`;
    the longest matching name wins. The first matching line ends the summary, and each match's
    remaining text is that parameter's help. Only the first line for a given
    parameter is used.
    */
    #[must_use]
    pub fn annotate<'a>(docstring: Option<&str>, names: impl IntoIterator<Item = &'a str>) -> Self {
        let Some(docstring) = docstring else {
            return Self::default();
        };

        let names: Vec<&str> = names.into_iter().collect();
        let lines: Vec<&str> = docstring.lines().map(str::trim).collect();

        let mut summary_end = None;
        let mut help = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            if let Some((name, text)) = match_line(line, &names) {
                summary_end.get_or_insert(index);
                help.entry(name.to_owned())
                    .or_insert_with(|| text.to_owned());
            }
        }

        let summary = lines[..summary_end.unwrap_or(lines.len())]
            .join("\n")
            .trim()
            .to_owned();

        Self { summary, help }
    }

    /// Everything before the first parameter line
    #[inline]
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The first line of the summary, for one-line listings
    #[must_use]
    pub fn headline(&self) -> &str {
        self.summary.lines().next().unwrap_or("")
    }

    #[must_use]
    pub fn help(&self, name: &str) -> Option<&str> {
        self.help.get(name).map(String::as_str)
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == ':'
}

fn match_line<'n, 'l>(line: &'l str, names: &[&'n str]) -> Option<(&'n str, &'l str)> {
    names
        .iter()
        .filter_map(|&name| {
            let rest = line.strip_prefix(name)?;
            let text = rest.trim_start_matches(is_separator);

            (rest.is_empty() || text.len() < rest.len()).then(|| (name, text.trim()))
        })
        .max_by_key(|&(name, _)| name.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_and_help() {
        let docs = Docs::annotate(
            Some(
                "
                Greet someone.

                More about greeting.

                name: who to greet
                times - how many times
                loud      shout it
                ",
            ),
            ["name", "times", "loud"],
        );

        assert_eq!(docs.summary(), "Greet someone.\n\nMore about greeting.");
        assert_eq!(docs.headline(), "Greet someone.");
        assert_eq!(docs.help("name"), Some("who to greet"));
        assert_eq!(docs.help("times"), Some("how many times"));
        assert_eq!(docs.help("loud"), Some("shout it"));
    }

    #[test]
    fn no_docstring() {
        let docs = Docs::annotate(None, ["name"]);

        assert_eq!(docs.summary(), "");
        assert_eq!(docs.help("name"), None);
    }

    #[test]
    fn no_parameter_lines() {
        let docs = Docs::annotate(Some("  Just a summary.  \n"), ["name"]);

        assert_eq!(docs.summary(), "Just a summary.");
        assert_eq!(docs.help("name"), None);
    }

    #[test]
    fn longest_name_wins() {
        let docs = Docs::annotate(
            Some("name - the name\nname full: the full name"),
            ["name", "name full"],
        );

        assert_eq!(docs.help("name"), Some("the name"));
        assert_eq!(docs.help("name full"), Some("the full name"));
    }

    #[test]
    fn needs_a_separator() {
        let docs = Docs::annotate(Some("namespace is ignored\nname: the name"), ["name"]);

        assert_eq!(docs.summary(), "namespace is ignored");
        assert_eq!(docs.help("name"), Some("the name"));
    }

    #[test]
    fn bare_name_line() {
        let docs = Docs::annotate(Some("Do it.\n\nname\ntimes: how many"), ["name", "times"]);

        assert_eq!(docs.summary(), "Do it.");
        assert_eq!(docs.help("name"), Some(""));
        assert_eq!(docs.help("times"), Some("how many"));
    }

    #[test]
    fn first_line_per_parameter() {
        let docs = Docs::annotate(Some("name: first\nname: second"), ["name"]);
        assert_eq!(docs.help("name"), Some("first"));
    }

    #[test]
    fn case_sensitive() {
        let docs = Docs::annotate(Some("Name: capitalized"), ["name"]);

        assert_eq!(docs.summary(), "Name: capitalized");
        assert_eq!(docs.help("name"), None);
    }
}
