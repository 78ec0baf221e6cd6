#![no_std]

/*!
Low-level getopt-style scanning of command-line tokens. Takes care of the
distinctions between long switches, short switches, bundles and positionals,
and of where a switch's value comes from. No type handling happens here, and
the scanner never decides by itself whether a switch takes a value; that's up
to the [`Visitor`].
*/

mod populated_str;

use populated_str::PopulatedStr;

/**
The [`Scanner`] type operates by passing the tokens it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A plain positional token, or any token after a bare `--`
    fn visit_positional(self, argument: &'arg str) -> Self::Value;

    /// A long switch that definitely has a value, because it was given
    /// as `--switch=value`
    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value;

    /// A long switch such as `--switch`, which may or may not want a value
    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A short switch such as `-s`, which may or may not want a value
    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value;
}

/**
[`ArgAccess`] lets a visitor decide whether a switch takes a value, based on
the identity of the switch.

Consider `--name alice`. Is it the boolean `--name` followed by the positional
`alice`, or a single switch with a value? Similarly `-dn alice` could be `-d`
and `-n alice`, or `-d` with the value `n`. The [`Scanner`] can't classify
these alone, so a visitor requests a value through this trait only for
switches that need one, and the scanner works out where that value comes from.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Take a value for the current switch. Boolean switches should simply not
    call this, so that the next token is scanned independently.

    Returns [`None`] if the tokens are exhausted, or if a bare `--` was found
    where the value should have been.
    */
    fn take(self) -> Option<&'arg str>;
}

#[derive(Debug, Clone)]
enum State<'arg> {
    Ready,
    PositionalOnly,
    ShortInProgress(&'arg PopulatedStr),
}

/**
A `Scanner` walks a list of borrowed tokens, sending each switch or
positional it finds to the given [`Visitor`] in each call to
[`next_token`][Scanner::next_token]. Switches are recognised anywhere in the
token stream, GNU style, until a bare `--` is seen.

The `'arg` lifetime is the lifetime of the borrowed command line tokens.
*/
#[derive(Debug, Clone)]
pub struct Scanner<'arg, I> {
    state: State<'arg>,
    tokens: I,
}

impl<'arg, I> Scanner<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`Scanner`] from the raw tokens. This list should *exclude*
    the program name and any function name that was used to select the target.
     */
    #[inline]
    #[must_use]
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            tokens: tokens.into_iter(),
        }
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    #[inline]
    fn positional_only<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        debug_assert!(!matches!(self.state, State::ShortInProgress(_)));

        self.state = State::PositionalOnly;
        self.tokens
            .next()
            .map(|token| visitor.visit_positional(token))
    }

    /// Put `self` into a `Ready` state, then return a StandardArgAccess
    #[inline]
    fn standard_arg(&mut self) -> StandardArgAccess<'_, 'arg, I> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::Ready;
        StandardArgAccess { parent: self }
    }

    /// Put `self` into a `ShortInProgress` state, then return a
    /// ShortArgAccess over the rest of the bundle.
    #[inline]
    fn short_arg(&mut self, short: &'arg PopulatedStr) -> ShortArgAccess<'_, 'arg> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::ShortInProgress(short);
        ShortArgAccess {
            short: short.get(),
            state: &mut self.state,
        }
    }

    /// Handle one character of a `-s` bundle. If there's more of the bundle
    /// left, it's the candidate value; otherwise the next token is.
    #[inline]
    fn handle_short<V>(&mut self, short: &'arg PopulatedStr, visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        let (option, rest) = short.split_first();

        match PopulatedStr::new(rest) {
            None => visitor.visit_short(option, self.standard_arg()),
            Some(rest) => visitor.visit_short(option, self.short_arg(rest)),
        }
    }

    /// Scan the next switch or positional, if any, and hand it to `visitor`.
    pub fn next_token<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Ready => match self.tokens.next()? {
                "--" => self.positional_only(visitor),
                token => Some(match token.strip_prefix("--") {
                    Some(option) => match split_once(option, b'=') {
                        Some((option, argument)) => visitor.visit_long_option(option, argument),
                        None => visitor.visit_long(option, self.standard_arg()),
                    },
                    None => match token.strip_prefix('-').map(PopulatedStr::new) {
                        Some(Some(short)) => self.handle_short(short, visitor),
                        // A lone `-` is conventionally a positional (stdin)
                        Some(None) | None => visitor.visit_positional(token),
                    },
                }),
            },
            State::PositionalOnly => self.positional_only(visitor),
            State::ShortInProgress(short) => Some(self.handle_short(short, visitor)),
        }
    }

    /// True if a bare `--` has been seen and only positionals remain
    #[inline]
    #[must_use]
    pub fn positional_only_mode(&self) -> bool {
        matches!(self.state, State::PositionalOnly)
    }
}

/// ArgAccess implementation that takes the next token from the list.
/// Handles the `--` terminator.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut Scanner<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    fn take(self) -> Option<&'arg str> {
        match self.parent.tokens.next()? {
            "--" => {
                self.parent.state = State::PositionalOnly;
                None
            }
            token => Some(token),
        }
    }
}

/// ArgAccess implementation that takes the remainder of a short bundle.
/// Handles `-nvalue`, which is equivalent to `-n value`.
struct ShortArgAccess<'a, 'arg> {
    short: &'arg str,
    state: &'a mut State<'arg>,
}

impl<'arg> ArgAccess<'arg> for ShortArgAccess<'_, 'arg> {
    fn take(self) -> Option<&'arg str> {
        debug_assert!(
            matches!(*self.state, State::ShortInProgress(short) if short.get() == self.short)
        );

        *self.state = State::Ready;
        Some(self.short)
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // The delimiter is ASCII, so both sides of it are char boundaries
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}
