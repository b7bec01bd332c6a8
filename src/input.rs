use crate::{Args, Customization};
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Option,
    Value,
}

/// A classified piece of a raw argument.
///
/// Option tokens keep their prefix: `--name=value` yields the option
/// `--name` (whose [`name`](Token::name) is `name`) followed by the value
/// `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    prefix_len: usize,
    index: usize,
}

impl<'a> Token<'a> {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is_option(&self) -> bool {
        self.kind == TokenKind::Option
    }

    pub fn is_value(&self) -> bool {
        self.kind == TokenKind::Value
    }

    /// The token as it appeared on the command line.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The option name without its prefix. Values are returned whole.
    pub fn name(&self) -> &'a str {
        &self.text[self.prefix_len..]
    }

    /// Index of the raw argument this token was cut from.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Where a [`TokenIter`] stands. Positions order the same way tokens do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Index of the raw argument being read.
    pub index: usize,
    /// Whether the option half of a split argument was already emitted.
    pub split: bool,
}

enum Shape<'a> {
    Value,
    Option { prefix_len: usize },
    Split {
        prefix_len: usize,
        option: &'a str,
        value: &'a str,
    },
}

fn classify<'a>(arg: &'a str, delimiters: &str, prefix: &str) -> Shape<'a> {
    let prefix_len: usize = arg
        .chars()
        .take_while(|c| prefix.contains(*c))
        .map(char::len_utf8)
        .sum();
    // Lone prefixes such as `-` or `--` are plain values.
    if prefix_len == 0 || prefix_len == arg.len() {
        return Shape::Value;
    }
    let rest = &arg[prefix_len..];
    match rest.char_indices().find(|(_, c)| delimiters.contains(*c)) {
        None => Shape::Option { prefix_len },
        Some((0, _)) => Shape::Value,
        Some((pos, delim)) => {
            let split = prefix_len + pos;
            Shape::Split {
                prefix_len,
                option: &arg[..split],
                value: &arg[split + delim.len_utf8()..],
            }
        }
    }
}

/// A lazy stream of tokens over borrowed [`Args`].
///
/// The iterator is `Copy`: trying a parser on a copy never disturbs the
/// original, and rolling back is done by keeping the old copy around.
#[derive(Clone, Copy)]
pub struct TokenIter<'a> {
    args: &'a [String],
    delimiters: &'a str,
    prefix: &'a str,
    index: usize,
    split: bool,
}

impl<'a> TokenIter<'a> {
    pub fn new(args: &'a Args, customize: &'a dyn Customization) -> Self {
        Self {
            args: args.args(),
            delimiters: customize.token_delimiters(),
            prefix: customize.option_prefix(),
            index: 0,
            split: false,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            split: self.split,
        }
    }

    /// Returns the current token without consuming it.
    pub fn peek(&self) -> Option<Token<'a>> {
        let arg = self.args.get(self.index)?;
        let token = match classify(arg, self.delimiters, self.prefix) {
            Shape::Value => Token {
                kind: TokenKind::Value,
                text: arg,
                prefix_len: 0,
                index: self.index,
            },
            Shape::Option { prefix_len } => Token {
                kind: TokenKind::Option,
                text: arg,
                prefix_len,
                index: self.index,
            },
            Shape::Split { value, .. } if self.split => Token {
                kind: TokenKind::Value,
                text: value,
                prefix_len: 0,
                index: self.index,
            },
            Shape::Split {
                prefix_len, option, ..
            } => Token {
                kind: TokenKind::Option,
                text: option,
                prefix_len,
                index: self.index,
            },
        };
        Some(token)
    }

    /// Moves past the current token.
    pub fn advance(&mut self) {
        let token = match self.peek() {
            Some(token) => token,
            None => return,
        };
        trace!(index = token.index, kind = ?token.kind, text = token.text, "token");
        let arg = &self.args[self.index];
        let splits = matches!(
            classify(arg, self.delimiters, self.prefix),
            Shape::Split { .. }
        );
        if splits && !self.split {
            self.split = true;
        } else {
            self.index += 1;
            self.split = false;
        }
    }

    /// Consumes the current token if it is a value.
    ///
    /// This is how an option asks for its argument: the inline half of a
    /// split argument, or else the following raw argument when it is not
    /// itself an option.
    pub fn take_value(&mut self) -> Option<Token<'a>> {
        let token = self.peek().filter(Token::is_value)?;
        self.advance();
        Some(token)
    }

    /// Whether the current token is the inline value of a split argument.
    pub fn at_inline_value(&self) -> bool {
        self.split
    }

    pub fn is_empty(&self) -> bool {
        self.index >= self.args.len()
    }

    /// Number of raw arguments not yet fully consumed.
    pub fn remaining_args(&self) -> usize {
        self.args.len().saturating_sub(self.index)
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.peek()?;
        self.advance();
        Some(token)
    }
}

/// Two iterators are equal when they walk the same arguments under the same
/// grammar and stand at the same position.
impl PartialEq for TokenIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.args, other.args)
            && std::ptr::eq(self.delimiters, other.delimiters)
            && std::ptr::eq(self.prefix, other.prefix)
            && self.position() == other.position()
    }
}

impl Eq for TokenIter<'_> {}

impl fmt::Debug for TokenIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIter")
            .field("position", &self.position())
            .field("current", &self.peek())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultCustomization, Grammar};

    fn tokens<'a>(args: &'a Args, customize: &'a dyn Customization) -> Vec<(TokenKind, &'a str)> {
        TokenIter::new(args, customize)
            .map(|t| (t.kind(), t.text()))
            .collect()
    }

    #[test]
    fn splits_inline_value() {
        let args = Args::new("prog", vec!["-x=y"]);
        let toks: Vec<_> = TokenIter::new(&args, &DefaultCustomization).collect();
        assert_eq!(toks.len(), 2);
        assert!(toks[0].is_option());
        assert_eq!(toks[0].name(), "x");
        assert!(toks[1].is_value());
        assert_eq!(toks[1].text(), "y");
    }

    #[test]
    fn single_option() {
        let args = Args::new("prog", vec!["-x"]);
        let toks: Vec<_> = TokenIter::new(&args, &DefaultCustomization).collect();
        assert_eq!(toks.len(), 1);
        assert!(toks[0].is_option());
        assert_eq!(toks[0].name(), "x");
    }

    #[test]
    fn long_option_with_space_delimiter() {
        let args = Args::new("prog", vec!["--name value", "positional"]);
        assert_eq!(
            tokens(&args, &DefaultCustomization),
            vec![
                (TokenKind::Option, "--name"),
                (TokenKind::Value, "value"),
                (TokenKind::Value, "positional"),
            ]
        );
    }

    #[test]
    fn lone_prefix_is_a_value() {
        let args = Args::new("prog", vec!["-", "--"]);
        assert_eq!(
            tokens(&args, &DefaultCustomization),
            vec![(TokenKind::Value, "-"), (TokenKind::Value, "--")]
        );
    }

    #[test]
    fn nameless_option_is_a_value() {
        let args = Args::new("prog", vec!["-=x"]);
        assert_eq!(tokens(&args, &DefaultCustomization), vec![(TokenKind::Value, "-=x")]);
    }

    #[test]
    fn empty_args_yield_nothing() {
        let args = Args::new("prog", Vec::<String>::new());
        let mut iter = TokenIter::new(&args, &DefaultCustomization);
        assert!(iter.is_empty());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn custom_grammar() {
        let grammar = Grammar::new().prefix("/").delimiters(":");
        let args = Args::new("prog", vec!["/out:file.txt", "-x", "/v"]);
        assert_eq!(
            tokens(&args, &grammar),
            vec![
                (TokenKind::Option, "/out"),
                (TokenKind::Value, "file.txt"),
                (TokenKind::Value, "-x"),
                (TokenKind::Option, "/v"),
            ]
        );
    }

    #[test]
    fn copies_do_not_share_a_cursor() {
        let args = Args::new("prog", vec!["-a", "b"]);
        let start = TokenIter::new(&args, &DefaultCustomization);
        let mut copy = start;
        copy.next();
        assert_ne!(copy, start);
        assert_eq!(start.peek().map(|t| t.text()), Some("-a"));
        assert_eq!(copy.peek().map(|t| t.text()), Some("b"));
    }

    #[test]
    fn take_value_refuses_options() {
        let args = Args::new("prog", vec!["-a", "-b", "c"]);
        let mut iter = TokenIter::new(&args, &DefaultCustomization);
        iter.advance();
        assert_eq!(iter.take_value(), None);
        assert_eq!(iter.position(), Position { index: 1, split: false });
        iter.advance();
        assert_eq!(iter.take_value().map(|t| t.text()), Some("c"));
        assert!(iter.is_empty());
    }

    #[test]
    fn grammar_is_part_of_equality() {
        let args = Args::new("prog", vec!["/a:b"]);
        let slash = Grammar::new().prefix("/");
        let default = TokenIter::new(&args, &DefaultCustomization);
        let other = TokenIter::new(&args, &slash);
        assert_eq!(default.position(), other.position());
        assert_ne!(default, other);
    }
}
