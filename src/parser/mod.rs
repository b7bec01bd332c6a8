mod alt;
mod bound;
mod group;
mod repeat;
mod then;

pub use self::alt::Alt;
pub use self::bound::{Bound, BoundParser};
pub use self::group::Group;
pub use self::repeat::Repeat;
pub use self::then::Then;

use crate::{Args, Customization, DefaultCustomization, Error, TokenIter};
use std::fmt;
use std::rc::Rc;

/// How many times a parser may match during one pass: `min..=max`, where a
/// `max` of zero means "no upper bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    pub min: usize,
    pub max: usize,
}

impl Cardinality {
    /// The `max` sentinel for "any number of times".
    pub const UNBOUNDED: usize = 0;

    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub const fn exactly(n: usize) -> Self {
        Self::new(n, n)
    }

    /// At most once.
    pub const fn optional() -> Self {
        Self::new(0, 1)
    }

    /// Exactly once.
    pub const fn required() -> Self {
        Self::new(1, 1)
    }

    pub const fn unbounded() -> Self {
        Self::new(0, Self::UNBOUNDED)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max == Self::UNBOUNDED
    }

    /// Zero matches allowed but not unbounded.
    pub fn is_optional(&self) -> bool {
        self.min == 0 && self.max > 0
    }

    /// `max - min`, or `None` when unbounded or inverted.
    pub fn count(&self) -> Option<usize> {
        if self.is_unbounded() {
            None
        } else {
            self.max.checked_sub(self.min)
        }
    }

    /// Whether `n` matches satisfy this cardinality.
    pub fn admits(&self, n: usize) -> bool {
        n >= self.min && (self.is_unbounded() || n <= self.max)
    }

    pub fn validate(&self, name: &str) -> crate::Result<()> {
        if !self.is_unbounded() && self.min > self.max {
            return Err(Error::Cardinality {
                name: name.into(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::optional()
    }
}

impl From<(usize, usize)> for Cardinality {
    fn from((min, max): (usize, usize)) -> Self {
        Self::new(min, max)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            write!(f, "{}..", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseKind {
    Matched,
    NoMatch,
}

/// The outcome of a successful parse attempt and where it left the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState<'a> {
    kind: ParseKind,
    remaining: TokenIter<'a>,
}

impl<'a> ParseState<'a> {
    pub fn matched(remaining: TokenIter<'a>) -> Self {
        Self {
            kind: ParseKind::Matched,
            remaining,
        }
    }

    /// `tokens` must be the position the attempt started from.
    pub fn no_match(tokens: TokenIter<'a>) -> Self {
        Self {
            kind: ParseKind::NoMatch,
            remaining: tokens,
        }
    }

    pub fn kind(&self) -> ParseKind {
        self.kind
    }

    pub fn is_matched(&self) -> bool {
        self.kind == ParseKind::Matched
    }

    pub fn remaining(&self) -> TokenIter<'a> {
        self.remaining
    }
}

/// A parse attempt that recognized its input but could not use it.
///
/// `remaining` points past the tokens that were consumed before the
/// failure, not at the start of the attempt.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ParseFailure<'a> {
    #[source]
    pub error: Error,
    pub remaining: TokenIter<'a>,
}

impl<'a> ParseFailure<'a> {
    pub fn new(error: impl Into<Error>, remaining: TokenIter<'a>) -> Self {
        Self {
            error: error.into(),
            remaining,
        }
    }
}

pub type ParseResult<'a> = std::result::Result<ParseState<'a>, ParseFailure<'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpItem {
    pub option: String,
    pub description: String,
}

pub type HelpText = Vec<HelpItem>;

/// The contract every parser satisfies, leaf or composite.
///
/// `parse` has three outcomes:
/// * `Ok` with [`ParseKind::Matched`]: the tokens past what was consumed.
/// * `Ok` with [`ParseKind::NoMatch`]: the input is not for this parser;
/// the tokens are returned untouched so a sibling may try them.
/// * `Err`: the input was for this parser but is invalid.
///
/// Variables bound to parsers are written as matches happen and are not
/// restored on failure; after an `Err` which of them were written is
/// unspecified.
pub trait ParserBase {
    fn parse<'a>(
        &self,
        exe_name: &str,
        tokens: TokenIter<'a>,
        customize: &dyn Customization,
    ) -> ParseResult<'a>;

    /// Structural checks, independent of any input. Run once before the
    /// first parse.
    fn validate(&self) -> crate::Result<()> {
        Ok(())
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::default()
    }

    /// See [`Cardinality::count`].
    fn cardinality_count(&self) -> Option<usize> {
        self.cardinality().count()
    }

    fn is_optional(&self) -> bool {
        self.cardinality().is_optional()
    }

    fn usage_text(&self) -> String {
        String::new()
    }

    fn help_text(&self) -> HelpText {
        HelpText::new()
    }

    /// Parses `args` with the default customization.
    fn parse_args<'a>(&self, args: &'a Args) -> ParseResult<'a> {
        self.parse_args_with(args, &DefaultCustomization)
    }

    fn parse_args_with<'a>(
        &self,
        args: &'a Args,
        customize: &'a dyn Customization,
    ) -> ParseResult<'a> {
        self.parse(args.exe_name(), TokenIter::new(args, customize), customize)
    }
}

pub trait Parser: ParserBase {
    /// Tries `self`, then `other` at the same position.
    fn or<P>(self, other: P) -> Alt<Self, P>
    where
        Self: Sized,
        P: ParserBase,
    {
        Alt {
            first: self,
            second: other,
        }
    }

    /// Matches `self` followed by `other`.
    fn then<P>(self, other: P) -> Then<Self, P>
    where
        Self: Sized,
        P: ParserBase,
    {
        Then {
            first: self,
            second: other,
        }
    }

    fn shared<'v>(self) -> Rc<dyn ParserBase + 'v>
    where
        Self: Sized + 'v,
    {
        Rc::new(self)
    }
}

impl<T> Parser for T where T: ParserBase {}

macro_rules! forward_parser_base {
    ($($ptr:ident),*) => {
        $(
            impl<P: ParserBase + ?Sized> ParserBase for $ptr<P> {
                fn parse<'a>(
                    &self,
                    exe_name: &str,
                    tokens: TokenIter<'a>,
                    customize: &dyn Customization,
                ) -> ParseResult<'a> {
                    (**self).parse(exe_name, tokens, customize)
                }

                fn validate(&self) -> crate::Result<()> {
                    (**self).validate()
                }

                fn cardinality(&self) -> Cardinality {
                    (**self).cardinality()
                }

                fn usage_text(&self) -> String {
                    (**self).usage_text()
                }

                fn help_text(&self) -> HelpText {
                    (**self).help_text()
                }
            }
        )*
    };
}

forward_parser_base!(Box, Rc);

/// Brackets optional usage and marks repeatable usage with `...`.
pub(crate) fn decorate_usage(body: String, cardinality: Cardinality) -> String {
    if cardinality.is_unbounded() {
        if cardinality.min == 0 {
            format!("[{}]...", body)
        } else {
            format!("{}...", body)
        }
    } else if cardinality.is_optional() {
        format!("[{}]", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn default_cardinality_is_optional() {
        let c = Cardinality::default();
        assert_eq!(c, Cardinality::new(0, 1));
        assert!(c.is_optional());
        assert_eq!(c.count(), Some(1));
    }

    #[test]
    fn unbounded_is_not_optional() {
        let c = Cardinality::unbounded();
        assert!(c.is_unbounded());
        assert!(!c.is_optional());
        assert_eq!(c.count(), None);
        assert!(c.admits(1000));
    }

    #[test]
    fn inverted_cardinality_fails_validation() {
        assert!(Cardinality::new(3, 2).validate("-x").is_err());
        assert!(Cardinality::new(3, 0).validate("-x").is_ok());
        assert_eq!(Cardinality::new(3, 2).count(), None);
    }

    #[test]
    fn usage_decoration() {
        assert_eq!(decorate_usage("-v".into(), Cardinality::optional()), "[-v]");
        assert_eq!(decorate_usage("-v".into(), Cardinality::required()), "-v");
        assert_eq!(decorate_usage("<f>".into(), Cardinality::unbounded()), "[<f>]...");
        assert_eq!(decorate_usage("<f>".into(), Cardinality::new(1, 0)), "<f>...");
    }

    #[quickcheck]
    fn count_is_span_of_bounded(min: u8, span: u8) -> bool {
        let (min, span) = (min as usize, span as usize);
        let c = Cardinality::new(min, min + span);
        if c.is_unbounded() {
            c.count().is_none()
        } else {
            c.count() == Some(span) && c.admits(min) && c.admits(min + span) && !c.admits(min + span + 1)
        }
    }

    #[quickcheck]
    fn optional_iff_zero_min_and_bounded(min: u8, max: u8) -> bool {
        let c = Cardinality::new(min as usize, max as usize);
        c.is_optional() == (min == 0 && max > 0)
    }
}
