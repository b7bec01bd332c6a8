use super::{HelpText, ParseFailure, ParseResult, ParseState, ParserBase};
use crate::{Customization, Error, TokenIter};

/// Matches `first` and then `second` on what `first` left over.
///
/// When `first` does not match, neither does the pair and the tokens are
/// untouched. Once `first` matched the input belongs to the pair, so a
/// `second` that does not match is an error positioned after `first`.
#[derive(Clone, Copy, Debug)]
pub struct Then<T, U> {
    pub(super) first: T,
    pub(super) second: U,
}

impl<T, U> ParserBase for Then<T, U>
where
    T: ParserBase,
    U: ParserBase,
{
    fn parse<'a>(
        &self,
        exe_name: &str,
        tokens: TokenIter<'a>,
        customize: &dyn Customization,
    ) -> ParseResult<'a> {
        let first = self.first.parse(exe_name, tokens, customize)?;
        if !first.is_matched() {
            return Ok(ParseState::no_match(tokens));
        }
        let second = self.second.parse(exe_name, first.remaining(), customize)?;
        if !second.is_matched() {
            let error = Error::Incomplete {
                after: self.first.usage_text(),
                expected: match self.second.usage_text() {
                    usage if usage.is_empty() => "more input".into(),
                    usage => format!("`{}`", usage),
                },
            };
            return Err(ParseFailure::new(error, first.remaining()));
        }
        Ok(second)
    }

    fn validate(&self) -> crate::Result<()> {
        self.first.validate()?;
        self.second.validate()
    }

    fn usage_text(&self) -> String {
        let (a, b) = (self.first.usage_text(), self.second.usage_text());
        [a, b]
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn help_text(&self) -> HelpText {
        let mut help = self.first.help_text();
        help.extend(self.second.help_text());
        help
    }
}
