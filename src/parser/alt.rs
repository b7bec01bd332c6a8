use super::{HelpText, ParseResult, ParserBase};
use crate::{Customization, TokenIter};

/// Tries `first`, then `second`, at the same position.
#[derive(Clone, Copy, Debug)]
pub struct Alt<T, U> {
    pub(super) first: T,
    pub(super) second: U,
}

impl<T, U> ParserBase for Alt<T, U>
where
    T: ParserBase,
    U: ParserBase,
{
    #[inline]
    fn parse<'a>(
        &self,
        exe_name: &str,
        tokens: TokenIter<'a>,
        customize: &dyn Customization,
    ) -> ParseResult<'a> {
        let state = self.first.parse(exe_name, tokens, customize)?;
        if state.is_matched() {
            return Ok(state);
        }
        self.second.parse(exe_name, tokens, customize)
    }

    fn validate(&self) -> crate::Result<()> {
        self.first.validate()?;
        self.second.validate()
    }

    fn usage_text(&self) -> String {
        match (self.first.usage_text(), self.second.usage_text()) {
            (a, b) if b.is_empty() => a,
            (a, b) if a.is_empty() => b,
            (a, b) => format!("{}|{}", a, b),
        }
    }

    fn help_text(&self) -> HelpText {
        let mut help = self.first.help_text();
        help.extend(self.second.help_text());
        help
    }
}
