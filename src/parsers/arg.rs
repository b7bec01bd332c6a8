use crate::parser::{
    decorate_usage, Bound, BoundParser, Cardinality, HelpItem, HelpText, ParseFailure,
    ParseResult, ParseState, ParserBase,
};
use crate::{Customization, IntoBinding, TokenIter};

/// A positional argument, consuming one value token per match.
#[derive(Debug, Clone)]
pub struct Arg<'v> {
    bound: Bound<'v>,
}

impl<'v> Arg<'v> {
    pub fn new(target: impl IntoBinding<'v>, hint: impl Into<String>) -> Self {
        Self {
            bound: Bound::new(target, hint),
        }
    }

    fn label(&self) -> String {
        format!("<{}>", self.bound.hint())
    }
}

pub fn arg<'v>(target: impl IntoBinding<'v>, hint: impl Into<String>) -> Arg<'v> {
    Arg::new(target, hint)
}

impl<'v> BoundParser<'v> for Arg<'v> {
    fn bound(&self) -> &Bound<'v> {
        &self.bound
    }

    fn bound_mut(&mut self) -> &mut Bound<'v> {
        &mut self.bound
    }
}

impl ParserBase for Arg<'_> {
    fn parse<'a>(
        &self,
        _exe_name: &str,
        tokens: TokenIter<'a>,
        _customize: &dyn Customization,
    ) -> ParseResult<'a> {
        let mut rest = tokens;
        let value = match rest.take_value() {
            Some(value) => value,
            None => return Ok(ParseState::no_match(tokens)),
        };
        self.bound
            .assign(&self.label(), value.text())
            .map_err(|error| ParseFailure::new(error, rest))?;
        Ok(ParseState::matched(rest))
    }

    fn validate(&self) -> crate::Result<()> {
        self.bound.cardinality().validate(&self.label())
    }

    fn cardinality(&self) -> Cardinality {
        self.bound.cardinality()
    }

    fn usage_text(&self) -> String {
        decorate_usage(self.label(), self.cardinality())
    }

    fn help_text(&self) -> HelpText {
        vec![HelpItem {
            option: self.label(),
            description: self.bound.description().into(),
        }]
    }
}
