use super::validate_names;
use crate::parser::{
    decorate_usage, Bound, BoundParser, Cardinality, HelpItem, HelpText, ParseFailure,
    ParseResult, ParseState, ParserBase,
};
use crate::{Customization, Error, IntoBinding, TokenIter};

/// A named option taking a value: `-n 3`, `--count=3` or `--count 3`.
#[derive(Debug, Clone)]
pub struct Opt<'v> {
    bound: Bound<'v>,
    names: Vec<String>,
}

impl<'v> Opt<'v> {
    /// `hint` names the value in usage and help text.
    pub fn new(target: impl IntoBinding<'v>, hint: impl Into<String>) -> Self {
        Self {
            bound: Bound::new(target, hint),
            names: Vec::new(),
        }
    }

    /// Adds a name the option answers to, prefix included.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn label(&self) -> String {
        format!("{} <{}>", self.names.join("|"), self.bound.hint())
    }
}

pub fn opt<'v>(target: impl IntoBinding<'v>, hint: impl Into<String>) -> Opt<'v> {
    Opt::new(target, hint)
}

impl<'v> BoundParser<'v> for Opt<'v> {
    fn bound(&self) -> &Bound<'v> {
        &self.bound
    }

    fn bound_mut(&mut self) -> &mut Bound<'v> {
        &mut self.bound
    }
}

impl ParserBase for Opt<'_> {
    fn parse<'a>(
        &self,
        _exe_name: &str,
        tokens: TokenIter<'a>,
        _customize: &dyn Customization,
    ) -> ParseResult<'a> {
        let token = match tokens.peek() {
            Some(token) if token.is_option() && self.names.iter().any(|n| n == token.text()) => {
                token
            }
            _ => return Ok(ParseState::no_match(tokens)),
        };
        let mut rest = tokens;
        rest.advance();
        let value = match rest.take_value() {
            Some(value) => value,
            None => {
                let error = Error::MissingValue {
                    option: token.text().into(),
                };
                return Err(ParseFailure::new(error, rest));
            }
        };
        self.bound
            .assign(token.text(), value.text())
            .map_err(|error| ParseFailure::new(error, rest))?;
        Ok(ParseState::matched(rest))
    }

    fn validate(&self) -> crate::Result<()> {
        validate_names(&self.names, self.bound.hint())?;
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
            option: format!("{} <{}>", self.names.join(", "), self.bound.hint()),
            description: self.bound.description().into(),
        }]
    }
}
