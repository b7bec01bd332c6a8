use super::validate_names;
use crate::parser::{
    decorate_usage, Bound, BoundParser, Cardinality, HelpItem, HelpText, ParseFailure,
    ParseResult, ParseState, ParserBase,
};
use crate::{Customization, Error, IntoBinding, TokenIter};

/// An option without a value, such as `-v` or `--verbose`.
///
/// A match writes `true` to the binding. Giving the flag an inline value
/// (`--verbose=yes`) is an error.
#[derive(Debug, Clone)]
pub struct Flag<'v> {
    bound: Bound<'v>,
    names: Vec<String>,
}

impl<'v> Flag<'v> {
    pub fn new(target: impl IntoBinding<'v>) -> Self {
        Self {
            bound: Bound::new(target, ""),
            names: Vec::new(),
        }
    }

    /// Adds a name the flag answers to, prefix included.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

pub fn flag<'v>(target: impl IntoBinding<'v>) -> Flag<'v> {
    Flag::new(target)
}

impl<'v> BoundParser<'v> for Flag<'v> {
    fn bound(&self) -> &Bound<'v> {
        &self.bound
    }

    fn bound_mut(&mut self) -> &mut Bound<'v> {
        &mut self.bound
    }
}

impl ParserBase for Flag<'_> {
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
        if rest.at_inline_value() {
            if let Some(value) = rest.take_value() {
                let error = Error::UnexpectedValue {
                    option: token.text().into(),
                    value: value.text().into(),
                };
                return Err(ParseFailure::new(error, rest));
            }
        }
        self.bound
            .assign(token.text(), "true")
            .map_err(|error| ParseFailure::new(error, rest))?;
        Ok(ParseState::matched(rest))
    }

    fn validate(&self) -> crate::Result<()> {
        validate_names(&self.names, "flag")?;
        self.bound.cardinality().validate(&self.names.join("|"))
    }

    fn cardinality(&self) -> Cardinality {
        self.bound.cardinality()
    }

    fn usage_text(&self) -> String {
        decorate_usage(self.names.join("|"), self.cardinality())
    }

    fn help_text(&self) -> HelpText {
        vec![HelpItem {
            option: self.names.join(", "),
            description: self.bound.description().into(),
        }]
    }
}
