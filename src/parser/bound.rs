use super::Cardinality;
use crate::{Binding, Error, IntoBinding};

/// The state shared by every parser that writes into a binding: the
/// binding itself, a hint naming the value in usage text, a description for
/// help text, and a cardinality.
///
/// The cardinality starts unbounded for containers and optional for
/// everything else.
#[derive(Debug, Clone)]
pub struct Bound<'v> {
    binding: Binding<'v>,
    hint: String,
    description: String,
    cardinality: Cardinality,
}

impl<'v> Bound<'v> {
    pub fn new(target: impl IntoBinding<'v>, hint: impl Into<String>) -> Self {
        let binding = target.into_binding();
        let cardinality = if binding.is_container() {
            Cardinality::unbounded()
        } else {
            Cardinality::optional()
        };
        Self {
            binding,
            hint: hint.into(),
            description: String::new(),
            cardinality,
        }
    }

    pub fn binding(&self) -> &Binding<'v> {
        &self.binding
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Hands `value` to the binding, naming `option` in the error.
    pub fn assign(&self, option: &str, value: &str) -> crate::Result<()> {
        self.binding
            .assign(value)
            .map_err(|source| Error::InvalidValue {
                option: option.into(),
                value: value.into(),
                source,
            })
    }
}

/// Fluent configuration for parsers built on [`Bound`].
///
/// Each method consumes the parser and returns it, so calls chain off a
/// constructor. Configure a parser completely before it first parses;
/// changing it afterwards, for instance through a clone already placed in a
/// group, has no defined effect on that group.
pub trait BoundParser<'v>: Sized {
    fn bound(&self) -> &Bound<'v>;

    fn bound_mut(&mut self) -> &mut Bound<'v>;

    /// Sets the description shown in help text.
    fn help(mut self, description: impl Into<String>) -> Self {
        self.bound_mut().description = description.into();
        self
    }

    fn optional(self) -> Self {
        self.bounds(0, 1)
    }

    fn required(self) -> Self {
        self.bounds(1, 1)
    }

    fn exactly(self, n: usize) -> Self {
        self.bounds(n, n)
    }

    /// `max` of [`Cardinality::UNBOUNDED`] lifts the upper bound.
    fn bounds(mut self, min: usize, max: usize) -> Self {
        self.bound_mut().cardinality = Cardinality::new(min, max);
        self
    }

    fn hint<'s>(&'s self) -> &'s str
    where
        'v: 's,
    {
        self.bound().hint()
    }

    fn description<'s>(&'s self) -> &'s str
    where
        'v: 's,
    {
        self.bound().description()
    }
}
