use super::{HelpText, ParseResult, ParseState, ParserBase};
use crate::{Customization, Error, TokenIter};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// An ordered choice between any number of parsers.
///
/// Children are tried in insertion order at the same position. The first
/// match wins, the first error aborts the group, and the group only fails
/// to match when every child fails to match. Children are shared, so
/// cloning a group is cheap and the clones write to the same bindings.
#[derive(Clone, Default)]
pub struct Group<'v> {
    children: Vec<Rc<dyn ParserBase + 'v>>,
}

impl<'v> Group<'v> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parser after the existing ones.
    pub fn with<P>(mut self, parser: P) -> Self
    where
        P: ParserBase + 'v,
    {
        self.push(parser);
        self
    }

    pub fn push<P>(&mut self, parser: P)
    where
        P: ParserBase + 'v,
    {
        self.children.push(Rc::new(parser));
    }

    /// Adds a parser that is already shared with something else.
    pub fn push_shared(&mut self, parser: Rc<dyn ParserBase + 'v>) {
        self.children.push(parser);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(super) fn children(&self) -> &[Rc<dyn ParserBase + 'v>] {
        &self.children
    }

    /// Runs the group until nothing more matches, holding each child to its
    /// cardinality. See [`Repeat`](super::Repeat).
    pub fn repeat(self) -> super::Repeat<'v> {
        super::Repeat::new(self)
    }
}

impl ParserBase for Group<'_> {
    fn parse<'a>(
        &self,
        exe_name: &str,
        tokens: TokenIter<'a>,
        customize: &dyn Customization,
    ) -> ParseResult<'a> {
        for (i, child) in self.children.iter().enumerate() {
            trace!(child = i, position = ?tokens.position(), "trying parser");
            let state = child.parse(exe_name, tokens, customize).map_err(|failure| {
                debug!(child = i, error = %failure, "parser failed");
                failure
            })?;
            if state.is_matched() {
                debug!(child = i, position = ?state.remaining().position(), "parser matched");
                return Ok(state);
            }
        }
        Ok(ParseState::no_match(tokens))
    }

    fn validate(&self) -> crate::Result<()> {
        if self.children.is_empty() {
            return Err(Error::Validation("group has no parsers".into()));
        }
        self.children.iter().try_for_each(|child| child.validate())
    }

    fn usage_text(&self) -> String {
        self.children
            .iter()
            .map(|child| child.usage_text())
            .filter(|usage| !usage.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn help_text(&self) -> HelpText {
        self.children
            .iter()
            .flat_map(|child| child.help_text())
            .collect()
    }
}

impl fmt::Debug for Group<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("children", &self.children.len())
            .field("usage", &self.usage_text())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::{flag, Args, DefaultCustomization};
    use std::cell::RefCell;

    #[test]
    fn shared_children_see_the_same_binding() {
        let hits = RefCell::new(Vec::<bool>::new());
        let shared = flag(&hits).name("-h").shared();

        let mut one = Group::new();
        one.push_shared(Rc::clone(&shared));
        let two = one.clone().with(flag(&hits).name("--help"));
        assert_eq!((one.len(), two.len()), (1, 2));

        let args = Args::new("prog", vec!["-h", "--help"]);
        let first = two.parse_args(&args).unwrap();
        let second = two
            .parse("prog", first.remaining(), &DefaultCustomization)
            .unwrap();
        assert!(second.is_matched());
        assert_eq!(*hits.borrow(), vec![true, true]);
    }

    #[test]
    fn empty_group_never_matches() {
        let args = Args::new("prog", vec!["-x"]);
        let state = Group::new().parse_args(&args).unwrap();
        assert!(!state.is_matched());
        assert_eq!(state.remaining().position().index, 0);
    }
}
