use super::{Group, HelpText, ParseFailure, ParseResult, ParseState, ParserBase};
use crate::{Customization, Error, TokenIter};
use tracing::debug;

/// Drives a [`Group`] over the tokens until none of its children match,
/// counting the matches of each child.
///
/// A child matching more often than its cardinality allows fails the parse
/// right after the offending match. Once matching stops, a child short of
/// its minimum fails the parse at that position. Tokens that no child
/// accepts are left in the remaining iterator for the caller.
#[derive(Clone, Debug)]
pub struct Repeat<'v> {
    group: Group<'v>,
}

impl<'v> Repeat<'v> {
    pub fn new(group: Group<'v>) -> Self {
        Self { group }
    }
}

fn label(child: &dyn ParserBase) -> String {
    child
        .help_text()
        .into_iter()
        .next()
        .map(|item| item.option)
        .unwrap_or_else(|| child.usage_text())
}

fn occurrences(child: &dyn ParserBase, count: usize) -> Error {
    Error::Occurrences {
        name: label(child),
        count,
        expected: child.cardinality(),
    }
}

impl ParserBase for Repeat<'_> {
    fn parse<'a>(
        &self,
        exe_name: &str,
        tokens: TokenIter<'a>,
        customize: &dyn Customization,
    ) -> ParseResult<'a> {
        let children = self.group.children();
        let mut counts = vec![0usize; children.len()];
        let mut rest = tokens;

        'tokens: while !rest.is_empty() {
            for (i, child) in children.iter().enumerate() {
                let state = child.parse(exe_name, rest, customize)?;
                if !state.is_matched() {
                    continue;
                }
                counts[i] += 1;
                let cardinality = child.cardinality();
                if !cardinality.is_unbounded() && counts[i] > cardinality.max {
                    debug!(child = i, count = counts[i], "too many matches");
                    return Err(ParseFailure::new(
                        occurrences(&**child, counts[i]),
                        state.remaining(),
                    ));
                }
                // A match that consumed nothing would match forever.
                let stalled = state.remaining() == rest;
                rest = state.remaining();
                if stalled {
                    break 'tokens;
                }
                continue 'tokens;
            }
            break;
        }

        for (child, &count) in children.iter().zip(&counts) {
            if !child.cardinality().admits(count) {
                debug!(count, "too few matches");
                return Err(ParseFailure::new(occurrences(&**child, count), rest));
            }
        }

        if counts.iter().any(|&count| count > 0) {
            Ok(ParseState::matched(rest))
        } else {
            Ok(ParseState::no_match(tokens))
        }
    }

    fn validate(&self) -> crate::Result<()> {
        self.group.validate()
    }

    fn usage_text(&self) -> String {
        self.group.usage_text()
    }

    fn help_text(&self) -> HelpText {
        self.group.help_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arg, flag, opt, Args, BoundParser, Cardinality};
    use std::cell::RefCell;

    #[test]
    fn required_option_missing() {
        let n = RefCell::new(0i32);
        let cli = Group::new().with(opt(&n, "n").name("-n").required()).repeat();

        let args = Args::new("prog", Vec::<String>::new());
        let failure = cli.parse_args(&args).unwrap_err();
        match failure.error {
            Error::Occurrences {
                name,
                count,
                expected,
            } => {
                assert_eq!(name, "-n <n>");
                assert_eq!(count, 0);
                assert_eq!(expected, Cardinality::required());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn single_option_given_twice() {
        let n = RefCell::new(0i32);
        let cli = Group::new().with(opt(&n, "n").name("-n")).repeat();

        let args = Args::new("prog", vec!["-n", "1", "-n", "2"]);
        let failure = cli.parse_args(&args).unwrap_err();
        assert!(matches!(failure.error, Error::Occurrences { count: 2, .. }));
        assert!(failure.remaining.is_empty());
        assert_eq!(
            failure.to_string(),
            "`-n <n>` given 2 times, expected 0..=1"
        );
    }

    #[test]
    fn consumes_everything_it_recognizes() {
        let verbose = RefCell::new(Vec::<bool>::new());
        let jobs = RefCell::new(1u32);
        let files = RefCell::new(Vec::<String>::new());
        let cli = Group::new()
            .with(flag(&verbose).name("-v"))
            .with(opt(&jobs, "n").name("-j").required())
            .with(arg(&files, "file").bounds(1, 2))
            .repeat();

        let args = Args::new("prog", vec!["-v", "a", "-j=4", "-v", "b", "-x"]);
        let state = cli.parse_args(&args).unwrap();
        assert!(state.is_matched());
        assert_eq!(state.remaining().peek().map(|t| t.text()), Some("-x"));
        assert_eq!(verbose.borrow().len(), 2);
        assert_eq!(*jobs.borrow(), 4);
        assert_eq!(*files.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn nothing_recognized_is_no_match() {
        let v = RefCell::new(false);
        let cli = Group::new().with(flag(&v).name("-v")).repeat();

        let args = Args::new("prog", vec!["-q"]);
        let state = cli.parse_args(&args).unwrap();
        assert!(!state.is_matched());
        assert_eq!(state.remaining().position().index, 0);
    }
}
