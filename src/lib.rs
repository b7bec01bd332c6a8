//! Composable command line parsers.
//!
//! Arguments are cut into option and value tokens by a [`TokenIter`],
//! following the delimiters and prefixes of a [`Customization`]. Parsers
//! implement [`ParserBase`]: given a position in the token stream they
//! either match and move past what they consumed, decline and leave the
//! position alone, or fail. Composites such as [`Group`] try their
//! children in order on the same position, which is all it takes to build
//! a larger grammar out of small parsers.
//!
//! ```
//! use sergeant::{flag, opt, Args, Group, ParserBase};
//! use std::cell::RefCell;
//!
//! let verbose = RefCell::new(false);
//! let jobs = RefCell::new(1u32);
//! let cli = Group::new()
//!     .with(flag(&verbose).name("-v").name("--verbose"))
//!     .with(opt(&jobs, "n").name("-j").name("--jobs"));
//!
//! let args = Args::new("make", vec!["--jobs=4"]);
//! let state = cli.parse_args(&args).unwrap();
//! assert!(state.is_matched());
//! assert_eq!(*jobs.borrow(), 4);
//! assert!(!*verbose.borrow());
//! ```

mod args;
mod bind;
mod customize;
mod error;
mod input;
mod parser;
pub mod parsers;

pub use args::Args;
pub use bind::{BindTarget, Binding, FromArg, IntoBinding};
pub use customize::{Customization, DefaultCustomization, Grammar, DEFAULT_DELIMITERS, DEFAULT_PREFIX};
pub use error::{Error, Result};
pub use input::{Position, Token, TokenIter, TokenKind};
pub use parser::{
    Alt, Bound, BoundParser, Cardinality, Group, HelpItem, HelpText, ParseFailure, ParseKind,
    ParseResult, ParseState, Parser, ParserBase, Repeat, Then,
};
pub use parsers::{arg, flag, opt, Arg, Flag, Opt};
