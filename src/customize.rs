pub const DEFAULT_DELIMITERS: &str = " =";
pub const DEFAULT_PREFIX: &str = "-";

/// Lexical grammar of the command line.
///
/// `token_delimiters` lists the characters that split an argument into an
/// option and its inline value (`--name=value`). `option_prefix` lists the
/// characters that mark an argument as an option, either single or
/// repeated (`-n`, `--name`).
pub trait Customization {
    fn token_delimiters(&self) -> &str;
    fn option_prefix(&self) -> &str;
}

/// Space or equals as delimiters, dash as the option prefix.
///
/// Used whenever no customization is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultCustomization;

impl Customization for DefaultCustomization {
    fn token_delimiters(&self) -> &str {
        DEFAULT_DELIMITERS
    }

    fn option_prefix(&self) -> &str {
        DEFAULT_PREFIX
    }
}

/// An owned customization, for grammars that only differ from the default
/// in their characters.
///
/// ```
/// use sergeant::{Customization, Grammar};
///
/// let windows = Grammar::new().prefix("/").delimiters(":");
/// assert_eq!(windows.option_prefix(), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    delimiters: String,
    prefix: String,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = delimiters.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.into(),
            prefix: DEFAULT_PREFIX.into(),
        }
    }
}

impl Customization for Grammar {
    fn token_delimiters(&self) -> &str {
        &self.delimiters
    }

    fn option_prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grammar_matches_default_customization() {
        let grammar = Grammar::default();
        assert_eq!(
            grammar.token_delimiters(),
            DefaultCustomization.token_delimiters()
        );
        assert_eq!(grammar.option_prefix(), DefaultCustomization.option_prefix());
    }
}
