use std::iter::FromIterator;

/// The raw command line: a program name followed by its arguments.
///
/// Parsers borrow an `Args` for the duration of a parse, so the tokens
/// they hand out point straight into these strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    exe_name: String,
    args: Vec<String>,
}

impl Args {
    pub fn new<E, I, S>(exe_name: E, args: I) -> Self
    where
        E: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exe_name: exe_name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Collects the arguments of the running process. Arguments that are
    /// not valid unicode are converted lossily.
    pub fn from_env() -> Self {
        std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    pub fn exe_name(&self) -> &str {
        &self.exe_name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// The first item is taken as the program name, like `argv`.
impl<S> FromIterator<S> for Args
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut iter = iter.into_iter();
        let exe_name = iter.next().map(Into::into).unwrap_or_default();
        Self::new(exe_name, iter)
    }
}
