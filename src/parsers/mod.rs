mod arg;
mod flag;
mod opt;

pub use arg::{arg, Arg};
pub use flag::{flag, Flag};
pub use opt::{opt, Opt};

use crate::Error;

pub(crate) fn validate_names(names: &[String], hint: &str) -> crate::Result<()> {
    if names.is_empty() {
        return Err(Error::Validation(format!("`{}` has no option names", hint)));
    }
    if names.iter().any(|name| name.is_empty()) {
        return Err(Error::Validation(format!("`{}` has an empty option name", hint)));
    }
    Ok(())
}
