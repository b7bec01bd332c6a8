use anyhow::{anyhow, bail};
use std::cell::RefCell;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

/// Decodes a single command line value.
pub trait FromArg: Sized {
    fn from_arg(text: &str) -> anyhow::Result<Self>;
}

/// A variable that parsers may write decoded values into.
///
/// Containers (`IS_CONTAINER`) accept any number of values and make the
/// parsers bound to them unbounded by default.
pub trait BindTarget {
    const IS_CONTAINER: bool = false;

    fn assign(&mut self, text: &str) -> anyhow::Result<()>;
}

macro_rules! from_str_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromArg for $ty {
                fn from_arg(text: &str) -> anyhow::Result<Self> {
                    Ok(<$ty as FromStr>::from_str(text)?)
                }
            }

            impl BindTarget for $ty {
                fn assign(&mut self, text: &str) -> anyhow::Result<()> {
                    *self = Self::from_arg(text)?;
                    Ok(())
                }
            }
        )*
    }
}

from_str_arg!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    char, String, PathBuf, OsString,
);

impl FromArg for bool {
    fn from_arg(text: &str) -> anyhow::Result<Self> {
        match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => bail!("expected a boolean, like `true` or `no`"),
        }
    }
}

impl BindTarget for bool {
    fn assign(&mut self, text: &str) -> anyhow::Result<()> {
        *self = Self::from_arg(text)?;
        Ok(())
    }
}

impl<T: FromArg> BindTarget for Option<T> {
    fn assign(&mut self, text: &str) -> anyhow::Result<()> {
        *self = Some(T::from_arg(text)?);
        Ok(())
    }
}

impl<T: FromArg> BindTarget for Vec<T> {
    const IS_CONTAINER: bool = true;

    fn assign(&mut self, text: &str) -> anyhow::Result<()> {
        self.push(T::from_arg(text)?);
        Ok(())
    }
}

type Sink<'v> = Rc<dyn Fn(&str) -> anyhow::Result<()> + 'v>;

/// Where a matched value goes.
///
/// A binding borrows the user's storage for `'v`; the variable therefore
/// outlives every parser holding the binding. Clones of a parser share the
/// same binding.
///
/// Parsing is single threaded and bindings write through a `RefCell`, so
/// running two parses that share a binding at the same time is not
/// supported. A target that is borrowed while a parse writes to it yields
/// an error instead of a panic.
#[derive(Clone)]
pub enum Binding<'v> {
    /// Overwrites a single variable.
    Value(Sink<'v>),
    /// Appends to a container.
    Container(Sink<'v>),
    /// Hands the decoded value to a callback.
    Callback(Sink<'v>),
}

impl<'v> Binding<'v> {
    /// Binds a variable, detecting whether it is a container.
    pub fn to<T>(target: &'v RefCell<T>) -> Self
    where
        T: BindTarget + 'v,
    {
        let sink: Sink<'v> = Rc::new(move |text: &str| {
            target
                .try_borrow_mut()
                .map_err(|_| anyhow!("bound variable is borrowed elsewhere"))?
                .assign(text)
        });
        if T::IS_CONTAINER {
            Binding::Container(sink)
        } else {
            Binding::Value(sink)
        }
    }

    /// Binds a callback that receives each decoded value.
    pub fn callback<T, F>(callback: F) -> Self
    where
        T: FromArg + 'v,
        F: Fn(T) -> anyhow::Result<()> + 'v,
    {
        Binding::Callback(Rc::new(move |text: &str| callback(T::from_arg(text)?)))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Binding::Container(_))
    }

    pub fn assign(&self, text: &str) -> anyhow::Result<()> {
        match self {
            Binding::Value(sink) | Binding::Container(sink) | Binding::Callback(sink) => {
                sink(text)
            }
        }
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Binding::Value(_) => "Value",
            Binding::Container(_) => "Container",
            Binding::Callback(_) => "Callback",
        };
        write!(f, "Binding::{}", kind)
    }
}

/// Anything a bound parser can be constructed from.
pub trait IntoBinding<'v> {
    fn into_binding(self) -> Binding<'v>;
}

impl<'v, T> IntoBinding<'v> for &'v RefCell<T>
where
    T: BindTarget + 'v,
{
    fn into_binding(self) -> Binding<'v> {
        Binding::to(self)
    }
}

impl<'v> IntoBinding<'v> for Binding<'v> {
    fn into_binding(self) -> Binding<'v> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn single_value_overwrites() {
        let n = RefCell::new(1u32);
        let binding = Binding::to(&n);
        assert!(!binding.is_container());
        binding.assign("5").unwrap();
        binding.assign("7").unwrap();
        assert_eq!(*n.borrow(), 7);
    }

    #[test]
    fn container_appends() {
        let files = RefCell::new(Vec::<String>::new());
        let binding = Binding::to(&files);
        assert!(binding.is_container());
        binding.assign("a").unwrap();
        binding.assign("b").unwrap();
        assert_eq!(*files.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn optional_is_single_valued() {
        let level = RefCell::new(None::<u8>);
        let binding = Binding::to(&level);
        assert!(!binding.is_container());
        binding.assign("3").unwrap();
        assert_eq!(*level.borrow(), Some(3));
    }

    #[test]
    fn callback_receives_decoded_value() {
        let seen = Cell::new(0i64);
        let binding = Binding::callback(|n: i64| {
            seen.set(n);
            Ok(())
        });
        binding.assign("-12").unwrap();
        assert_eq!(seen.get(), -12);
        assert!(binding.assign("twelve").is_err());
    }

    #[test]
    fn decode_failure_leaves_target() {
        let n = RefCell::new(4i32);
        assert!(Binding::to(&n).assign("x").is_err());
        assert_eq!(*n.borrow(), 4);
    }

    #[test]
    fn borrowed_target_is_an_error() {
        let n = RefCell::new(4i32);
        let binding = Binding::to(&n);
        let _guard = n.borrow();
        assert!(binding.assign("5").is_err());
    }

    #[test]
    fn lenient_booleans() {
        for text in &["true", "YES", "on", "1"] {
            assert!(bool::from_arg(text).unwrap());
        }
        for text in &["false", "No", "OFF", "0"] {
            assert!(!bool::from_arg(text).unwrap());
        }
        assert!(bool::from_arg("maybe").is_err());
    }
}
