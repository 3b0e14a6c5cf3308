//! Tri-state optional values.
//!
//! [`Opt`] separates "the caller did not say" from "the caller said no".
//! It is used for knobs such as the laziness preference, where `Unset`
//! means "inherit" and `Present(false)` means "explicitly eager".

/// A value that is either unset or explicitly present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opt<T> {
    /// The caller did not specify a value.
    Unset,
    /// The caller specified this value.
    Present(T),
}

impl<T> Opt<T> {
    /// An unset value.
    #[must_use]
    pub const fn unset() -> Self {
        Opt::Unset
    }

    /// A present value.
    #[must_use]
    pub const fn present(value: T) -> Self {
        Opt::Present(value)
    }

    /// Returns true if a value was specified.
    pub const fn is_present(&self) -> bool {
        matches!(self, Opt::Present(_))
    }

    /// Returns true if no value was specified.
    pub const fn is_unset(&self) -> bool {
        matches!(self, Opt::Unset)
    }

    /// Extract the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the value is unset. Callers must check [`Opt::is_present`]
    /// first; reaching this panic is a bug in the caller.
    #[track_caller]
    pub fn value(self) -> T {
        match self {
            Opt::Present(value) => value,
            Opt::Unset => panic!("attempted to read the value of an unset Opt"),
        }
    }

    /// Borrow the contained value.
    pub const fn as_ref(&self) -> Opt<&T> {
        match self {
            Opt::Present(value) => Opt::Present(value),
            Opt::Unset => Opt::Unset,
        }
    }

    /// Returns `self` if present, otherwise `fallback`.
    #[must_use]
    pub fn or(self, fallback: Opt<T>) -> Opt<T> {
        match self {
            Opt::Present(_) => self,
            Opt::Unset => fallback,
        }
    }

    /// Convert into a standard `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Opt::Present(value) => Some(value),
            Opt::Unset => None,
        }
    }

    /// Build from a standard `Option`, mapping `None` to `Unset`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Opt::Present(value),
            None => Opt::Unset,
        }
    }
}

impl<T> Default for Opt<T> {
    fn default() -> Self {
        Opt::Unset
    }
}

impl Opt<bool> {
    /// True only for `Present(true)`; `Unset` counts as false.
    pub const fn is_true(self) -> bool {
        matches!(self, Opt::Present(true))
    }
}
