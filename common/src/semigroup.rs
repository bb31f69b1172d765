//! Combine operations used to merge error values.
//!
//! Instances are plain values handed to the combinator that needs them, so the
//! same error type can be merged differently at different call sites
//! (keep the first field error, or collect them all).

use std::marker::PhantomData;

/// An associative binary operation over `T`.
///
/// Implementations must satisfy `concat(concat(x, y), z) == concat(x, concat(y, z))`.
pub trait Semigroup<T> {
    fn concat(&self, x: T, y: T) -> T;
}

/// A [`Semigroup`] with an identity element.
///
/// `concat(empty(), x) == x == concat(x, empty())`.
pub trait Monoid<T>: Semigroup<T> {
    fn empty(&self) -> T;
}

impl<T, S: Semigroup<T> + ?Sized> Semigroup<T> for &S {
    fn concat(&self, x: T, y: T) -> T {
        (**self).concat(x, y)
    }
}

impl<T, M: Monoid<T> + ?Sized> Monoid<T> for &M {
    fn empty(&self) -> T {
        (**self).empty()
    }
}

/// Keeps the left operand.
#[derive(Debug, Clone, Copy, Default)]
pub struct First;

impl<T> Semigroup<T> for First {
    fn concat(&self, x: T, _y: T) -> T {
        x
    }
}

/// Keeps the right operand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Last;

impl<T> Semigroup<T> for Last {
    fn concat(&self, _x: T, y: T) -> T {
        y
    }
}

/// Appends vectors, preserving order.
#[derive(Debug, Clone, Copy)]
pub struct Concat<T>(PhantomData<fn() -> T>);

impl<T> Concat<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Concat<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Semigroup<Vec<T>> for Concat<T> {
    fn concat(&self, mut x: Vec<T>, y: Vec<T>) -> Vec<T> {
        x.extend(y);
        x
    }
}

impl<T> Monoid<Vec<T>> for Concat<T> {
    fn empty(&self) -> Vec<T> {
        Vec::new()
    }
}

/// Joins strings with a separator. Empty operands are skipped so that the
/// empty string stays an identity.
#[derive(Debug, Clone, Copy)]
pub struct Joined(pub &'static str);

impl Semigroup<String> for Joined {
    fn concat(&self, x: String, y: String) -> String {
        match (x.is_empty(), y.is_empty()) {
            (true, _) => y,
            (_, true) => x,
            _ => format!("{x}{}{y}", self.0),
        }
    }
}

impl Monoid<String> for Joined {
    fn empty(&self) -> String {
        String::new()
    }
}
