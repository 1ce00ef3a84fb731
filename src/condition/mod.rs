//! Condition authoring for branching (`if`) nodes.
//!
//! A condition compares one process variable (a [`PropertyOption`]) against a
//! value using an operator drawn from the [`operators_for`] table for that
//! variable's [`PropertyType`].

pub mod data;
pub mod operators;
pub mod property;

pub use data::*;
pub use operators::*;
pub use property::*;
