//! # flowcheck-base
//!
//! Pure structural atoms shared by the flowcheck crates.
//!
//! This crate provides the foundational types used throughout flowcheck:
//!
//! - [`Interner`]/[`Symbol`] — string interning for O(1) equality
//! - [`Span`] — source location tracking
//!
//! # Design Principles
//!
//! This crate has no knowledge of the questionnaire domain, the expression
//! grammar, or XML. It provides only generic, reusable infrastructure that
//! higher-level crates build upon.
//!
//! # Example
//!
//! ```
//! use flowcheck_base::{Interner, Span};
//!
//! let mut interner = Interner::new();
//! let sym = interner.intern("p1");
//! let span = Span::new(0, 2);
//!
//! assert_eq!(interner.resolve(sym), "p1");
//! assert_eq!(span.len(), 2);
//! ```

pub mod intern;
pub mod span;

pub use intern::{Interner, Symbol, SymbolEq};
pub use span::Span;
