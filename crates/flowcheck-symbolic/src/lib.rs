//! # flowcheck-symbolic
//!
//! The symbolic evaluation engine: a finite-domain boolean/relational kernel
//! ([`GuardExpr`]), a model of enumerated variable domains ([`EnumDomain`])
//! with substitution dictionaries and brute-force truth-table enumeration,
//! and an interval model that lifts open numeric inequalities onto a finite
//! enum so the same brute-force machinery applies to them.
//!
//! # Module Structure
//!
//! - [`guard`] — [`GuardExpr`], [`Lit`], [`RelOp`], substitution, simplification, DNF
//! - [`domain`] — [`EnumDomain`], substitution dictionaries, null-substitution, brute force
//! - [`interval`] — numeric interval collection and disjoint refinement
//! - [`error`] — [`SymbolicError`]

pub mod guard;
pub mod domain;
pub mod interval;
pub mod error;

pub use guard::{GuardExpr, GuardType, Lit, RelOp, SubsMap};
pub use domain::{brute_force, is_contradiction, is_tautology, simplify_enums, EnumDomain, EnumMember, MemberKey};
pub use interval::{build_enum, lift, refine_disjoint, set_for, Interval};
pub use error::{SymbolicError, SymbolicResult};
