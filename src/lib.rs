//! # kripke-rs: Modal logic over Kripke structures, the matrix way
//!
//! **`kripke-rs`** evaluates propositional modal logic formulas in every world of a
//! finite Kripke structure at once. The structure is two 0/1 matrices, and each
//! connective is a vectorized operation over columns of truth values.
//!
//! ## What is a Kripke structure?
//!
//! A set of *worlds*, an *access relation* saying which worlds each world sees, and
//! a *valuation* saying which propositional variables are true in which world.
//! Besides the boolean connectives, modal logic has
//!
//! - **necessity** `#p` (□): `p` holds in every world seen from here, and
//! - **possibility** `@p` (◇): `p` holds in some world seen from here.
//!
//! ## Key Features
//!
//! - **Matrix Semantics**: □ and ◇ are a single product of the access matrix with a truth column, see [`model`].
//! - **Closed AST**: [`Formula`][crate::ast::Formula] is a plain enum; evaluation is an exhaustive match.
//! - **Typed Errors**: every stage has its own error, all wrapped by [`Error`][crate::error::Error].
//! - **Inspectable**: the column store of an evaluation can be returned, and models render as tables or Graphviz.
//!
//! ## Basic Usage
//!
//! ```rust
//! use kripke_rs::eval::evaluate;
//! use kripke_rs::model::KripkeModel;
//! use kripke_rs::parser::parse_formula;
//!
//! // 1. Describe the structure
//! let model = KripkeModel::builder()
//!     .world("w0", [("P", true), ("Q", false)])
//!     .world("w1", [("P", false), ("Q", true)])
//!     .access("w0", ["w0", "w1"])
//!     .access("w1", ["w1"])
//!     .build()
//!     .unwrap();
//!
//! // 2. Parse a formula: "Q is possible, and P holds everywhere reachable"
//! let formula = parse_formula("@Q && #P").unwrap();
//!
//! // 3. Evaluate in every world at once
//! let result = evaluate(&formula, &model).unwrap();
//! assert_eq!(result.to_vec(), vec![0, 0]);
//! ```
//!
//! ## Core Components
//!
//! - **[`token`]** and **[`parser`]**: text to [`Formula`][crate::ast::Formula].
//! - **[`model`]**: the [`KripkeModel`][crate::model::KripkeModel] and its primitives.
//! - **[`eval`]**: bottom-up evaluation over a growable column store.
//! - **[`format`]**: reader for textual model descriptions.
//! - **[`pipeline`]**: description text to [`Evaluation`][crate::pipeline::Evaluation] in one call.
//! - **[`display`]** and **[`dot`]**: tables and Graphviz output.

pub mod ast;
pub mod display;
pub mod dot;
pub mod error;
pub mod eval;
pub mod format;
pub mod index;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod token;
