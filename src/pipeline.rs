//! End-to-end evaluation: model description text in, per-world truth values out.
//!
//! The stages run in a fixed order: the description is read first (so a broken
//! model is reported before the expression is looked at), then the expression is
//! tokenized and parsed, and finally evaluated against the model.
//!
//! ```
//! use kripke_rs::eval::{EvalConfig, UnboundPolicy};
//! use kripke_rs::pipeline::evaluate_source_with;
//!
//! let text = "
//! worlds {
//!     w0: P=1
//!     w1: P=0
//! }
//! access {
//!     w0: w1
//! }
//! expr: @!P || Q
//! ";
//! let config = EvalConfig { unbound: UnboundPolicy::AssumeFalse };
//! let evaluation = evaluate_source_with(text, &config).unwrap();
//! assert_eq!(evaluation.satisfying_worlds(), vec!["w0"]);
//! assert_eq!(evaluation.holds_at("w1"), Some(false));
//! assert!(!evaluation.is_valid());
//! ```

use log::info;
use ndarray::Array1;

use crate::ast::Formula;
use crate::error::Error;
use crate::eval::{EvalConfig, Evaluator};
use crate::format::parse_description;
use crate::model::{KripkeModel, Truth};
use crate::parser::parse_formula;

/// The outcome of evaluating one formula over one model.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub formula: Formula,
    /// One truth value per world, in the model's world order.
    pub result: Array1<Truth>,
    pub model: KripkeModel,
}

impl Evaluation {
    /// Whether the formula holds in `world`, or `None` for an unknown world.
    pub fn holds_at(&self, world: &str) -> Option<bool> {
        self.model.worlds().position(world).map(|i| self.result[i] == 1)
    }

    /// Names of the worlds where the formula holds.
    pub fn satisfying_worlds(&self) -> Vec<&str> {
        self.model
            .worlds()
            .iter()
            .zip(self.result.iter())
            .filter(|&(_, &v)| v == 1)
            .map(|(w, _)| w)
            .collect()
    }

    /// Whether the formula holds in every world.
    ///
    /// True for a model without worlds.
    pub fn is_valid(&self) -> bool {
        self.result.iter().all(|&v| v == 1)
    }
}

/// Evaluates the expression of a model description with the default configuration.
pub fn evaluate_source(text: &str) -> Result<Evaluation, Error> {
    evaluate_source_with(text, &EvalConfig::default())
}

/// Evaluates the expression of a model description.
pub fn evaluate_source_with(text: &str, config: &EvalConfig) -> Result<Evaluation, Error> {
    let desc = parse_description(text)?;
    info!("evaluating `{}` from line {}", desc.expr, desc.expr_line);
    evaluate_expression(desc.model, &desc.expr, config)
}

/// Parses `expr` and evaluates it over `model`.
pub fn evaluate_expression(model: KripkeModel, expr: &str, config: &EvalConfig) -> Result<Evaluation, Error> {
    let formula = parse_formula(expr)?;
    info!(
        "parsed formula of size {} and depth {}",
        formula.size(),
        formula.depth()
    );
    let result = Evaluator::with_config(&model, config.clone()).evaluate(&formula)?;
    info!(
        "formula holds in {} of {} worlds",
        result.iter().filter(|&&v| v == 1).count(),
        model.num_worlds()
    );
    Ok(Evaluation {
        formula,
        result,
        model,
    })
}
