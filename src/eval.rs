//! Vectorized evaluation of formulas over a [`KripkeModel`].
//!
//! Evaluation walks the formula bottom-up. Every subformula's value (one truth
//! value per world) is materialized as a new column of a private [`Worksheet`],
//! and each connective is computed by the matching model primitive over the
//! columns of its children. The worksheet starts as a copy of the valuation
//! matrix, only grows during one evaluation, and never touches the model.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use ndarray::{Array1, Array2, ArrayView1};

use crate::ast::Formula;
use crate::error::{Error, UnboundVariableError};
use crate::model::{KripkeModel, Truth};

/// What to do with variables the model does not define.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum UnboundPolicy {
    /// Fail with [`UnboundVariableError`].
    #[default]
    Reject,
    /// Treat the variable as false in every world.
    AssumeFalse,
}

/// Evaluation options.
#[derive(Debug, Clone, Default)]
pub struct EvalConfig {
    pub unbound: UnboundPolicy,
}

/// Handle of a worksheet column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Col(usize);

impl Col {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Col {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Growable column store used during one evaluation.
///
/// Columns `0..num_vars` are the model's valuation columns, labelled with the
/// variable names. Later ones are scratch columns labelled with the primitive
/// that produced them and its argument columns, e.g. `and(#0, #3)`.
#[derive(Debug, Clone)]
pub struct Worksheet {
    rows: usize,
    labels: Vec<String>,
    columns: Vec<Array1<Truth>>,
}

impl Worksheet {
    /// Seeds a worksheet with a copy of the model's valuation columns.
    pub fn new(model: &KripkeModel) -> Self {
        let valuation = model.valuation();
        Self {
            rows: model.num_worlds(),
            labels: model.var_names().to_vec(),
            columns: valuation.columns().into_iter().map(|c| c.to_owned()).collect(),
        }
    }

    /// Appends a column and returns its handle.
    pub fn push(&mut self, label: impl Into<String>, values: Array1<Truth>) -> Col {
        debug_assert_eq!(values.len(), self.rows);
        self.labels.push(label.into());
        self.columns.push(values);
        Col(self.columns.len() - 1)
    }

    pub fn column(&self, col: Col) -> ArrayView1<'_, Truth> {
        self.columns[col.0].view()
    }

    pub fn label(&self, col: Col) -> &str {
        &self.labels[col.0]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The worksheet as a `worlds x columns` matrix.
    pub fn to_matrix(&self) -> Array2<Truth> {
        Array2::from_shape_fn((self.rows, self.columns.len()), |(i, j)| self.columns[j][i])
    }
}

/// Evaluates formulas against a borrowed model.
pub struct Evaluator<'m> {
    model: &'m KripkeModel,
    config: EvalConfig,
}

impl<'m> Evaluator<'m> {
    pub fn new(model: &'m KripkeModel) -> Self {
        Self::with_config(model, EvalConfig::default())
    }

    pub fn with_config(model: &'m KripkeModel, config: EvalConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &'m KripkeModel {
        self.model
    }

    /// Computes the truth value of `formula` in every world.
    pub fn evaluate(&self, formula: &Formula) -> Result<Array1<Truth>, UnboundVariableError> {
        self.evaluate_traced(formula).map(|(result, _)| result)
    }

    /// Like [`evaluate`][Self::evaluate], also returning the final worksheet.
    pub fn evaluate_traced(
        &self,
        formula: &Formula,
    ) -> Result<(Array1<Truth>, Worksheet), UnboundVariableError> {
        let mut run = Run {
            model: self.model,
            config: &self.config,
            sheet: Worksheet::new(self.model),
            assumed: HashMap::new(),
        };
        let root = run.eval(formula)?;
        debug!(
            "evaluate({}) -> column {} of {}",
            formula,
            root,
            run.sheet.num_columns()
        );
        let result = run.sheet.column(root).to_owned();
        Ok((result, run.sheet))
    }
}

/// State of a single evaluation.
struct Run<'a> {
    model: &'a KripkeModel,
    config: &'a EvalConfig,
    sheet: Worksheet,
    /// Columns of unbound variables assumed false, one per name.
    assumed: HashMap<String, Col>,
}

impl Run<'_> {
    fn resolve(&mut self, name: &str) -> Result<Col, UnboundVariableError> {
        if let Some(i) = self.model.vars().position(name) {
            return Ok(Col(i));
        }
        match self.config.unbound {
            UnboundPolicy::Reject => Err(UnboundVariableError {
                name: name.to_string(),
            }),
            UnboundPolicy::AssumeFalse => {
                if let Some(&col) = self.assumed.get(name) {
                    return Ok(col);
                }
                debug!("assuming unbound variable {} is false everywhere", name);
                let col = self.sheet.push(name, Array1::zeros(self.sheet.num_rows()));
                self.assumed.insert(name.to_string(), col);
                Ok(col)
            }
        }
    }

    fn eval(&mut self, formula: &Formula) -> Result<Col, UnboundVariableError> {
        let model = self.model;
        let (label, values) = match formula {
            Formula::Var(name) => return self.resolve(name),
            Formula::Not(a) => {
                let a = self.eval(a)?;
                (format!("not({})", a), model.not(self.sheet.column(a)))
            }
            Formula::Square(a) => {
                let a = self.eval(a)?;
                (format!("square({})", a), model.square(self.sheet.column(a)))
            }
            Formula::Diamond(a) => {
                let a = self.eval(a)?;
                (format!("diamond({})", a), model.diamond(self.sheet.column(a)))
            }
            Formula::And(a, b) => {
                let (a, b) = (self.eval(a)?, self.eval(b)?);
                let values = model.and(self.sheet.column(a), self.sheet.column(b));
                (format!("and({}, {})", a, b), values)
            }
            Formula::Or(a, b) => {
                let (a, b) = (self.eval(a)?, self.eval(b)?);
                let values = model.or(self.sheet.column(a), self.sheet.column(b));
                (format!("or({}, {})", a, b), values)
            }
            Formula::Implies(a, b) => {
                let (a, b) = (self.eval(a)?, self.eval(b)?);
                let values = model.implies(self.sheet.column(a), self.sheet.column(b));
                (format!("implies({}, {})", a, b), values)
            }
        };
        let col = self.sheet.push(label, values);
        debug!("{} = {}", col, self.sheet.label(col));
        Ok(col)
    }
}

/// Evaluates `formula` in every world of `model` with the default configuration.
pub fn evaluate(formula: &Formula, model: &KripkeModel) -> Result<Array1<Truth>, Error> {
    Ok(Evaluator::new(model).evaluate(formula)?)
}
