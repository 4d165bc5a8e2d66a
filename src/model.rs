//! Kripke structures as a pair of 0/1 matrices.
//!
//! A [`KripkeModel`] holds
//!
//! - the **valuation** matrix `M` of shape `worlds x variables`, where
//!   `M[w][v] = 1` iff variable `v` is true in world `w`, and
//! - the **access** matrix `A` of shape `worlds x worlds`, where `A[i][j] = 1`
//!   iff world `i` sees world `j`. No frame conditions are imposed: `A` need not
//!   be reflexive, symmetric or transitive.
//!
//! The boolean and modal connectives are exposed as primitives over *columns*:
//! vectors holding one truth value per world. The modal ones are a single
//! matrix-vector product `A · p` compared against the out-degree of each world
//! (the row sums of `A`): equal means "true in every accessible world", positive
//! means "true in some accessible world".
//!
//! # Examples
//!
//! ```
//! use kripke_rs::model::KripkeModel;
//!
//! let model = KripkeModel::builder()
//!     .world("w0", [("P", true)])
//!     .world("w1", [("P", false)])
//!     .access("w0", ["w0", "w1"])
//!     .access("w1", ["w0"])
//!     .build()
//!     .unwrap();
//!
//! let p = model.column("P").unwrap();
//! assert_eq!(model.square(p).to_vec(), vec![0, 1]);
//! assert_eq!(model.diamond(p).to_vec(), vec![1, 1]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

use crate::error::ModelError;
use crate::index::Index;

/// A truth value stored in a matrix: `0` or `1`.
pub type Truth = u8;

#[derive(Debug, Clone)]
pub struct KripkeModel {
    worlds: Index,
    vars: Index,
    valuation: Array2<Truth>,
    access: Array2<Truth>,
    /// `access` widened so that products count accessible worlds without overflow.
    reach: Array2<u32>,
    out_degree: Array1<u32>,
}

impl KripkeModel {
    /// Creates a model from names and matrices.
    ///
    /// Rows of both matrices follow the order of `worlds`, columns of `valuation`
    /// follow the order of `vars`. Use [`builder`][Self::builder] to get the
    /// canonical lexicographic ordering.
    pub fn new<W, V>(
        worlds: impl IntoIterator<Item = W>,
        vars: impl IntoIterator<Item = V>,
        valuation: Array2<Truth>,
        access: Array2<Truth>,
    ) -> Result<Self, ModelError>
    where
        W: Into<String>,
        V: Into<String>,
    {
        let worlds = Index::new("world", worlds)?;
        let vars = Index::new("variable", vars)?;

        let expected = (worlds.len(), vars.len());
        if valuation.dim() != expected {
            return Err(ModelError::ValuationShape {
                expected,
                actual: valuation.dim(),
            });
        }
        let expected = (worlds.len(), worlds.len());
        if access.dim() != expected {
            return Err(ModelError::AccessShape {
                expected,
                actual: access.dim(),
            });
        }
        check_boolean("valuation", valuation.view())?;
        check_boolean("access", access.view())?;

        let reach = access.mapv(u32::from);
        let out_degree = reach.sum_axis(Axis(1));

        Ok(Self {
            worlds,
            vars,
            valuation,
            access,
            reach,
            out_degree,
        })
    }

    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    pub fn num_worlds(&self) -> usize {
        self.worlds.len()
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn world_names(&self) -> &[String] {
        self.worlds.names()
    }

    pub fn var_names(&self) -> &[String] {
        self.vars.names()
    }

    pub fn worlds(&self) -> &Index {
        &self.worlds
    }

    pub fn vars(&self) -> &Index {
        &self.vars
    }

    pub fn valuation(&self) -> ArrayView2<'_, Truth> {
        self.valuation.view()
    }

    pub fn access(&self) -> ArrayView2<'_, Truth> {
        self.access.view()
    }

    /// Number of worlds each world sees (row sums of the access matrix).
    pub fn out_degree(&self) -> ArrayView1<'_, u32> {
        self.out_degree.view()
    }

    /// The valuation column of variable `name`.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, Truth>> {
        self.vars.position(name).map(|i| self.valuation.column(i))
    }

    /// Returns true if world `from` sees world `to`.
    pub fn sees(&self, from: usize, to: usize) -> bool {
        self.access[[from, to]] == 1
    }

    /// Indices of the worlds seen by world `from`.
    pub fn successors(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.access
            .row(from)
            .into_iter()
            .enumerate()
            .filter(|&(_, &a)| a == 1)
            .map(|(j, _)| j)
    }

    /// For each world and variable, the number of accessible worlds where the
    /// variable holds: the product `A · M`.
    pub fn knowledge(&self) -> Array2<u32> {
        self.reach.dot(&self.valuation.mapv(u32::from))
    }

    /// Number of accessible worlds in which `p` holds, per world: `A · p`.
    fn seen(&self, p: ArrayView1<'_, Truth>) -> Array1<u32> {
        debug_assert_eq!(p.len(), self.num_worlds());
        self.reach.dot(&p.mapv(u32::from))
    }

    /// Elementwise product.
    pub fn and(&self, a: ArrayView1<'_, Truth>, b: ArrayView1<'_, Truth>) -> Array1<Truth> {
        Zip::from(&a).and(&b).map_collect(|&x, &y| x * y)
    }

    /// Elementwise maximum.
    pub fn or(&self, a: ArrayView1<'_, Truth>, b: ArrayView1<'_, Truth>) -> Array1<Truth> {
        Zip::from(&a).and(&b).map_collect(|&x, &y| x.max(y))
    }

    /// Elementwise complement.
    pub fn not(&self, a: ArrayView1<'_, Truth>) -> Array1<Truth> {
        a.mapv(|x| Truth::from(x == 0))
    }

    /// Necessity: `□p` holds in `w` iff `p` holds in every world `w` sees.
    ///
    /// Vacuously true in worlds that see nothing.
    pub fn square(&self, p: ArrayView1<'_, Truth>) -> Array1<Truth> {
        let seen = self.seen(p);
        Zip::from(&seen)
            .and(&self.out_degree)
            .map_collect(|&s, &d| Truth::from(d == 0 || s == d))
    }

    /// Possibility: `◇p` holds in `w` iff `p` holds in some world `w` sees.
    ///
    /// Vacuously false in worlds that see nothing.
    pub fn diamond(&self, p: ArrayView1<'_, Truth>) -> Array1<Truth> {
        let seen = self.seen(p);
        Zip::from(&seen)
            .and(&self.out_degree)
            .map_collect(|&s, &d| Truth::from(d > 0 && s > 0))
    }

    /// Modal implication: `!a || b` must hold in every world `w` sees.
    ///
    /// This is *not* classical material implication evaluated in `w` itself: the
    /// per-world value of `!a || b` is aggregated through the access relation
    /// exactly like [`square`][Self::square], so it is vacuously true in worlds
    /// that see nothing.
    pub fn implies(&self, a: ArrayView1<'_, Truth>, b: ArrayView1<'_, Truth>) -> Array1<Truth> {
        let material = self.or(self.not(a).view(), b);
        self.square(material.view())
    }
}

fn check_boolean(matrix: &'static str, m: ArrayView2<'_, Truth>) -> Result<(), ModelError> {
    match m.indexed_iter().find(|&(_, &v)| v > 1) {
        Some(((row, col), &value)) => Err(ModelError::NotBoolean {
            matrix,
            row,
            col,
            value,
        }),
        None => Ok(()),
    }
}

/// Name-based construction of a [`KripkeModel`].
///
/// Worlds and variables are assigned matrix positions in lexicographic order of
/// their names. Variables not assigned in a world are false there; worlds
/// without [`access`][Self::access] entries see nothing.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    worlds: BTreeMap<String, BTreeMap<String, bool>>,
    declared: BTreeSet<String>,
    access: BTreeMap<String, BTreeSet<String>>,
}

impl ModelBuilder {
    /// Adds a world with the given assignments.
    ///
    /// Repeating a world merges the assignments, later values win.
    pub fn world<W, V, I>(mut self, name: W, assignments: I) -> Self
    where
        W: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (V, bool)>,
    {
        let entry = self.worlds.entry(name.into()).or_default();
        for (var, value) in assignments {
            entry.insert(var.into(), value);
        }
        self
    }

    /// Declares a variable without making it true anywhere.
    pub fn var(mut self, name: impl Into<String>) -> Self {
        self.declared.insert(name.into());
        self
    }

    /// Adds edges from `from` to every world in `targets`.
    pub fn access<W, T, I>(mut self, from: W, targets: I) -> Self
    where
        W: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = T>,
    {
        let entry = self.access.entry(from.into()).or_default();
        entry.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<KripkeModel, ModelError> {
        let world_names: Vec<&String> = self.worlds.keys().collect();
        let var_names: BTreeSet<&String> = self
            .worlds
            .values()
            .flat_map(|m| m.keys())
            .chain(&self.declared)
            .collect();
        let var_names: Vec<&String> = var_names.into_iter().collect();

        let valuation = Array2::from_shape_fn((world_names.len(), var_names.len()), |(i, j)| {
            let value = self.worlds[world_names[i]].get(var_names[j]).copied().unwrap_or(false);
            Truth::from(value)
        });

        let worlds = Index::new("world", world_names.iter().map(|s| s.as_str()))?;
        let mut access = Array2::zeros((worlds.len(), worlds.len()));
        for (from, targets) in &self.access {
            let i = worlds
                .position(from)
                .ok_or_else(|| ModelError::UnknownWorld(from.clone()))?;
            for to in targets {
                let j = worlds
                    .position(to)
                    .ok_or_else(|| ModelError::UnknownWorld(to.clone()))?;
                access[[i, j]] = 1;
            }
        }

        KripkeModel::new(world_names, var_names, valuation, access)
    }
}
