//! Labelled tabular rendering of matrices.

use std::fmt;

use ndarray::{ArrayView1, ArrayView2};

use crate::eval::Worksheet;
use crate::model::KripkeModel;

/// Renders `matrix` as a right-aligned table with row and column labels.
///
/// ```
/// use ndarray::array;
/// use kripke_rs::display::format_table;
///
/// let table = format_table(array![[1, 0], [0, 10]].view(), &["w0", "w1"], &["P", "Q"]);
/// assert_eq!(table, "    P   Q\nw0  1   0\nw1  0  10\n");
/// ```
pub fn format_table<T, R, C>(matrix: ArrayView2<'_, T>, row_labels: &[R], col_labels: &[C]) -> String
where
    T: fmt::Display,
    R: AsRef<str>,
    C: AsRef<str>,
{
    let cells: Vec<Vec<String>> = matrix
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let label_width = row_labels.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
    let widths: Vec<usize> = col_labels
        .iter()
        .enumerate()
        .map(|(j, c)| {
            let values = cells.iter().map(|row| row[j].len()).max().unwrap_or(0);
            values.max(c.as_ref().len())
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(label_width));
    for (c, w) in col_labels.iter().zip(&widths) {
        out.push_str(&format!("  {:>w$}", c.as_ref(), w = w));
    }
    out.push('\n');
    for (label, row) in row_labels.iter().zip(&cells) {
        out.push_str(&format!("{:<w$}", label.as_ref(), w = label_width));
        for (value, w) in row.iter().zip(&widths) {
            out.push_str(&format!("  {:>w$}", value, w = w));
        }
        out.push('\n');
    }
    out
}

/// Renders a per-world result vector as `world: value` lines.
pub fn format_result<T: fmt::Display>(result: ArrayView1<'_, T>, world_names: &[String]) -> String {
    let width = world_names.iter().map(String::len).max().unwrap_or(0);
    world_names
        .iter()
        .zip(result.iter())
        .map(|(w, v)| format!("{:<width$}  {}\n", w, v, width = width))
        .collect()
}

impl KripkeModel {
    /// The valuation matrix with world and variable labels.
    pub fn valuation_table(&self) -> String {
        format_table(self.valuation(), self.world_names(), self.var_names())
    }

    /// The access matrix with world labels on both axes.
    pub fn access_table(&self) -> String {
        format_table(self.access(), self.world_names(), self.world_names())
    }

    /// The [`knowledge`][KripkeModel::knowledge] matrix with labels.
    pub fn knowledge_table(&self) -> String {
        format_table(self.knowledge().view(), self.world_names(), self.var_names())
    }
}

impl fmt::Display for KripkeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "valuation:")?;
        write!(f, "{}", self.valuation_table())?;
        writeln!(f, "access:")?;
        write!(f, "{}", self.access_table())
    }
}

impl Worksheet {
    /// All worksheet columns with world labels on the rows.
    pub fn to_table(&self, world_names: &[String]) -> String {
        format_table(self.to_matrix().view(), world_names, self.labels())
    }
}
