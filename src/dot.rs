//! Kripke model to DOT (Graphviz) conversion.
//!
//! # DOT Format
//!
//! - **Worlds** are nodes labelled with the world name and the variables true there
//! - **Access pairs** are directed edges; a world seeing itself gets a loop
//! - **Highlighted worlds** (e.g. those satisfying a formula) use a distinct fill
//!
//! # Examples
//!
//! ```
//! use kripke_rs::model::KripkeModel;
//!
//! let model = KripkeModel::builder()
//!     .world("w0", [("P", true)])
//!     .world("w1", [("P", false)])
//!     .access("w0", ["w1"])
//!     .build()
//!     .unwrap();
//!
//! let dot = model.to_dot(None).unwrap();
//! assert!(dot.contains("\"w0\" -> \"w1\";"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use ndarray::ArrayView1;

use crate::model::{KripkeModel, Truth};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// ```
/// use kripke_rs::dot::DotConfig;
///
/// let config = DotConfig {
///     rankdir: "TB",
///     ..DotConfig::default()
/// };
/// assert_eq!(config.node_shape, "circle");
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for world nodes (default: "circle")
    pub node_shape: &'static str,
    /// Graph layout direction (default: "LR")
    pub rankdir: &'static str,
    /// Fill color for highlighted worlds (default: "palegreen")
    pub highlight_color: &'static str,
    /// Whether to list true variables in node labels (default: true)
    pub show_valuation: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            rankdir: "LR",
            highlight_color: "palegreen",
            show_valuation: true,
        }
    }
}

/// Escapes `name` for use inside a double-quoted DOT string.
fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

impl KripkeModel {
    /// Converts the model to DOT format.
    ///
    /// Worlds whose entry in `highlight` is `1` are filled. Entries beyond the
    /// number of worlds are ignored.
    pub fn to_dot(&self, highlight: Option<ArrayView1<'_, Truth>>) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(highlight, &DotConfig::default())
    }

    /// Converts the model to DOT format with custom configuration.
    pub fn to_dot_with_config(
        &self,
        highlight: Option<ArrayView1<'_, Truth>>,
        config: &DotConfig,
    ) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir={};", config.rankdir)?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        for (i, world) in self.world_names().iter().enumerate() {
            let world = escape(world);
            let mut label = world.clone();
            if config.show_valuation {
                let truths: Vec<String> = self
                    .var_names()
                    .iter()
                    .zip(self.valuation().row(i))
                    .filter(|&(_, &v)| v == 1)
                    .map(|(name, _)| escape(name))
                    .collect();
                if !truths.is_empty() {
                    write!(label, "\\n{}", truths.join(", "))?;
                }
            }
            let highlighted = highlight.as_ref().and_then(|h| h.get(i)).is_some_and(|&v| v == 1);
            if highlighted {
                writeln!(
                    dot,
                    "\"{}\" [label=\"{}\", style=filled, fillcolor={}];",
                    world, label, config.highlight_color
                )?;
            } else {
                writeln!(dot, "\"{}\" [label=\"{}\"];", world, label)?;
            }
        }

        for (i, from) in self.world_names().iter().enumerate() {
            for j in self.successors(i) {
                writeln!(dot, "\"{}\" -> \"{}\";", escape(from), escape(self.worlds().name(j)))?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
