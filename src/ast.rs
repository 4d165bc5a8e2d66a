//! Abstract syntax tree of modal formulas.

use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Write;

/// A modal formula.
///
/// The set of node kinds is closed: every consumer matches on all seven variants,
/// so adding an operator is a compile error until each of them handles it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// Propositional variable.
    Var(String),
    /// Negation: `!φ`
    Not(Box<Formula>),
    /// Conjunction: `φ && ψ`
    And(Box<Formula>, Box<Formula>),
    /// Disjunction: `φ || ψ`
    Or(Box<Formula>, Box<Formula>),
    /// Modal implication: `φ -> ψ`
    ///
    /// Unlike classical material implication, `!φ || ψ` is required to hold in
    /// *every accessible world*, see [`KripkeModel::implies`][crate::model::KripkeModel::implies].
    Implies(Box<Formula>, Box<Formula>),
    /// Necessity: `#φ` (□φ)
    Square(Box<Formula>),
    /// Possibility: `@φ` (◇φ)
    Diamond(Box<Formula>),
}

impl Formula {
    pub fn var(name: impl Into<String>) -> Self {
        Formula::Var(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Formula::Not(Box::new(self))
    }

    pub fn and(self, other: Self) -> Self {
        Formula::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Self) -> Self {
        Formula::Or(Box::new(self), Box::new(other))
    }

    pub fn implies(self, other: Self) -> Self {
        Formula::Implies(Box::new(self), Box::new(other))
    }

    pub fn square(self) -> Self {
        Formula::Square(Box::new(self))
    }

    pub fn diamond(self) -> Self {
        Formula::Diamond(Box::new(self))
    }

    /// Returns true for the three binary connectives.
    pub fn is_binary(&self) -> bool {
        matches!(self, Formula::And(..) | Formula::Or(..) | Formula::Implies(..))
    }

    /// Name of the node kind, as shown by [`to_tree_string`][Self::to_tree_string].
    pub fn kind(&self) -> &'static str {
        match self {
            Formula::Var(_) => "Var",
            Formula::Not(_) => "Not",
            Formula::And(..) => "And",
            Formula::Or(..) => "Or",
            Formula::Implies(..) => "Implies",
            Formula::Square(_) => "Square",
            Formula::Diamond(_) => "Diamond",
        }
    }

    /// Direct subformulas, left to right.
    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Formula::Var(_) => vec![],
            Formula::Not(a) | Formula::Square(a) | Formula::Diamond(a) => vec![a],
            Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => vec![a, b],
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Formula::size).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        1 + self.children().into_iter().map(Formula::depth).max().unwrap_or(0)
    }

    /// Names of all variables referenced by the formula, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut vars = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(formula) = stack.pop() {
            match formula {
                Formula::Var(name) => {
                    vars.insert(name.as_str());
                }
                _ => stack.extend(formula.children()),
            }
        }
        vars
    }

    /// Renders the formula as an indented tree, one node per line.
    ///
    /// ```
    /// use kripke_rs::ast::Formula;
    ///
    /// let f = Formula::var("P").diamond().not();
    /// assert_eq!(f.to_tree_string(), "Not\n  Diamond\n    Var(P)\n");
    /// ```
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0).expect("writing to a String never fails");
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Formula::Var(name) => writeln!(out, "{}Var({})", prefix, name),
            _ => {
                writeln!(out, "{}{}", prefix, self.kind())?;
                for child in self.children() {
                    child.write_tree(out, indent + 1)?;
                }
                Ok(())
            }
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_binary() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Infix rendering with the input syntax; parsing it back yields the same tree.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Var(name) => write!(f, "{}", name),
            Formula::Not(a) | Formula::Square(a) | Formula::Diamond(a) => {
                let op = match self {
                    Formula::Not(_) => "!",
                    Formula::Square(_) => "#",
                    _ => "@",
                };
                write!(f, "{}", op)?;
                a.fmt_operand(f)
            }
            Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => {
                let op = match self {
                    Formula::And(..) => "&&",
                    Formula::Or(..) => "||",
                    _ => "->",
                };
                a.fmt_operand(f)?;
                write!(f, " {} ", op)?;
                b.fmt_operand(f)
            }
        }
    }
}
