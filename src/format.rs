//! Reader for textual model descriptions.
//!
//! # Format
//!
//! ```text
//! worlds {
//!     w0: P=1, Q=0, R=1   // trailing comments are allowed
//!     w1: P=0, Q=1
//! }
//! access {
//!     w0: w0, w1
//!     w1: w1
//! }
//! expr: #(P && @Q) -> !R
//! ```
//!
//! - Inside `worlds` and `access`, blank lines and `//` comments are ignored.
//! - World names follow the identifier syntax of formulas (`[A-Za-z_][A-Za-z0-9_]*`).
//! - Assignments are `<var>=<0|1>`, separated by commas and/or whitespace.
//!   Variables not assigned in a world are false there.
//! - Every world used in `access` must be defined in `worlds`. Worlds without an
//!   `access` line see nothing; repeated lines for a world accumulate.
//! - The first `expr:` line outside the blocks is taken verbatim (no comment
//!   stripping).
//! - Worlds and variables get matrix positions in lexicographic order.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use log::{info, warn};

use crate::error::FormatError;
use crate::model::KripkeModel;

/// A parsed model description.
#[derive(Debug, Clone)]
pub struct ModelDescription {
    pub model: KripkeModel,
    /// The formula text of the `expr:` line.
    pub expr: String,
    /// 1-based line number of the `expr:` line.
    pub expr_line: usize,
}

/// A `name { ... }` block.
struct Block<'a> {
    /// Content lines, comments stripped, with 1-based line numbers.
    lines: Vec<(usize, &'a str)>,
    /// 1-based numbers of the header and closing lines.
    span: RangeInclusive<usize>,
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(i) => &line[..i],
        None => line,
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Extracts the body of the block `name { ... }`, or `None` if there is no such block.
fn extract_block<'a>(text: &'a str, name: &'static str) -> Result<Option<Block<'a>>, FormatError> {
    let mut lines = text.lines().enumerate();

    let (first, mut rest) = loop {
        let Some((i, line)) = lines.next() else {
            return Ok(None);
        };
        let header = strip_comment(line).trim_start();
        if let Some(after) = header.strip_prefix(name) {
            if let Some(body) = after.trim_start().strip_prefix('{') {
                break (i, body);
            }
        }
    };

    let mut line_no = first;
    let mut block = Vec::new();
    loop {
        let content = strip_comment(rest);
        if let Some(end) = content.find('}') {
            block.push((line_no + 1, content[..end].trim()));
            break;
        }
        block.push((line_no + 1, content.trim()));
        match lines.next() {
            Some((i, line)) => (line_no, rest) = (i, line),
            None => return Err(FormatError::UnclosedBlock { section: name }),
        }
    }
    block.retain(|(_, line)| !line.is_empty());
    Ok(Some(Block {
        lines: block,
        span: first + 1..=line_no + 1,
    }))
}

/// Finds the first `expr:` line outside of `blocks`.
fn extract_expr<'a>(text: &'a str, blocks: &[&Block<'_>]) -> Option<(usize, &'a str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(line, _)| !blocks.iter().any(|b| b.span.contains(line)))
        .find_map(|(line, text)| text.trim_start().strip_prefix("expr:").map(|e| (line, e.trim())))
}

/// Splits `<head>: <tail>`.
fn split_line(line: usize, text: &str) -> Result<(&str, &str), FormatError> {
    match text.split_once(':') {
        Some((head, tail)) if !head.trim().is_empty() => Ok((head.trim(), tail.trim())),
        _ => Err(FormatError::MalformedLine {
            text: text.to_string(),
            line,
        }),
    }
}

fn parse_assignment(line: usize, text: &str) -> Result<(&str, bool), FormatError> {
    let malformed = || FormatError::MalformedAssignment {
        text: text.to_string(),
        line,
    };
    let (var, value) = text.split_once('=').ok_or_else(malformed)?;
    let var = var.trim();
    if !is_ident(var) {
        return Err(malformed());
    }
    match value.trim() {
        "0" => Ok((var, false)),
        "1" => Ok((var, true)),
        other => Err(FormatError::InvalidTruthValue {
            value: other.to_string(),
            line,
        }),
    }
}

/// Parses a model description.
///
/// All three sections must be present; their absence is reported before any
/// section content is looked at.
pub fn parse_description(text: &str) -> Result<ModelDescription, FormatError> {
    let missing = |section| FormatError::MissingSection { section };
    let worlds_block = extract_block(text, "worlds")?.ok_or_else(|| missing("worlds"))?;
    let access_block = extract_block(text, "access")?.ok_or_else(|| missing("access"))?;
    let (expr_line, expr) = extract_expr(text, &[&worlds_block, &access_block]).ok_or_else(|| missing("expr"))?;

    let mut builder = KripkeModel::builder();
    let mut defined = BTreeSet::new();
    for (line, text) in worlds_block.lines {
        let (world, assignments) = split_line(line, text)?;
        if !is_ident(world) {
            return Err(FormatError::InvalidWorldName {
                world: world.to_string(),
                line,
            });
        }
        if !defined.insert(world) {
            return Err(FormatError::DuplicateWorld {
                world: world.to_string(),
                line,
            });
        }
        let assignments = assignments
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| parse_assignment(line, s))
            .collect::<Result<Vec<_>, _>>()?;
        builder = builder.world(world, assignments);
    }

    let mut edges: BTreeMap<&str, usize> = BTreeMap::new();
    for (line, text) in access_block.lines {
        let (from, targets) = split_line(line, text)?;
        let targets: Vec<&str> = targets.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
        for world in std::iter::once(from).chain(targets.iter().copied()) {
            if !defined.contains(world) {
                return Err(FormatError::UndefinedWorld {
                    world: world.to_string(),
                    line,
                });
            }
        }
        if let Some(previous) = edges.insert(from, line) {
            warn!(
                "line {}: access for `{}` continues the list from line {}",
                line, from, previous
            );
        }
        builder = builder.access(from, targets);
    }

    let model = builder.build()?;
    info!(
        "parsed model with {} worlds and {} variables",
        model.num_worlds(),
        model.num_vars()
    );
    Ok(ModelDescription {
        model,
        expr: expr.to_string(),
        expr_line,
    })
}
