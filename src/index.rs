//! Immutable name tables for worlds and variables.

use std::collections::HashMap;

use crate::error::ModelError;

/// Maps names to their matrix positions and back.
///
/// Built once together with the model and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Index {
    /// Creates an index whose positions follow the order of `names`.
    ///
    /// `kind` names what is being indexed ("world", "variable") in the error
    /// returned for a duplicate name.
    pub fn new<I, S>(kind: &'static str, names: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), i).is_some() {
                return Err(ModelError::DuplicateName {
                    kind,
                    name: name.clone(),
                });
            }
        }
        Ok(Self { names, positions })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Name at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn name(&self, position: usize) -> &str {
        &self.names[position]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_positions_follow_input_order() {
        let index = Index::new("variable", ["Q", "P", "R"]).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.position("Q"), Some(0));
        assert_eq!(index.position("R"), Some(2));
        assert_eq!(index.position("S"), None);
        assert_eq!(index.name(1), "P");
        assert_eq!(index.iter().collect::<Vec<_>>(), vec!["Q", "P", "R"]);
    }

    #[test]
    fn test_duplicate_name() {
        let err = Index::new("world", ["w0", "w1", "w0"]).unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateName {
                kind: "world",
                name: "w0".to_string()
            }
        );
    }

    #[test]
    fn test_empty() {
        let index = Index::new("world", Vec::<String>::new()).unwrap();
        assert!(index.is_empty());
    }
}
