//! Ordered parameter collection.
//!
//! Name lookups compare ASCII case-insensitively, as most drivers do.

use super::MockDbParameter;
use crate::error::{MockDbError, Result};

/// Parameters of one command, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockDbParameterCollection {
    items: Vec<MockDbParameter>,
}

impl MockDbParameterCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a parameter and returns its index.
    pub fn add(&mut self, parameter: MockDbParameter) -> usize {
        self.items.push(parameter);
        self.items.len() - 1
    }

    pub fn add_range(&mut self, parameters: impl IntoIterator<Item = MockDbParameter>) {
        self.items.extend(parameters);
    }

    /// Inserts at `index`, clamped to the end of the collection.
    pub fn insert(&mut self, index: usize, parameter: MockDbParameter) {
        let index = index.min(self.items.len());
        self.items.insert(index, parameter);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MockDbParameter> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MockDbParameter> {
        self.items.get_mut(index)
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&MockDbParameter> {
        self.index_of_name(name).map(|i| &self.items[i])
    }

    #[must_use]
    pub fn index_of(&self, parameter: &MockDbParameter) -> Option<usize> {
        self.items.iter().position(|p| p == parameter)
    }

    #[must_use]
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn contains(&self, parameter: &MockDbParameter) -> bool {
        self.index_of(parameter).is_some()
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.index_of_name(name).is_some()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<MockDbParameter> {
        if index >= self.items.len() {
            return Err(MockDbError::parameter_not_found(format!("index {index}")));
        }
        Ok(self.items.remove(index))
    }

    pub fn remove_by_name(&mut self, name: &str) -> Result<MockDbParameter> {
        let index = self
            .index_of_name(name)
            .ok_or_else(|| MockDbError::parameter_not_found(name))?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MockDbParameter> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a MockDbParameterCollection {
    type Item = &'a MockDbParameter;
    type IntoIter = std::slice::Iter<'a, MockDbParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Extend<MockDbParameter> for MockDbParameterCollection {
    fn extend<I: IntoIterator<Item = MockDbParameter>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
