//! Command parameters.
//!
//! - [`MockDbParameter`]: field-backed parameter, no binding semantics
//! - [`MockDbParameterCollection`]: ordered, name-addressable parameter list

mod collection;

pub use collection::MockDbParameterCollection;

use crate::provider::{DataRowVersion, DbType, DbValue, ParameterDirection};

/// Parameter attached to a command.
///
/// Every property is a stored field; nothing is validated or bound.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MockDbParameter {
    name: String,
    value: DbValue,
    db_type: DbType,
    direction: ParameterDirection,
    is_nullable: bool,
    size: usize,
    source_column: String,
    source_column_null_mapping: bool,
    source_version: DataRowVersion,
}

impl MockDbParameter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<DbValue>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub const fn with_db_type(mut self, db_type: DbType) -> Self {
        self.db_type = db_type;
        self
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub const fn value(&self) -> &DbValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<DbValue>) {
        self.value = value.into();
    }

    #[must_use]
    pub const fn db_type(&self) -> DbType {
        self.db_type
    }

    pub const fn set_db_type(&mut self, db_type: DbType) {
        self.db_type = db_type;
    }

    /// Restores the declared type to its default.
    pub fn reset_db_type(&mut self) {
        self.db_type = DbType::default();
    }

    #[must_use]
    pub const fn direction(&self) -> ParameterDirection {
        self.direction
    }

    pub const fn set_direction(&mut self, direction: ParameterDirection) {
        self.direction = direction;
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    pub const fn set_nullable(&mut self, nullable: bool) {
        self.is_nullable = nullable;
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    #[must_use]
    pub fn source_column(&self) -> &str {
        &self.source_column
    }

    pub fn set_source_column(&mut self, column: impl Into<String>) {
        self.source_column = column.into();
    }

    #[must_use]
    pub const fn source_column_null_mapping(&self) -> bool {
        self.source_column_null_mapping
    }

    pub const fn set_source_column_null_mapping(&mut self, mapping: bool) {
        self.source_column_null_mapping = mapping;
    }

    #[must_use]
    pub const fn source_version(&self) -> DataRowVersion {
        self.source_version
    }

    pub const fn set_source_version(&mut self, version: DataRowVersion) {
        self.source_version = version;
    }
}
