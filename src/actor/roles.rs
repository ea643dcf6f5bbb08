//! Names known to denote non-person actors.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

use super::types::NameType;
use crate::util::{parse_two_column_table, read_two_column_table};

const BUNDLED_ROLE_NAMES: &str = include_str!("../../data/role_names.csv");

/// Lookup from lowercase name to the role it denotes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable {
    roles: HashMap<String, NameType>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role names shipped with the crate
    pub fn bundled() -> Self {
        let mut table = Self::new();
        table.add_role_names(parse_two_column_table(BUNDLED_ROLE_NAMES));
        table
    }

    /// Load a `name,role` table; the header row is skipped
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut table = Self::new();
        table.add_role_names(read_two_column_table(path)?);
        Ok(table)
    }

    /// Add `(name, role_label)` pairs; later pairs override earlier ones
    pub fn add_role_names<I, N, R>(&mut self, name_roles: I)
    where
        I: IntoIterator<Item = (N, R)>,
        N: AsRef<str>,
        R: AsRef<str>,
    {
        for (name, role) in name_roles {
            let role = role.as_ref().trim();
            let name_type = if role.is_empty() {
                NameType::Role("role".to_string())
            } else {
                NameType::from(role)
            };
            self.roles.insert(name.as_ref().trim().to_lowercase(), name_type);
        }
    }

    pub fn get(&self, lower_name: &str) -> Option<&NameType> {
        self.roles.get(lower_name)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
