#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;

use crate::backend::ArcBackend;
use eyre::{Result, bail};
use std::collections::HashMap;

/// Holds the configured backend connections, keyed by alias.
#[derive(Default)]
pub struct Manager {
    connections: HashMap<String, ArcBackend>,
}

impl Manager {
    pub fn add_connection(&mut self, connection: ArcBackend) -> Result<()> {
        let alias = connection.name().to_string();

        if self.connections.contains_key(&alias) {
            bail!(format!("connection {} already exists", alias))
        }

        self.connections.insert(alias, connection);
        Ok(())
    }

    pub fn get_connection(&self, alias: &str) -> Option<ArcBackend> {
        self.connections.get(alias).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }
}
