use std::collections::{BTreeMap, HashMap};

use super::GeometryError;

/// Stable mapping from detector names to run-unique integer identifiers.
///
/// Built once when a run is initialized and never modified afterwards.
/// Iteration is always in ascending ID order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorIdRegistry {
    ids: HashMap<String, u32>,
    names: BTreeMap<u32, String>,
}

impl DetectorIdRegistry {
    /// Assign IDs `0..N` in the order the names are given
    pub fn sequential<I, S>(names: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for (id, name) in (0u32..).zip(names) {
            registry.insert(name.into(), id)?;
        }
        Ok(registry)
    }

    /// Use explicitly assigned IDs
    pub fn with_assignments<I, S>(assignments: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for (name, id) in assignments {
            registry.insert(name.into(), id)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, name: String, id: u32) -> Result<(), GeometryError> {
        if self.ids.contains_key(&name) {
            return Err(GeometryError::DuplicateDetector(name));
        }
        if let Some(first) = self.names.get(&id) {
            return Err(GeometryError::DuplicateId {
                id,
                first: first.clone(),
                second: name,
            });
        }
        self.ids.insert(name.clone(), id);
        self.names.insert(id, name);
        Ok(())
    }

    /// ID of a detector, if registered
    pub fn get(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// ID of a detector, failing for unregistered names
    pub fn id(&self, name: &str) -> Result<u32, GeometryError> {
        self.get(name)
            .ok_or_else(|| GeometryError::UnknownDetector(name.to_string()))
    }

    /// Number of registered detectors
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no detector is registered
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `(id, name)` pairs in ascending ID order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}
