use std::{collections::BTreeMap, fmt::Debug};

use derive_more::{AsRef, Display};
use serde::Serialize;

use crate::{ClassID, EquipmentID, MuscleGroupID};

/// Display name of a catalog entry (muscle group, equipment, class).
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// Mapping from catalog ids to display names, supplied by the caller.
///
/// Resolving an unknown id is not an error, it just yields no name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<ID: Ord> {
    names: BTreeMap<ID, Name>,
}

impl<ID: Ord + Copy + Debug> Lookup<ID> {
    /// Build a lookup from `(id, name)` rows as returned by the catalog tables.
    ///
    /// Later rows win if an id occurs more than once.
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = (ID, &'a str)>,
    ) -> Result<Self, NameError> {
        rows.into_iter()
            .map(|(id, name)| Ok((id, Name::new(name)?)))
            .collect()
    }

    #[must_use]
    pub fn name(&self, id: ID) -> Option<&Name> {
        let name = self.names.get(&id);
        if name.is_none() {
            log::trace!("no name for {id:?} in lookup of {} entries", self.names.len());
        }
        name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<ID: Ord> Default for Lookup<ID> {
    fn default() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }
}

impl<ID: Ord> FromIterator<(ID, Name)> for Lookup<ID> {
    fn from_iter<T: IntoIterator<Item = (ID, Name)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// All id→name mappings needed to shape a user's workout and class rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookups {
    pub muscle_groups: Lookup<MuscleGroupID>,
    pub equipment: Lookup<EquipmentID>,
    pub classes: Lookup<ClassID>,
}
