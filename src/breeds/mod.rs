//! Breed validation against an enumerated catalog of breed names

pub mod client;

pub use client::*;

use std::collections::BTreeSet;

use crate::error::Result;

/// Source of valid breed names
pub trait BreedCatalog {
    /// Whether `name` is a known breed (exact match)
    fn is_valid_breed(&self, name: &str) -> Result<bool>;

    /// All known breed names, sorted
    fn breeds(&self) -> Result<Vec<String>>;
}

impl<C: BreedCatalog + ?Sized> BreedCatalog for &C {
    fn is_valid_breed(&self, name: &str) -> Result<bool> {
        (**self).is_valid_breed(name)
    }

    fn breeds(&self) -> Result<Vec<String>> {
        (**self).breeds()
    }
}

impl<C: BreedCatalog + ?Sized> BreedCatalog for Box<C> {
    fn is_valid_breed(&self, name: &str) -> Result<bool> {
        (**self).is_valid_breed(name)
    }

    fn breeds(&self) -> Result<Vec<String>> {
        (**self).breeds()
    }
}

/// Fixed breed list for offline use and tests
#[derive(Debug, Clone, Default)]
pub struct StaticBreeds {
    names: BTreeSet<String>,
}

impl StaticBreeds {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl BreedCatalog for StaticBreeds {
    fn is_valid_breed(&self, name: &str) -> Result<bool> {
        Ok(self.names.contains(name))
    }

    fn breeds(&self) -> Result<Vec<String>> {
        Ok(self.names.iter().cloned().collect())
    }
}
