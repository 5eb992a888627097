//! Catalog

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// School identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(pub u64);

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repair item identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A school that repair items are priced for.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct School {
    /// School identifier
    pub id: SchoolId,

    /// Display name
    pub name: String,
}

/// A repair item as priced in one school's catalog.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CatalogItem {
    id: ItemId,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    unit: String,
}

impl CatalogItem {
    /// Creates a new catalog item
    pub fn new(id: ItemId, name: impl Into<String>, price: Decimal, unit: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            unit: unit.into(),
        }
    }

    /// Returns the item identifier
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price in major units
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the unit the item is priced per (e.g. `m`, `pc`)
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// The items currently priced for a single school.
#[derive(Clone, Debug)]
pub struct SchoolCatalog {
    school: SchoolId,
    items: Vec<CatalogItem>,
    index: FxHashMap<ItemId, usize>,
}

impl SchoolCatalog {
    /// Creates a catalog for `school` from the given items.
    ///
    /// If an id appears more than once, lookups resolve to its first occurrence.
    pub fn new(school: SchoolId, items: impl Into<Vec<CatalogItem>>) -> Self {
        let items = items.into();

        let mut index = FxHashMap::default();

        for (i, item) in items.iter().enumerate() {
            index.entry(item.id()).or_insert(i);
        }

        Self {
            school,
            items,
            index,
        }
    }

    /// Returns the school this catalog belongs to
    pub fn school(&self) -> SchoolId {
        self.school
    }

    /// Returns the items in the order the catalog listed them
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Looks up an item by id
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.index.get(&id).and_then(|&i| self.items.get(i))
    }

    /// Number of items in the catalog
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
