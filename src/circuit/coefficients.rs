//! Coefficient Table
//!
//! Gates never store field elements directly. Each coefficient is interned
//! once and referenced by a dense id, so the powers of two of a 256-bit
//! decomposition or the `-1` of every subtraction cost one table entry each.

use crate::field::Fr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Index into the [`CoefficientTable`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoeffId(pub usize);

impl fmt::Display for CoeffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Append-only interning table: the same value always maps to the same id.
#[derive(Clone, Debug, Default)]
pub struct CoefficientTable {
    ids: HashMap<Fr, CoeffId>,
    values: Vec<Fr>,
}

impl CoefficientTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `value`, interning it on first use.
    pub fn get_id(&mut self, value: Fr) -> CoeffId {
        if let Some(&id) = self.ids.get(&value) {
            return id;
        }
        let id = CoeffId(self.values.len());
        self.values.push(value);
        self.ids.insert(value, id);
        id
    }

    /// Id of `value` if it has already been interned.
    pub fn find(&self, value: &Fr) -> Option<CoeffId> {
        self.ids.get(value).copied()
    }

    /// Value interned under `id`, if any.
    pub fn value(&self, id: CoeffId) -> Option<Fr> {
        self.values.get(id.0).copied()
    }

    /// Number of distinct coefficients.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// No coefficient interned yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in id order.
    pub fn iter(&self) -> impl Iterator<Item = (CoeffId, Fr)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (CoeffId(i), *v))
    }

    /// All values, indexed by id.
    pub fn values(&self) -> &[Fr] {
        &self.values
    }
}

impl PartialEq for CoefficientTable {
    fn eq(&self, other: &Self) -> bool {
        // the map is derived from the ordered values
        self.values == other.values
    }
}

impl Eq for CoefficientTable {}

// Only the ordered values are serialized; the lookup map is rebuilt on load.
impl Serialize for CoefficientTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CoefficientTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<Fr>::deserialize(deserializer)?;
        let mut ids = HashMap::with_capacity(values.len());
        for (i, v) in values.iter().enumerate() {
            if ids.insert(*v, CoeffId(i)).is_some() {
                return Err(serde::de::Error::custom("duplicate coefficient in table"));
            }
        }
        Ok(CoefficientTable { ids, values })
    }
}
