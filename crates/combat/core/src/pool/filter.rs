//! Pool filters and catalogs.

use std::collections::BTreeMap;

use crate::error::PoolError;

use super::context::PoolContext;
use super::select::total_weight;

/// Identity with a relative selection weight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEntry<T> {
    pub id: T,
    pub weight: u32,
}

impl<T> WeightedEntry<T> {
    pub fn new(id: impl Into<T>, weight: u32) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// Eligibility predicate of a filter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterKind {
    /// Matches every context.
    Universal,
    /// Matches when the context attribute `key` equals `value`.
    AttributeMatch { key: String, value: String },
}

impl FilterKind {
    pub fn matches(&self, ctx: &PoolContext) -> bool {
        match self {
            FilterKind::Universal => true,
            FilterKind::AttributeMatch { key, value } => {
                ctx.attribute(key).is_some_and(|actual| actual == value.as_str())
            }
        }
    }
}

/// A predicate plus the weighted entries it contributes when it matches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolFilter<T> {
    pub kind: FilterKind,
    pub entries: Vec<WeightedEntry<T>>,
}

impl<T> PoolFilter<T> {
    pub fn universal(entries: Vec<WeightedEntry<T>>) -> Self {
        Self {
            kind: FilterKind::Universal,
            entries,
        }
    }

    pub fn attribute(
        key: impl Into<String>,
        value: impl Into<String>,
        entries: Vec<WeightedEntry<T>>,
    ) -> Self {
        Self {
            kind: FilterKind::AttributeMatch {
                key: key.into(),
                value: value.into(),
            },
            entries,
        }
    }

    pub fn matches(&self, ctx: &PoolContext) -> bool {
        self.kind.matches(ctx)
    }
}

/// Candidates selected for a context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution<T> {
    /// Merged candidates ordered by identity.
    pub candidates: Vec<(T, u64)>,
    /// True when the matched filters were empty and the default pool was used.
    pub used_fallback: bool,
}

/// All filters for one kind of pool, plus an optional universal default.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolCatalog<T> {
    pub filters: Vec<PoolFilter<T>>,
    /// Used when no matching filter yields positive weight.
    #[cfg_attr(feature = "serde", serde(default = "Vec::new"))]
    pub fallback: Vec<WeightedEntry<T>>,
}

impl<T> Default for PoolCatalog<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            fallback: Vec::new(),
        }
    }
}

impl<T: Ord + Clone> PoolCatalog<T> {
    pub fn new(filters: Vec<PoolFilter<T>>) -> Self {
        Self {
            filters,
            fallback: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: Vec<WeightedEntry<T>>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Union of every matching filter's entries, weights summed per identity.
    pub fn resolve_candidates(&self, ctx: &PoolContext) -> Vec<(T, u64)> {
        merge(
            self.filters
                .iter()
                .filter(|filter| filter.matches(ctx))
                .flat_map(|filter| filter.entries.iter()),
        )
    }

    /// Matching candidates, or the default pool when they carry no weight.
    pub fn candidates_or_fallback(&self, ctx: &PoolContext) -> Result<Resolution<T>, PoolError> {
        self.resolve_with(ctx, |candidates| candidates)
    }

    /// Like [`Self::candidates_or_fallback`], with `reweigh` applied to both
    /// the matched and the default candidates before checking for weight.
    pub(crate) fn resolve_with(
        &self,
        ctx: &PoolContext,
        reweigh: impl Fn(Vec<(T, u64)>) -> Vec<(T, u64)>,
    ) -> Result<Resolution<T>, PoolError> {
        let candidates = reweigh(self.resolve_candidates(ctx));
        if total_weight(&candidates) > 0 {
            return Ok(Resolution {
                candidates,
                used_fallback: false,
            });
        }

        let fallback = reweigh(merge(self.fallback.iter()));
        if total_weight(&fallback) > 0 {
            return Ok(Resolution {
                candidates: fallback,
                used_fallback: true,
            });
        }

        Err(PoolError::Empty)
    }
}

fn merge<'a, T: Ord + Clone + 'a>(
    entries: impl Iterator<Item = &'a WeightedEntry<T>>,
) -> Vec<(T, u64)> {
    let mut totals: BTreeMap<T, u64> = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.id.clone()).or_default() += u64::from(entry.weight);
    }
    totals.into_iter().collect()
}
