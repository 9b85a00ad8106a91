//! Element compositions produced by formula parsing.
//!
//! A [`Composition`] maps element symbols to their total atom counts. It is the
//! only externally visible result of parsing a formula such as `K3(Al(OH)6)`.
//!
//! All arithmetic is checked: adding or scaling counts past [`u64::MAX`] returns
//! a [`CompositionError`] instead of wrapping.
//!
//! # Example
//!
//! ```
//! # use molar_core::composition::Composition;
//! let mut water = Composition::new();
//! water.add("H", 2).unwrap();
//! water.add("O", 1).unwrap();
//!
//! assert_eq!(water.get("H"), Some(2));
//! assert_eq!(water.total_atoms(), Some(3));
//! ```

use indexmap::IndexMap;
use thiserror::Error;

/// Errors raised by composition arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("atom count for `{symbol}` overflows ({current} + {added})")]
    Overflow {
        symbol: String,
        current: u64,
        added: u64,
    },

    #[error("atom count for `{symbol}` overflows when scaled ({count} x {factor})")]
    ScaleOverflow {
        symbol: String,
        count: u64,
        factor: u64,
    },
}

/// Mapping from element symbol to total atom count.
///
/// Iteration follows the order in which symbols were first added. Equality
/// ignores that order: two compositions are equal when they hold the same
/// symbols with the same counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    counts: IndexMap<String, u64>,
}

impl Composition {
    /// Create an empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no symbol has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total count for `symbol`, or `None` if it never appeared.
    pub fn get(&self, symbol: &str) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Returns `true` if `symbol` appeared in the formula.
    ///
    /// A symbol whose contributions were all scaled by zero is still present.
    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.contains_key(symbol)
    }

    /// Iterate over `(symbol, count)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts
            .iter()
            .map(|(symbol, count)| (symbol.as_str(), *count))
    }

    /// Iterate over the symbols in first-appearance order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Add `count` atoms of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::Overflow`] if the running total for
    /// `symbol` would exceed [`u64::MAX`]. The composition is left unchanged.
    pub fn add(&mut self, symbol: &str, count: u64) -> Result<(), CompositionError> {
        match self.counts.get_mut(symbol) {
            Some(current) => {
                *current = current
                    .checked_add(count)
                    .ok_or_else(|| CompositionError::Overflow {
                        symbol: symbol.to_string(),
                        current: *current,
                        added: count,
                    })?;
            }
            None => {
                self.counts.insert(symbol.to_string(), count);
            }
        }
        Ok(())
    }

    /// Add every entry of `other` to this composition.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::Overflow`] on the first symbol whose total
    /// overflows. Entries merged before the failing one stay merged.
    pub fn merge(&mut self, other: &Composition) -> Result<(), CompositionError> {
        other
            .iter()
            .try_for_each(|(symbol, count)| self.add(symbol, count))
    }

    /// Return a copy with every count multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::ScaleOverflow`] if any scaled count
    /// exceeds [`u64::MAX`].
    pub fn scaled(&self, factor: u64) -> Result<Composition, CompositionError> {
        let counts = self
            .counts
            .iter()
            .map(|(symbol, count)| {
                count
                    .checked_mul(factor)
                    .map(|scaled| (symbol.clone(), scaled))
                    .ok_or_else(|| CompositionError::ScaleOverflow {
                        symbol: symbol.clone(),
                        count: *count,
                        factor,
                    })
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        Ok(Self { counts })
    }

    /// Sum of all counts, or `None` if the sum overflows.
    pub fn total_atoms(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |total, count| total.checked_add(*count))
    }
}

impl<'a> IntoIterator for &'a Composition {
    type Item = (&'a str, u64);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, u64)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
