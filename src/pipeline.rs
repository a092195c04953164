// Query pipeline over ordered records
// Every operation is a pure function over immutable input. Transforms
// consume the pipeline and return the next one, so a chain reads the same
// no matter how intermediate results are named or grouped.

use rust_decimal::Decimal;

use crate::error::PipelineError;

/// An ordered chain of pure transformations over a sequence of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline<T> {
    items: Vec<T>,
}

impl<T> Pipeline<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Pipeline { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// First record matching the predicate.
    ///
    /// Strict variant: no match is an error the caller must handle. Use
    /// [`Pipeline::try_find`] when absence is an expected outcome.
    pub fn find<P>(&self, mut predicate: P) -> Result<&T, PipelineError>
    where
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .find(|item| predicate(item))
            .ok_or(PipelineError::NotFound)
    }

    /// First record matching the predicate, `None` when nothing matches.
    pub fn try_find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    // ========================================================================
    // TRANSFORMS
    // ========================================================================

    /// All records matching the predicate, order preserved.
    pub fn filter<P>(self, mut predicate: P) -> Pipeline<T>
    where
        P: FnMut(&T) -> bool,
    {
        Pipeline {
            items: self
                .items
                .into_iter()
                .filter(|item| predicate(item))
                .collect(),
        }
    }

    /// One derived value per record, order preserved, same length as input.
    pub fn map<U, F>(self, transform: F) -> Pipeline<U>
    where
        F: FnMut(T) -> U,
    {
        Pipeline {
            items: self.items.into_iter().map(transform).collect(),
        }
    }

    /// Stable sort by a derived key; equal keys keep insertion order.
    pub fn sort_by<K, F>(mut self, key: F) -> Pipeline<T>
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.items.sort_by_key(key);
        self
    }

    /// Stable sort by a derived key, largest first.
    ///
    /// Implemented as a reversed comparator over the stable sort, not a
    /// reversal of the ascending output, so equal keys still keep their
    /// insertion order.
    pub fn sort_by_descending<K, F>(mut self, mut key: F) -> Pipeline<T>
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.items.sort_by(|a, b| key(b).cmp(&key(a)));
        self
    }

    // ========================================================================
    // AGGREGATES
    // ========================================================================

    /// Numeric fold over a selector. An empty sequence sums to zero.
    pub fn sum_by<F>(&self, selector: F) -> Decimal
    where
        F: FnMut(&T) -> Decimal,
    {
        self.items
            .iter()
            .map(selector)
            .fold(Decimal::ZERO, |acc, value| acc + value)
    }

    /// Mean of a selector over the sequence.
    ///
    /// Averaging an empty sequence is an explicit error, never a silent
    /// divide-by-zero.
    pub fn average_by<F>(&self, selector: F) -> Result<Decimal, PipelineError>
    where
        F: FnMut(&T) -> Decimal,
    {
        if self.items.is_empty() {
            return Err(PipelineError::EmptyAggregate);
        }

        let total = self.sum_by(selector);
        Ok(total / Decimal::from(self.items.len()))
    }
}

impl<T> From<Vec<T>> for Pipeline<T> {
    fn from(items: Vec<T>) -> Self {
        Pipeline::from_vec(items)
    }
}

impl<T> FromIterator<T> for Pipeline<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Pipeline {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Pipeline<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
