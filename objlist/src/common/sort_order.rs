use std::cmp::Ordering;

/// Specifies the direction for sorting records.
///
/// # Usage
/// ```text
/// let spec = SortSpec::new("username", SortOrder::Descending);
/// list.sort(&mut users, spec)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z)
    #[default]
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A)
    Descending,
}

impl SortOrder {
    /// Orients an ascending comparison result to this direction.
    #[inline]
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}
