use crate::collection::Record;
use crate::errors::ObjListResult;

use super::KeyValue;

/// Finds the position of the first record satisfying every condition.
///
/// The collection is narrowed one condition at a time, in the given
/// order, and the first survivor wins. `None` means no record matched;
/// callers must handle it rather than index with it. Embedded field paths
/// are split on `separator`.
pub fn locate(
    collection: &[Record],
    conditions: &[KeyValue],
    separator: &str,
) -> ObjListResult<Option<usize>> {
    Ok(locate_all(collection, conditions, separator)?.into_iter().next())
}

/// Finds the positions of every record satisfying every condition, in
/// collection order.
pub fn locate_all(
    collection: &[Record],
    conditions: &[KeyValue],
    separator: &str,
) -> ObjListResult<Vec<usize>> {
    let mut positions: Vec<usize> = (0..collection.len()).collect();

    for condition in conditions {
        let mut survivors = Vec::with_capacity(positions.len());
        for position in positions {
            if condition.matches(&collection[position], separator)? {
                survivors.push(position);
            }
        }
        log::trace!("{} narrowed the collection to {} record(s)", condition, survivors.len());
        positions = survivors;

        if positions.is_empty() {
            break;
        }
    }
    Ok(positions)
}
