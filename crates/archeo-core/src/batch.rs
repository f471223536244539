//! Batch partitioning for the install fan-out.

/// Split `items` into contiguous batches of at most `batch_size`.
///
/// Produces ⌈N/B⌉ batches in input order. Every batch except the last holds
/// exactly `batch_size` items; the last holds the remainder (`N mod B`, or a
/// full `batch_size` when the division is exact). Config validation rejects
/// a zero batch size before this is ever called.
#[must_use]
pub fn partition<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    debug_assert!(batch_size > 0);
    if items.is_empty() {
        return Vec::new();
    }

    let mut batches = Vec::with_capacity(items.len().div_ceil(batch_size));
    let mut current = Vec::with_capacity(batch_size.min(items.len()));
    for item in items {
        current.push(item);
        if current.len() == batch_size {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}
