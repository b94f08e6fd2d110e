use std::ops::Range;

/// Splits `total` rows into `num_workers` contiguous chunks of `ceil(total / num_workers)` rows.
///
/// Properties:
/// - Ranges are contiguous, disjoint and cover `[0..total)`.
/// - Only the last non-empty range may be shorter than the others.
/// - When `num_workers > total` the trailing ranges are empty.
///
/// # Arguments
/// * `total` - The amount of rows to split.
/// * `num_workers` - The amount of ranges to produce, `0` is treated as `1`.
///
/// # Returns
/// Exactly `num_workers` ranges, in order.
pub fn partition(total: usize, num_workers: usize) -> Vec<Range<usize>> {
    let num_workers = num_workers.max(1);
    let chunk = total.div_ceil(num_workers);

    (0..num_workers)
        .map(|worker_id| chunk_range(total, chunk, worker_id))
        .collect()
}

#[inline]
fn chunk_range(total: usize, chunk: usize, worker_id: usize) -> Range<usize> {
    let start = (worker_id * chunk).min(total);
    let end = (start + chunk).min(total);
    start..end
}
