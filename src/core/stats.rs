//! Grade aggregation shared by the averaging and ranking operations.

pub const TOP_STUDENTS_LIMIT: usize = 5;

/// Arithmetic mean rounded toward negative infinity; 0 for no values.
pub fn floor_average<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return 0;
    }
    sum.div_euclid(count)
}

/// Orders entries by average, highest first, and keeps the first `limit` keys.
///
/// The sort is stable: entries with equal averages keep their input order.
pub fn rank_top<K>(mut entries: Vec<(K, i64)>, limit: usize) -> Vec<K> {
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().take(limit).map(|(key, _)| key).collect()
}
