//! Nearby-station selection.
//!
//! Linear scan over every station with no spatial index. Fine at the scale the
//! service targets; anything larger would want an R-tree or geohash buckets.

use crate::model::{GasStation, Location};

/// Default number of stations returned by a nearby query.
pub const DEFAULT_NEARBY_LIMIT: usize = 3;

/// Return up to `limit` stations closest to `point`, nearest first.
///
/// Keeps a bounded, sorted window while scanning, so the cost is
/// `O(n * limit)`. Equal distances keep their iteration order.
pub fn nearest<I>(stations: I, point: Location, limit: usize) -> Vec<GasStation>
where
    I: IntoIterator<Item = GasStation>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut window: Vec<(f64, GasStation)> = Vec::with_capacity(limit + 1);
    for station in stations {
        let d = station.location.distance_to(&point);
        // NaN sorts after every real distance under total_cmp.
        let pos = window.partition_point(|(wd, _)| wd.total_cmp(&d).is_le());
        if pos >= limit {
            continue;
        }
        window.insert(pos, (d, station));
        window.truncate(limit);
    }

    window.into_iter().map(|(_, s)| s).collect()
}
