//! End-to-end chaining of edge records into wire order.

use draft_math::Point3;

use crate::record::GeomRecord;

/// Link an unordered set of edge records into a connected, oriented
/// sequence.
///
/// Greedy walk: seed with the first record, then repeatedly take the first
/// unused record whose start (appended as-is) or end (appended reversed)
/// touches the trailing point within `tol`. Ties resolve by input order;
/// there is no backtracking, and a pass that finds no match is skipped
/// silently, so disconnected input yields a shorter chain than the input.
/// Best effort by design: this never fails, it only returns less.
pub fn chain_geoms(geoms: Vec<GeomRecord>, tol: f64) -> Vec<GeomRecord> {
    // Single records (circles, ellipses, closed splines) need no chaining.
    if geoms.len() <= 1 {
        return geoms;
    }

    let count = geoms.len();
    let mut slots: Vec<Option<GeomRecord>> = geoms.into_iter().map(Some).collect();
    let mut result = Vec::with_capacity(count);

    let Some(seed) = slots[0].take() else {
        return result;
    };
    let mut at_point = seed.end_point();
    result.push(seed);

    for _ in 1..count {
        if let Some(next) = next_geom(at_point, &mut slots, tol) {
            at_point = if next.reversed {
                next.start_point()
            } else {
                next.end_point()
            };
            result.push(next);
        }
    }
    result
}

/// First unused record with an endpoint at `at_point`, orientation set to
/// continue the walk.
fn next_geom(at_point: Point3, slots: &mut [Option<GeomRecord>], tol: f64) -> Option<GeomRecord> {
    for slot in slots.iter_mut() {
        let Some(candidate) = slot.as_ref() else {
            continue;
        };
        if (at_point - candidate.start_point()).length() < tol {
            let mut taken = slot.take()?;
            taken.reversed = false;
            return Some(taken);
        }
        if (at_point - candidate.end_point()).length() < tol {
            let mut taken = slot.take()?;
            taken.reversed = true;
            return Some(taken);
        }
    }
    None
}
