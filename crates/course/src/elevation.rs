//! Elevation lookups through an external point-elevation service.

use tracing::debug;
use tracing::error;

use crate::error::ElevationError;

/// The maximum number of points sent to the elevation service in one request.
pub const ELEVATION_BATCH_SIZE: usize = 512;

/// A point in decimal degrees, in the order elevation services expect it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> LatLng {
        Self { lat, lng }
    }
}

/// A batched point-elevation query capability.
///
/// Given at most [`ELEVATION_BATCH_SIZE`] points, an implementation returns
/// one elevation in meters per point, in the same order.
pub trait ElevationService: Sync {
    fn lookup(&self, points: &[LatLng]) -> Result<Vec<f64>, ElevationError>;
}

/// Looks up the elevation of every point, splitting the points into
/// consecutive batches that are sent one after another.
///
/// A failed batch is logged and its points default to zero; the remaining
/// batches are still requested. The result always has one entry per point.
pub fn lookup_elevations<S>(service: &S, route_id: &str, points: &[LatLng]) -> Vec<f64>
where
    S: ElevationService + ?Sized,
{
    let mut elevations = Vec::with_capacity(points.len());

    for (batch_index, batch) in points.chunks(ELEVATION_BATCH_SIZE).enumerate() {
        debug!(route = route_id, batch = batch_index, points = batch.len(), "requesting elevations");

        let result = service.lookup(batch).and_then(|results| {
            if results.len() == batch.len() {
                Ok(results)
            } else {
                Err(ElevationError::ResultCountMismatch {
                    expected: batch.len(),
                    actual: results.len(),
                })
            }
        });

        match result {
            Ok(results) => elevations.extend(results),
            Err(err) => {
                error!(
                    route = route_id,
                    batch = batch_index,
                    "elevation lookup failed, defaulting to zero: {err}"
                );
                elevations.extend(std::iter::repeat_n(0.0, batch.len()));
            }
        }
    }

    elevations
}
