use crate::descriptor::RouteDescriptor;
use crate::distance::haversine_km;
use crate::geometry::Coordinate;

/// One point of an elevation profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub distance_km: f64,
    pub elevation_m: f64,
}

impl Sample {
    pub fn new(distance_km: f64, elevation_m: f64) -> Sample {
        Self {
            distance_km,
            elevation_m,
        }
    }
}

/// The elevation profile of one route.
///
/// Samples are in path order; the first one is at distance zero and the
/// distances never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteProfile {
    pub descriptor: RouteDescriptor,
    pub samples: Vec<Sample>,
    pub total_distance_km: f64,
}

impl RouteProfile {
    pub fn new(descriptor: RouteDescriptor, samples: Vec<Sample>) -> RouteProfile {
        let total_distance_km = samples.last().map_or(0.0, |s| s.distance_km);

        Self {
            descriptor,
            samples,
            total_distance_km,
        }
    }

    pub fn min_elevation_m(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.elevation_m).reduce(f64::min)
    }

    pub fn max_elevation_m(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.elevation_m).reduce(f64::max)
    }
}

/// Where the elevation of each sample comes from.
#[derive(Debug, Clone, Copy)]
pub enum ElevationSource<'a> {
    /// The elevation embedded in the payload; zero where it is missing.
    Embedded,
    /// Elevations looked up from a service, one per coordinate.
    Service(&'a [f64]),
    /// The flat reference course: zero throughout.
    Flat,
}

impl ElevationSource<'_> {
    fn elevation(&self, index: usize, coordinate: &Coordinate) -> f64 {
        match self {
            ElevationSource::Embedded => coordinate.elevation.unwrap_or(0.0),
            ElevationSource::Service(elevations) => elevations.get(index).copied().unwrap_or(0.0),
            ElevationSource::Flat => 0.0,
        }
    }
}

/// Derives the cumulative-distance/elevation samples of a coordinate sequence.
pub fn derive_samples(coordinates: &[Coordinate], source: ElevationSource<'_>) -> Vec<Sample> {
    let mut total_distance_km = 0.0;
    let mut previous: Option<&Coordinate> = None;

    coordinates
        .iter()
        .enumerate()
        .map(|(index, coordinate)| {
            if let Some(prev) = previous {
                total_distance_km += haversine_km(
                    prev.latitude,
                    prev.longitude,
                    coordinate.latitude,
                    coordinate.longitude,
                );
            }
            previous = Some(coordinate);

            Sample::new(total_distance_km, source.elevation(index, coordinate))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meridian() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0, Some(10.0)),
            Coordinate::new(0.0, 1.0, None),
            Coordinate::new(0.0, 2.0, Some(20.0)),
        ]
    }

    #[test]
    fn derive_samples_accumulates_distance_from_zero() {
        let one_degree = haversine_km(0.0, 0.0, 1.0, 0.0);

        let samples = derive_samples(&meridian(), ElevationSource::Embedded);

        assert_eq!(samples[0].distance_km, 0.0);
        assert!((samples[1].distance_km - one_degree).abs() < 1e-9);
        assert!((samples[2].distance_km - 2.0 * one_degree).abs() < 1e-9);
        assert!(samples.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn derive_samples_defaults_missing_embedded_elevation_to_zero() {
        let samples = derive_samples(&meridian(), ElevationSource::Embedded);

        let elevations: Vec<f64> = samples.iter().map(|s| s.elevation_m).collect();
        assert_eq!(elevations, [10.0, 0.0, 20.0]);
    }

    #[test]
    fn derive_samples_uses_service_elevations_over_embedded_ones() {
        let looked_up = [100.0, 200.0];

        let samples = derive_samples(&meridian(), ElevationSource::Service(&looked_up));

        let elevations: Vec<f64> = samples.iter().map(|s| s.elevation_m).collect();
        assert_eq!(elevations, [100.0, 200.0, 0.0]);
    }

    #[test]
    fn derive_samples_keeps_the_reference_course_flat() {
        let samples = derive_samples(&meridian(), ElevationSource::Flat);

        assert!(samples.iter().all(|s| s.elevation_m == 0.0));
    }

    #[test]
    fn route_profile_reports_total_distance_and_elevation_range() {
        let descriptor = RouteDescriptor::new("r1", "Route 1", "http://localhost/r1", "blue");
        let samples = derive_samples(&meridian(), ElevationSource::Embedded);

        let profile = RouteProfile::new(descriptor, samples);

        assert!((profile.total_distance_km - 2.0 * haversine_km(0.0, 0.0, 1.0, 0.0)).abs() < 1e-9);
        assert_eq!(profile.min_elevation_m(), Some(0.0));
        assert_eq!(profile.max_elevation_m(), Some(20.0));
    }
}
