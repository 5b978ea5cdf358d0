use rayon::prelude::*;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::descriptor::RouteDescriptor;
use crate::elevation::ElevationService;
use crate::elevation::LatLng;
use crate::elevation::lookup_elevations;
use crate::error::LoadError;
use crate::geometry::extract_coordinates;
use crate::profile::ElevationSource;
use crate::profile::RouteProfile;
use crate::profile::derive_samples;

/// A source of course geometry payloads.
///
/// One call is one request: implementations must not retry.
pub trait GeometrySource: Sync {
    fn fetch(&self, url: &str) -> Result<String, LoadError>;
}

/// Loads route descriptors into elevation profiles.
///
/// Elevations come from the payload unless an [`ElevationService`] is
/// attached, in which case every non-reference route is looked up.
pub struct Loader<'a, G: ?Sized> {
    source: &'a G,
    elevation: Option<&'a dyn ElevationService>,
}

impl<'a, G> Loader<'a, G>
where
    G: GeometrySource + ?Sized,
{
    pub fn new(source: &'a G) -> Loader<'a, G> {
        Self {
            source,
            elevation: None,
        }
    }

    pub fn with_elevation(mut self, service: &'a dyn ElevationService) -> Loader<'a, G> {
        self.elevation = Some(service);
        self
    }

    /// Fetches the geometry of one route and derives its profile.
    pub fn load_route(&self, descriptor: &RouteDescriptor) -> Result<RouteProfile, LoadError> {
        info!(route = %descriptor.id, url = %descriptor.source_url, "fetching route");

        let payload = self.source.fetch(&descriptor.source_url)?;
        let coordinates = extract_coordinates(&descriptor.id, &payload)?;

        let samples = match (descriptor.reference, self.elevation) {
            (true, _) => derive_samples(&coordinates, ElevationSource::Flat),
            (false, Some(service)) => {
                let points: Vec<LatLng> = coordinates
                    .iter()
                    .map(|c| LatLng::new(c.latitude, c.longitude))
                    .collect();
                let elevations = lookup_elevations(service, &descriptor.id, &points);

                derive_samples(&coordinates, ElevationSource::Service(&elevations))
            }
            (false, None) => derive_samples(&coordinates, ElevationSource::Embedded),
        };

        let profile = RouteProfile::new(descriptor.clone(), samples);

        info!(
            route = %descriptor.id,
            samples = profile.samples.len(),
            distance_km = profile.total_distance_km,
            "route loaded"
        );

        Ok(profile)
    }

    /// Loads all routes concurrently and waits for every one of them.
    ///
    /// Failed routes are logged and left out; the remaining profiles keep
    /// the order of `descriptors`.
    pub fn load_all(&self, descriptors: &[RouteDescriptor]) -> Vec<RouteProfile> {
        let results: Vec<Result<RouteProfile, LoadError>> = descriptors
            .par_iter()
            .map(|descriptor| self.load_route(descriptor))
            .collect();

        let profiles: Vec<RouteProfile> = descriptors
            .iter()
            .zip(results)
            .filter_map(|(descriptor, result)| match result {
                Ok(profile) => Some(profile),
                Err(err) => {
                    error!(route = %descriptor.id, "route excluded from the profile set: {err}");
                    None
                }
            })
            .collect();

        if profiles.len() < descriptors.len() {
            warn!(
                loaded = profiles.len(),
                requested = descriptors.len(),
                "some routes could not be loaded"
            );
        }

        profiles
    }
}
