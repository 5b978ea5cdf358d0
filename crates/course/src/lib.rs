//! Loading of cross-country course geometries into elevation profiles.
//!
//! A [`RouteDescriptor`] names a course and the URL of its geometry. The
//! [`Loader`] fetches the geometry through a [`GeometrySource`], extracts
//! the main route's coordinates, optionally looks up their elevation
//! through an [`ElevationService`], and accumulates the haversine distance
//! into a [`RouteProfile`].

mod iter;
mod load;

pub mod descriptor;
pub mod distance;
pub mod elevation;
pub mod error;
pub mod geometry;
pub mod profile;

pub use crate::descriptor::RouteDescriptor;
pub use crate::elevation::ElevationService;
pub use crate::elevation::LatLng;
pub use crate::error::ElevationError;
pub use crate::error::LoadError;
pub use crate::load::GeometrySource;
pub use crate::load::Loader;
pub use crate::profile::RouteProfile;
pub use crate::profile::Sample;
