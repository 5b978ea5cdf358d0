use xcprofile_course::RouteProfile;

/// The number of intervals on the distance axis.
pub const DISTANCE_TICKS: usize = 10;

/// The number of intervals on the elevation axis.
pub const ELEVATION_TICKS: usize = 5;

/// How the elevation axis range is derived from the loaded samples.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum ElevationRange {
    /// The raw minimum and maximum elevation over all samples.
    #[default]
    Raw,
    /// The raw range, with the lower bound lowered to at most the given
    /// elevation so that low profiles keep some room under them.
    Floor(f64),
    /// A range symmetric around zero so that zero elevation sits at the
    /// vertical center of the chart.
    Symmetric,
}

/// The distance and elevation range shared by every route of a chart.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub max_distance_km: f64,
    pub min_elevation_m: f64,
    pub max_elevation_m: f64,
}

impl AxisBounds {
    pub fn new(max_distance_km: f64, min_elevation_m: f64, max_elevation_m: f64) -> AxisBounds {
        Self {
            max_distance_km,
            min_elevation_m,
            max_elevation_m,
        }
    }

    /// Computes the bounds over all samples of all profiles.
    ///
    /// An empty profile set yields all-zero bounds.
    pub fn from_profiles(profiles: &[RouteProfile], range: ElevationRange) -> AxisBounds {
        let max_distance_km = profiles
            .iter()
            .map(|p| p.total_distance_km)
            .fold(0.0, f64::max);

        let elevations = profiles
            .iter()
            .flat_map(|p| p.samples.iter())
            .map(|s| s.elevation_m);

        let (min, max) = elevations
            .fold(None, |acc: Option<(f64, f64)>, e| match acc {
                Some((min, max)) => Some((min.min(e), max.max(e))),
                None => Some((e, e)),
            })
            .unwrap_or((0.0, 0.0));

        let (min_elevation_m, max_elevation_m) = match range {
            ElevationRange::Raw => (min, max),
            ElevationRange::Floor(floor) => (min.min(floor), max),
            ElevationRange::Symmetric => {
                let extent = min.abs().max(max.abs());
                (-extent, extent)
            }
        };

        Self::new(max_distance_km, min_elevation_m, max_elevation_m)
    }

    /// The distance labels of the ticks, from zero to the maximum distance.
    pub fn distance_ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=DISTANCE_TICKS).map(move |i| self.max_distance_km * i as f64 / DISTANCE_TICKS as f64)
    }

    /// The elevation labels of the ticks, from the maximum down to the minimum.
    pub fn elevation_ticks(&self) -> impl Iterator<Item = f64> + '_ {
        let range = self.max_elevation_m - self.min_elevation_m;

        (0..=ELEVATION_TICKS).map(move |j| self.max_elevation_m - range * j as f64 / ELEVATION_TICKS as f64)
    }
}
