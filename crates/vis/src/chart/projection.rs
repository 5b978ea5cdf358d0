use crate::chart::axes::AxisBounds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 60.0,
            left: 70.0,
        }
    }
}

/// The size of the chart's view box and the margins around its plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Dimensions {
        Self {
            width,
            height,
            margin: Margin::default(),
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// The y coordinate of the plot's bottom edge.
    pub fn baseline(&self) -> f64 {
        self.margin.top + self.plot_height()
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(800.0, 300.0)
    }
}

/// Maps (distance, elevation) samples onto plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    dimensions: Dimensions,
    bounds: AxisBounds,
}

impl Projection {
    pub fn new(dimensions: Dimensions, bounds: AxisBounds) -> Projection {
        Self { dimensions, bounds }
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn bounds(&self) -> &AxisBounds {
        &self.bounds
    }

    pub fn x(&self, distance_km: f64) -> f64 {
        let max_distance = non_zero(self.bounds.max_distance_km);

        self.dimensions.margin.left + (distance_km / max_distance) * self.dimensions.plot_width()
    }

    pub fn y(&self, elevation_m: f64) -> f64 {
        let range = non_zero(self.bounds.max_elevation_m - self.bounds.min_elevation_m);

        self.dimensions.margin.top
            + self.dimensions.plot_height() * (1.0 - (elevation_m - self.bounds.min_elevation_m) / range)
    }

    pub fn point(&self, distance_km: f64, elevation_m: f64) -> (f64, f64) {
        (self.x(distance_km), self.y(elevation_m))
    }
}

#[inline]
fn non_zero(range: f64) -> f64 {
    if range == 0.0 { 1.0 } else { range }
}
