pub mod axes;
pub mod projection;

use tracing::debug;
use tracing::info;
use xcprofile_course::RouteProfile;

use crate::chart::axes::AxisBounds;
use crate::chart::axes::DISTANCE_TICKS;
use crate::chart::axes::ELEVATION_TICKS;
use crate::chart::axes::ElevationRange;
use crate::chart::projection::Dimensions;
use crate::chart::projection::Projection;
use crate::error::Result;
use crate::render::OutputStream;
use crate::render::Render;
use crate::scene::Anchor;
use crate::scene::Circle;
use crate::scene::ElementKind;
use crate::scene::Group;
use crate::scene::Line;
use crate::scene::Polygon;
use crate::scene::Polyline;
use crate::scene::Scene;
use crate::scene::Text;
use crate::scene::Tooltip;
use crate::template::Page;

const TICK_LENGTH: f64 = 6.0;
const AREA_OPACITY: f64 = 0.1;
const HOVER_RADIUS: f64 = 4.0;

/// An elevation chart over a set of loaded route profiles.
///
/// The chart owns the profiles together with the view dimensions and the
/// elevation range policy. Axis bounds are derived from the profiles on
/// every render, so changing a route's color only redraws the chart.
#[derive(Debug)]
pub struct ProfileChart {
    dimensions: Dimensions,
    range: ElevationRange,
    profiles: Vec<RouteProfile>,
}

impl ProfileChart {
    pub fn new(profiles: Vec<RouteProfile>) -> ProfileChart {
        Self {
            dimensions: Dimensions::default(),
            range: ElevationRange::default(),
            profiles,
        }
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> ProfileChart {
        self.dimensions = dimensions;
        self
    }

    pub fn with_elevation_range(mut self, range: ElevationRange) -> ProfileChart {
        self.range = range;
        self
    }

    pub fn profiles(&self) -> &[RouteProfile] {
        &self.profiles
    }

    pub fn bounds(&self) -> AxisBounds {
        AxisBounds::from_profiles(&self.profiles, self.range)
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.dimensions, self.bounds())
    }

    /// Overrides the display color of a route.
    ///
    /// Returns `false` when no loaded route has the given id.
    pub fn set_color(&mut self, route_id: &str, color: &str) -> bool {
        match self.profiles.iter_mut().find(|p| p.descriptor.id == route_id) {
            Some(profile) => {
                debug!(route = route_id, color, "overriding route color");
                profile.descriptor.set_color(color);
                true
            }
            None => false,
        }
    }

    /// Builds the vector scene: axes first, then one group per route.
    pub(crate) fn scene(&self) -> Scene {
        let projection = self.projection();
        let mut scene = Scene::new(self.dimensions.width, self.dimensions.height);

        self.draw_axes(projection.bounds(), &mut scene);

        for profile in &self.profiles {
            scene.add(ElementKind::Group(draw_route(&projection, profile)));
        }

        scene
    }

    /// Renders the complete page, replacing whatever the output held before.
    ///
    /// The exclusive borrow keeps renders of the same chart from overlapping.
    pub fn render<O>(&mut self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let bounds = self.bounds();
        info!(
            routes = self.profiles.len(),
            max_distance_km = bounds.max_distance_km,
            min_elevation_m = bounds.min_elevation_m,
            max_elevation_m = bounds.max_elevation_m,
            "rendering elevation chart"
        );

        let mut svg = String::new();
        self.scene().render(&mut svg)?;

        Page::new(&self.profiles, svg)?.render(output)
    }

    fn draw_axes(&self, bounds: &AxisBounds, scene: &mut Scene) {
        let dimensions = &self.dimensions;
        let margin = &dimensions.margin;
        let baseline = dimensions.baseline();
        let middle_x = margin.left + dimensions.plot_width() / 2.0;
        let middle_y = margin.top + dimensions.plot_height() / 2.0;

        scene.add(ElementKind::Text(Text {
            position: (middle_x, dimensions.height - 10.0),
            anchor: Anchor::Middle,
            rotation: None,
            class: "axis-title",
            content: String::from("Distance (km)"),
        }));
        scene.add(ElementKind::Text(Text {
            position: (15.0, middle_y),
            anchor: Anchor::Middle,
            rotation: Some(-90.0),
            class: "axis-title",
            content: String::from("Elevation (m)"),
        }));

        for (i, distance) in bounds.distance_ticks().enumerate() {
            let x = margin.left + dimensions.plot_width() * i as f64 / DISTANCE_TICKS as f64;

            scene.add(ElementKind::Line(Line {
                from: (x, baseline),
                to: (x, baseline + TICK_LENGTH),
                class: "axis-tick",
            }));
            scene.add(ElementKind::Text(Text {
                position: (x, baseline + 22.0),
                anchor: Anchor::Middle,
                rotation: None,
                class: "axis-label",
                content: format!("{distance:.2} km"),
            }));
        }

        for (j, elevation) in bounds.elevation_ticks().enumerate() {
            let y = margin.top + dimensions.plot_height() * j as f64 / ELEVATION_TICKS as f64;

            scene.add(ElementKind::Line(Line {
                from: (margin.left - TICK_LENGTH, y),
                to: (margin.left, y),
                class: "axis-tick",
            }));
            scene.add(ElementKind::Text(Text {
                position: (margin.left - 10.0, y + 4.0),
                anchor: Anchor::End,
                rotation: None,
                class: "axis-label",
                content: format!("{elevation:.0} m"),
            }));
        }
    }
}

fn draw_route(projection: &Projection, profile: &RouteProfile) -> Group {
    let descriptor = &profile.descriptor;
    let baseline = projection.dimensions().baseline();
    let points: Vec<(f64, f64)> = profile
        .samples
        .iter()
        .map(|s| projection.point(s.distance_km, s.elevation_m))
        .collect();

    let mut group = Group::new(&descriptor.id, "route");

    if let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) {
        let mut area = points.clone();
        area.push((last_x, baseline));
        area.push((first_x, baseline));

        group.add(ElementKind::Polygon(Polygon {
            points: area,
            fill: descriptor.color.clone(),
            opacity: AREA_OPACITY,
            class: "route-area",
        }));
    }

    group.add(ElementKind::Polyline(Polyline {
        points: points.clone(),
        stroke: descriptor.color.clone(),
        class: "route-line",
    }));

    for (sample, center) in profile.samples.iter().zip(points) {
        group.add(ElementKind::Circle(Circle {
            center,
            radius: HOVER_RADIUS,
            fill: descriptor.color.clone(),
            opacity: 0.0,
            class: "route-point",
            tooltip: Tooltip::new(&descriptor.display_name, sample.distance_km, sample.elevation_m),
        }));
    }

    group
}

#[cfg(test)]
mod tests {
    use xcprofile_course::RouteDescriptor;
    use xcprofile_course::geometry::Coordinate;
    use xcprofile_course::profile::ElevationSource;
    use xcprofile_course::profile::derive_samples;

    use super::*;

    fn profile(id: &str, color: &str, elevations: [f64; 3]) -> RouteProfile {
        let coordinates: Vec<Coordinate> = elevations
            .iter()
            .enumerate()
            .map(|(i, e)| Coordinate::new(0.0, i as f64, Some(*e)))
            .collect();
        let descriptor = RouteDescriptor::new(id, id.to_uppercase(), format!("http://test/{id}"), color);

        RouteProfile::new(descriptor, derive_samples(&coordinates, ElevationSource::Embedded))
    }

    fn chart() -> ProfileChart {
        ProfileChart::new(vec![
            profile("a", "blue", [0.0, 0.0, 0.0]),
            profile("b", "red", [10.0, 50.0, 20.0]),
            profile("c", "green", [5.0, 15.0, 25.0]),
        ])
    }

    fn route_line(scene: &Scene, route_id: &str) -> Vec<(f64, f64)> {
        scene
            .elements
            .iter()
            .find_map(|element| match element {
                ElementKind::Group(group) if group.route_id == route_id => {
                    group.elements.iter().find_map(|element| match element {
                        ElementKind::Polyline(polyline) => Some(polyline.points.clone()),
                        _ => None,
                    })
                }
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn bounds_are_shared_across_routes() {
        let bounds = chart().bounds();

        assert_eq!(bounds.min_elevation_m, 0.0);
        assert_eq!(bounds.max_elevation_m, 50.0);
        assert_eq!(bounds.max_distance_km, chart().profiles()[0].total_distance_km);
    }

    #[test]
    fn flat_route_has_no_vertical_deflection() {
        let scene = chart().scene();

        let line = route_line(&scene, "a");

        assert_eq!(line.len(), 3);
        assert!(line.iter().all(|(_, y)| *y == Dimensions::default().baseline()));
    }

    #[test]
    fn hilly_route_peaks_at_its_midpoint() {
        let scene = chart().scene();

        let line = route_line(&scene, "b");

        assert_eq!(line[1].1, Dimensions::default().margin.top);
        assert!(line[1].1 < line[0].1);
        assert!(line[1].1 < line[2].1);
        assert!(line[0].0 < line[1].0 && line[1].0 < line[2].0);
    }

    #[test]
    fn scene_has_one_hover_target_per_sample() {
        let scene = chart().scene();

        let hover_targets = scene
            .elements
            .iter()
            .filter_map(|element| match element {
                ElementKind::Group(group) => Some(group),
                _ => None,
            })
            .flat_map(|group| group.elements.iter())
            .filter(|element| matches!(element, ElementKind::Circle(c) if c.opacity == 0.0))
            .count();

        assert_eq!(hover_targets, 9);
    }

    #[test]
    fn scene_has_eleven_distance_and_six_elevation_labels() {
        let scene = chart().scene();

        let labels: Vec<&str> = scene
            .elements
            .iter()
            .filter_map(|element| match element {
                ElementKind::Text(text) if text.class == "axis-label" => Some(text.content.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(labels.len(), 17);
        assert_eq!(labels[0], "0.00 km");
        assert_eq!(labels[11], "50 m");
        assert_eq!(labels[16], "0 m");
    }

    #[test]
    fn set_color_redraws_without_reloading() -> Result<()> {
        let mut chart = chart();
        let mut before = String::new();
        chart.render(&mut before)?;

        let updated = chart.set_color("b", "purple");
        let mut after = String::new();
        chart.render(&mut after)?;

        assert!(updated);
        assert!(!chart.set_color("missing", "purple"));
        assert!(before.contains(r#"stroke="red""#));
        assert!(!after.contains(r#"stroke="red""#));
        assert!(after.contains(r#"stroke="purple""#));
        assert_eq!(chart.profiles()[1].samples, profile("b", "red", [10.0, 50.0, 20.0]).samples);

        Ok(())
    }

    #[test]
    fn render_writes_a_complete_page() -> Result<()> {
        let mut output = String::new();

        chart().render(&mut output)?;

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("Distance (km)"));
        assert!(output.contains("Elevation (m)"));
        assert_eq!(output.matches("<polyline").count(), 3);
        assert!(output.trim_end().ends_with("</html>"));

        Ok(())
    }
}
