//! The vector scene of an elevation chart.
//!
//! A scene is a tree of SVG elements. It only describes what is drawn;
//! turning it into markup is the job of the [`crate::render`] module.

#[derive(Debug, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<ElementKind>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Scene {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn add(&mut self, element: ElementKind) {
        self.elements.push(element);
    }
}

#[derive(Debug)]
pub enum ElementKind {
    Group(Group),
    Line(Line),
    Text(Text),
    Polyline(Polyline),
    Polygon(Polygon),
    Circle(Circle),
}

/// A group of elements belonging to one route.
#[derive(Debug)]
pub struct Group {
    pub route_id: String,
    pub class: &'static str,
    pub elements: Vec<ElementKind>,
}

impl Group {
    pub fn new(route_id: impl Into<String>, class: &'static str) -> Group {
        Self {
            route_id: route_id.into(),
            class,
            elements: Vec::new(),
        }
    }

    pub fn add(&mut self, element: ElementKind) {
        self.elements.push(element);
    }
}

#[derive(Debug)]
pub struct Line {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub class: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Middle,
    End,
}

#[derive(Debug)]
pub struct Text {
    pub position: (f64, f64),
    pub anchor: Anchor,
    /// Rotation in degrees around the text position.
    pub rotation: Option<f64>,
    pub class: &'static str,
    pub content: String,
}

#[derive(Debug)]
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
    pub stroke: String,
    pub class: &'static str,
}

#[derive(Debug)]
pub struct Polygon {
    pub points: Vec<(f64, f64)>,
    pub fill: String,
    pub opacity: f64,
    pub class: &'static str,
}

/// A hover target carrying the tooltip of one sample.
#[derive(Debug)]
pub struct Circle {
    pub center: (f64, f64),
    pub radius: f64,
    pub fill: String,
    pub opacity: f64,
    pub class: &'static str,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub route_name: String,
    pub distance: String,
    pub elevation: String,
}

impl Tooltip {
    pub fn new(route_name: &str, distance_km: f64, elevation_m: f64) -> Tooltip {
        Self {
            route_name: route_name.to_owned(),
            distance: format!("{distance_km:.2} km"),
            elevation: format!("{elevation_m:.1} m"),
        }
    }
}
