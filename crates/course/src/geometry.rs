//! Decoding of the course geometry payload.
//!
//! The payload is a list of documents, each one a feature collection:
//!
//! ```json
//! { "docs": [ { "properties": { "type": "MAIN_ROUTE" },
//!               "features": [ { "geometry": { "type": "LineString",
//!                                             "coordinates": [[lon, lat, ele], ...] } } ] } ] }
//! ```
//!
//! Documents, features and coordinates are decoded one by one so that a
//! malformed unit is skipped without discarding the rest of the route.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::iter::IteratorExt;

const MAIN_ROUTE_TYPE: &str = "MAIN_ROUTE";
const LINE_STRING_TYPE: &str = "LineString";

/// A raw geometry sample: longitude and latitude in decimal degrees and
/// the elevation in meters, when the payload carries one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: Option<f64>,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64, elevation: Option<f64>) -> Coordinate {
        Self {
            longitude,
            latitude,
            elevation,
        }
    }

    fn from_value(value: &Value) -> Result<Coordinate, MalformedCoordinate> {
        let Some(tuple) = value.as_array() else {
            return Err(MalformedCoordinate(value.to_string()));
        };

        let component = |index: usize| tuple.get(index).and_then(Value::as_f64).filter(|v| v.is_finite());

        match (component(0), component(1)) {
            (Some(longitude), Some(latitude)) => Ok(Coordinate::new(longitude, latitude, component(2))),
            _ => Err(MalformedCoordinate(value.to_string())),
        }
    }
}

#[derive(Debug)]
struct MalformedCoordinate(String);

impl Display for MalformedCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "expected at least two numeric components, found {}", self.0)
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    docs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    features: Vec<Value>,
}

impl Document {
    fn is_main_route(&self) -> bool {
        self.properties
            .as_ref()
            .and_then(|p| p.kind.as_deref())
            .is_some_and(|kind| kind == MAIN_ROUTE_TYPE)
    }
}

#[derive(Debug, Deserialize)]
struct Properties {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<Value>,
}

/// Extracts the ordered coordinate sequence of a route from its geometry payload.
///
/// The first document tagged as the main route wins. When no document is
/// tagged, the line-strings of all documents are concatenated in document order.
pub fn extract_coordinates(route_id: &str, payload: &str) -> Result<Vec<Coordinate>, LoadError> {
    let payload: Payload = serde_json::from_str(payload)?;

    let documents: Vec<Document> = payload
        .docs
        .into_iter()
        .map(serde_json::from_value::<Document>)
        .skip_malformed(route_id, "document")
        .collect();

    let coordinates: Vec<Coordinate> = match documents.iter().find(|doc| doc.is_main_route()) {
        Some(main_route) => line_string_coordinates(route_id, main_route),
        None => {
            debug!(route = route_id, "no main route document, concatenating all line-strings");
            documents
                .iter()
                .flat_map(|doc| line_string_coordinates(route_id, doc))
                .collect()
        }
    };

    if coordinates.is_empty() {
        return Err(LoadError::NoGeometry {
            route_id: route_id.to_owned(),
        });
    }

    Ok(coordinates)
}

fn line_string_coordinates(route_id: &str, document: &Document) -> Vec<Coordinate> {
    document
        .features
        .iter()
        .cloned()
        .map(serde_json::from_value::<Feature>)
        .skip_malformed(route_id, "feature")
        .filter_map(|feature| feature.geometry)
        .filter(|geometry| geometry.kind == LINE_STRING_TYPE)
        .flat_map(|geometry| geometry.coordinates)
        .map(|value| Coordinate::from_value(&value))
        .skip_malformed(route_id, "coordinate")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_coordinates_prefers_the_main_route_document() {
        let payload = r#"{ "docs": [
            { "properties": { "type": "WARM_UP" },
              "features": [ { "geometry": { "type": "LineString", "coordinates": [[9.0, 9.0]] } } ] },
            { "properties": { "type": "MAIN_ROUTE" },
              "features": [ { "geometry": { "type": "LineString", "coordinates": [[1.0, 2.0, 3.0], [4.0, 5.0]] } } ] },
            { "properties": { "type": "MAIN_ROUTE" },
              "features": [ { "geometry": { "type": "LineString", "coordinates": [[7.0, 7.0]] } } ] }
        ] }"#;

        let coordinates = extract_coordinates("r1", payload).unwrap();

        assert_eq!(
            coordinates,
            [
                Coordinate::new(1.0, 2.0, Some(3.0)),
                Coordinate::new(4.0, 5.0, None)
            ]
        );
    }

    #[test]
    fn extract_coordinates_concatenates_line_strings_without_a_main_route() {
        let payload = r#"{ "docs": [
            { "features": [
                { "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0]] } },
                { "geometry": { "type": "Point", "coordinates": [5.0, 5.0] } }
            ] },
            { "properties": {},
              "features": [ { "geometry": { "type": "LineString", "coordinates": [[0.0, 1.0], [0.0, 2.0]] } } ] }
        ] }"#;

        let coordinates = extract_coordinates("r1", payload).unwrap();

        let latitudes: Vec<f64> = coordinates.iter().map(|c| c.latitude).collect();
        assert_eq!(latitudes, [0.0, 1.0, 2.0]);
    }

    #[test]
    fn extract_coordinates_skips_malformed_units() {
        let payload = r#"{ "docs": [
            { "properties": { "type": "MAIN_ROUTE" },
              "features": [
                "not a feature",
                { "geometry": null },
                { "geometry": { "type": "LineString",
                                "coordinates": [[0.0, 0.0, 10.0], [1.0], "x", [1.0, "y"], [0.0, 1.0, "high"]] } }
              ] }
        ] }"#;

        let coordinates = extract_coordinates("r1", payload).unwrap();

        assert_eq!(
            coordinates,
            [
                Coordinate::new(0.0, 0.0, Some(10.0)),
                Coordinate::new(0.0, 1.0, None)
            ]
        );
    }

    #[test]
    fn extract_coordinates_rejects_a_payload_without_geometry() {
        let payload = r#"{ "docs": [ { "properties": { "type": "MAIN_ROUTE" }, "features": [] } ] }"#;

        let result = extract_coordinates("r1", payload);

        assert!(matches!(result, Err(LoadError::NoGeometry { ref route_id }) if route_id == "r1"));
    }

    #[test]
    fn extract_coordinates_rejects_invalid_json() {
        let result = extract_coordinates("r1", "<html>Not found</html>");

        assert!(matches!(result, Err(LoadError::Json(_))));
    }
}
