use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// The error type for loading a single route.
///
/// A load error is terminal for the route it belongs to, but never for the
/// remaining routes of the same batch.
#[derive(Debug)]
pub enum LoadError {
    /// The geometry source could not deliver the payload.
    Fetch(Box<dyn Error + Send + Sync>),

    /// A [`serde_json::Error`] encountered while decoding the geometry payload.
    Json(serde_json::Error),

    /// The payload did not contain a single usable line-string coordinate.
    NoGeometry { route_id: String },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let load_error = "route load error:";

        match self {
            LoadError::Fetch(error) => write!(f, "{load_error} fetching the geometry failed: {error}"),
            LoadError::Json(error) => write!(f, "{load_error} the geometry payload is not valid JSON: {error}"),
            LoadError::NoGeometry { route_id } => write!(
                f,
                "{load_error} no line-string geometry was found for the \"{route_id}\" route"
            ),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Fetch(error) => Some(error.as_ref()),
            LoadError::Json(error) => Some(error),
            LoadError::NoGeometry { .. } => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> Self {
        LoadError::Json(error)
    }
}

/// The error type for elevation lookups.
///
/// Elevation errors never abort a route: the affected points fall back to
/// an elevation of zero.
#[derive(Debug)]
pub enum ElevationError {
    /// The request to the elevation service could not be completed.
    Request(Box<dyn Error + Send + Sync>),

    /// The service answered with a status other than success.
    Status(String),

    /// The service returned a different number of results than requested.
    ResultCountMismatch { expected: usize, actual: usize },
}

impl Display for ElevationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let elevation_error = "elevation error:";

        match self {
            ElevationError::Request(error) => write!(f, "{elevation_error} request failed: {error}"),
            ElevationError::Status(status) => {
                write!(f, "{elevation_error} the service responded with status {status}")
            }
            ElevationError::ResultCountMismatch { expected, actual } => write!(
                f,
                "{elevation_error} expected {expected} elevations but the service returned {actual}"
            ),
        }
    }
}

impl Error for ElevationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ElevationError::Request(error) => Some(error.as_ref()),
            ElevationError::Status(_) => None,
            ElevationError::ResultCountMismatch { .. } => None,
        }
    }
}
