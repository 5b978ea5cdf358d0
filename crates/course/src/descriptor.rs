/// The base URL of the course geometry API.
pub const DEFAULT_BASE_URL: &str = "https://api.crosscountryapp.com";

/// The course ids loaded when none are given.
pub const DEFAULT_ROUTE_IDS: [&str; 3] = ["gcptey", "vdwk2d", "wplcez"];

const COLOR_PALETTE: [&str; 7] = ["blue", "red", "green", "orange", "purple", "teal", "brown"];

const KNOWN_NAMES: [(&str, &str); 3] = [
    ("gcptey", "Melbourne"),
    ("vdwk2d", "Bramham"),
    ("wplcez", "Bromont"),
];

/// Describes one course: where its geometry lives and how it is drawn.
///
/// Everything but the color is fixed once the descriptor is created.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    pub id: String,
    pub display_name: String,
    pub source_url: String,
    pub color: String,
    /// A reference route is the flat baseline course: its elevation is
    /// always zero, regardless of the payload or the elevation service.
    pub reference: bool,
}

impl RouteDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        source_url: impl Into<String>,
        color: impl Into<String>,
    ) -> RouteDescriptor {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            source_url: source_url.into(),
            color: color.into(),
            reference: false,
        }
    }

    pub fn with_reference(mut self, reference: bool) -> RouteDescriptor {
        self.reference = reference;
        self
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }
}

/// Builds the descriptors for the given course ids, in order.
///
/// Colors cycle through a fixed palette and unknown ids are named after the id.
pub fn descriptors_from_ids<S: AsRef<str>>(ids: &[S], base_url: &str) -> Vec<RouteDescriptor> {
    let base_url = base_url.trim_end_matches('/');

    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .enumerate()
        .map(|(index, id)| {
            let display_name = KNOWN_NAMES
                .iter()
                .find(|(known_id, _)| *known_id == id)
                .map(|(_, name)| (*name).to_owned())
                .unwrap_or_else(|| format!("Course {id}"));

            RouteDescriptor::new(
                id,
                display_name,
                format!("{base_url}/courses/{id}/geometries"),
                COLOR_PALETTE[index % COLOR_PALETTE.len()],
            )
        })
        .collect()
}
