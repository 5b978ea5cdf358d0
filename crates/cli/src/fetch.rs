pub(crate) mod client;
pub(crate) mod error;

use tracing::info;
use xcprofile_course::Loader;
use xcprofile_course::RouteProfile;

use crate::cli::SourceArgs;
use crate::error::CliError;
use crate::fetch::client::CourseClient;
use crate::fetch::client::ElevationClient;
use crate::fetch::client::http_client;

/// Fetches every requested route and derives its profile.
///
/// Routes that fail to load are logged and left out of the result.
pub(crate) fn load_profiles(args: &SourceArgs) -> Result<Vec<RouteProfile>, CliError> {
    let descriptors = args.descriptors();
    let client = http_client()?;
    let courses = CourseClient::new(client.clone());

    let profiles = match args.elevation_api_key {
        Some(ref api_key) => {
            info!("looking up elevations through the elevation service");
            let elevation = ElevationClient::new(client, api_key.clone());
            Loader::new(&courses)
                .with_elevation(&elevation)
                .load_all(&descriptors)
        }
        None => Loader::new(&courses).load_all(&descriptors),
    };

    Ok(profiles)
}
