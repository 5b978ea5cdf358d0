use tracing::info;
use tracing::warn;
use xcprofile_vis::Dimensions;
use xcprofile_vis::OutputFile;
use xcprofile_vis::ProfileChart;

use crate::cli::PathExt;
use crate::cli::RenderArgs;
use crate::error::CliError;
use crate::fetch::load_profiles;

pub(crate) fn render(args: RenderArgs) -> Result<(), CliError> {
    let output_path = args.output_path.or_current_dir()?;

    println!(
        "xcprofile fetches {} course(s) from: `{}` and generates an elevation chart in: `{}`",
        args.source.descriptors().len(),
        args.source.base_url,
        output_path.display()
    );

    let profiles = load_profiles(&args.source)?;
    if profiles.is_empty() {
        warn!("no course could be loaded, the chart will be empty");
    }

    let mut chart = ProfileChart::new(profiles)
        .with_dimensions(Dimensions::new(args.width, args.height))
        .with_elevation_range(args.range.elevation_range());

    for color_override in &args.colors {
        if !chart.set_color(&color_override.route_id, &color_override.color) {
            warn!(
                route = %color_override.route_id,
                "ignoring the color override of a course that is not loaded"
            );
        }
    }

    let mut output = OutputFile::new(&output_path)?;
    chart.render(&mut output)?;
    let index_path = output.finish()?;

    info!(path = %index_path.display(), "elevation chart written");

    Ok(())
}
