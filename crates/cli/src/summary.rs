use xcprofile_vis::AxisBounds;

use crate::cli::SummaryArgs;
use crate::error::CliError;
use crate::fetch::load_profiles;

pub(crate) fn summary(args: SummaryArgs) -> Result<(), CliError> {
    let requested = args.source.descriptors().len();
    let profiles = load_profiles(&args.source)?;

    println!(
        "{:<10} {:<20} {:>8} {:>12} {:>10} {:>10}",
        "id", "name", "samples", "distance", "min elev", "max elev"
    );

    for profile in &profiles {
        println!(
            "{:<10} {:<20} {:>8} {:>9.2} km {:>8.1} m {:>8.1} m",
            profile.descriptor.id,
            profile.descriptor.display_name,
            profile.samples.len(),
            profile.total_distance_km,
            profile.min_elevation_m().unwrap_or_default(),
            profile.max_elevation_m().unwrap_or_default(),
        );
    }

    let bounds = AxisBounds::from_profiles(&profiles, args.range.elevation_range());
    println!("\n{}", footer(profiles.len(), requested, &bounds));

    Ok(())
}

fn footer(loaded: usize, requested: usize, bounds: &AxisBounds) -> String {
    format!(
        "{loaded} of {requested} course(s) loaded; axis bounds: distance 0.00 to {:.2} km, elevation {:.1} to {:.1} m",
        bounds.max_distance_km, bounds.min_elevation_m, bounds.max_elevation_m
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;
    use crate::cli::Commands;

    #[test]
    fn footer_counts_requested_courses_without_blank_ids() {
        let cli = Cli::try_parse_from(["xcprofile", "summary", "--ids", "gcptey,,vdwk2d, "]).unwrap();
        let Commands::Summary(args) = cli.command else {
            panic!("expected the summary command");
        };
        let bounds = AxisBounds::new(4.5, -2.0, 37.3);

        let actual = footer(1, args.source.descriptors().len(), &bounds);

        assert_eq!(
            actual,
            "1 of 2 course(s) loaded; axis bounds: distance 0.00 to 4.50 km, elevation -2.0 to 37.3 m"
        );
    }
}
