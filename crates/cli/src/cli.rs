use std::env;
use std::path::PathBuf;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use xcprofile_course::RouteDescriptor;
use xcprofile_course::descriptor::DEFAULT_BASE_URL;
use xcprofile_course::descriptor::DEFAULT_ROUTE_IDS;
use xcprofile_course::descriptor::descriptors_from_ids;
use xcprofile_vis::ElevationRange;
use xcprofile_vis::Margin;

use crate::error::CliError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Increase the log verbosity; `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch the courses and render their elevation profiles as an HTML chart.
    Render(RenderArgs),
    /// Fetch the courses and print a summary of their elevation profiles.
    Summary(SummaryArgs),
}

#[derive(Args)]
pub(crate) struct SourceArgs {
    /// The comma-separated ids of the courses to load.
    #[arg(short, long, value_delimiter = ',', default_values = DEFAULT_ROUTE_IDS)]
    pub(crate) ids: Vec<String>,

    /// The base URL of the course geometry API.
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    pub(crate) base_url: String,

    /// The id of a flat reference course, drawn at zero elevation throughout.
    /// Can be given more than once.
    #[arg(short, long = "reference", value_name = "ID")]
    pub(crate) references: Vec<String>,

    /// The API key of the Google Maps Elevation API.
    ///
    /// When given, the elevation of every point is looked up instead of
    /// being read from the course geometry.
    #[arg(short = 'k', long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub(crate) elevation_api_key: Option<String>,
}

impl SourceArgs {
    pub(crate) fn descriptors(&self) -> Vec<RouteDescriptor> {
        descriptors_from_ids(&self.ids, &self.base_url)
            .into_iter()
            .map(|descriptor| {
                let reference = self.references.contains(&descriptor.id);
                descriptor.with_reference(reference)
            })
            .collect()
    }
}

#[derive(Args)]
pub(crate) struct RangeArgs {
    /// Specify how the elevation axis range is derived.
    #[arg(short = 'e', long, value_enum, default_value_t = RangeKind::Raw)]
    pub(crate) elevation_range: RangeKind,

    /// The elevation in meters the axis minimum is lowered to with the
    /// `floor` range.
    #[arg(long, default_value_t = 5.0)]
    pub(crate) elevation_floor: f64,
}

impl RangeArgs {
    pub(crate) fn elevation_range(&self) -> ElevationRange {
        match self.elevation_range {
            RangeKind::Raw => ElevationRange::Raw,
            RangeKind::Floor => ElevationRange::Floor(self.elevation_floor),
            RangeKind::Symmetric => ElevationRange::Symmetric,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub(crate) enum RangeKind {
    /// The minimum and maximum elevation of all samples.
    Raw,
    /// The raw range with the minimum lowered to the elevation floor.
    Floor,
    /// A range centered on zero elevation.
    Symmetric,
}

#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,

    #[command(flatten)]
    pub(crate) range: RangeArgs,

    /// Specify the path where the generated chart will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) output_path: Option<PathBuf>,

    /// The width of the chart's view box; it must exceed the horizontal margins.
    #[arg(long, default_value_t = 800.0, value_parser(parse_width))]
    pub(crate) width: f64,

    /// The height of the chart's view box; it must exceed the vertical margins.
    #[arg(long, default_value_t = 300.0, value_parser(parse_height))]
    pub(crate) height: f64,

    /// Override the color of a course, as `ID=COLOR`. Can be given more than once.
    #[arg(short, long = "color", value_name = "ID=COLOR", value_parser(parse_color_override))]
    pub(crate) colors: Vec<ColorOverride>,
}

#[derive(Args)]
pub(crate) struct SummaryArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,

    #[command(flatten)]
    pub(crate) range: RangeArgs,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ColorOverride {
    pub(crate) route_id: String,
    pub(crate) color: String,
}

fn parse_color_override(value: &str) -> Result<ColorOverride, String> {
    let Some((route_id, color)) = value.split_once('=') else {
        return Err(format!("The `{value}` color override must have the `ID=COLOR` form."));
    };

    let (route_id, color) = (route_id.trim(), color.trim());
    if route_id.is_empty() || color.is_empty() {
        return Err(format!(
            "The `{value}` color override must name both a course id and a color."
        ));
    }

    Ok(ColorOverride {
        route_id: route_id.to_owned(),
        color: color.to_owned(),
    })
}

fn parse_width(value: &str) -> Result<f64, String> {
    let margin = Margin::default();
    parse_extent(value, "width", margin.left + margin.right)
}

fn parse_height(value: &str) -> Result<f64, String> {
    let margin = Margin::default();
    parse_extent(value, "height", margin.top + margin.bottom)
}

fn parse_extent(value: &str, name: &str, margins: f64) -> Result<f64, String> {
    let extent: f64 = value
        .parse()
        .map_err(|_| format!("The `{value}` {name} must be a number."))?;

    if !extent.is_finite() || extent <= margins {
        return Err(format!(
            "The `{value}` {name} must be greater than the {margins} px of margins."
        ));
    }

    Ok(extent)
}

fn parse_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_dir() {
        return Err(format!(
            "The `{}` path must point to a directory.",
            path.display()
        ));
    }

    Ok(path)
}

pub(crate) trait PathExt {
    fn or_current_dir(self) -> Result<PathBuf, CliError>;
}

impl PathExt for Option<PathBuf> {
    fn or_current_dir(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            Ok(path)
        } else {
            env::current_dir().map_err(|e| CliError::Path(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults_to_the_three_example_courses() {
        let cli = Cli::try_parse_from(["xcprofile", "render"]).unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };

        assert_eq!(args.source.ids, DEFAULT_ROUTE_IDS);
        assert_eq!(args.range.elevation_range(), ElevationRange::Raw);
        assert_eq!(args.width, 800.0);
    }

    #[test]
    fn source_args_split_ids_and_mark_references() {
        let cli = Cli::try_parse_from([
            "xcprofile",
            "summary",
            "--ids",
            "gcptey,abc123",
            "--reference",
            "abc123",
            "--elevation-range",
            "floor",
        ])
        .unwrap();

        let Commands::Summary(args) = cli.command else {
            panic!("expected the summary command");
        };
        let descriptors = args.source.descriptors();

        assert_eq!(descriptors.len(), 2);
        assert!(!descriptors[0].reference);
        assert!(descriptors[1].reference);
        assert_eq!(descriptors[1].display_name, "Course abc123");
        assert_eq!(args.range.elevation_range(), ElevationRange::Floor(5.0));
    }

    #[test]
    fn render_rejects_a_size_that_leaves_no_plot_area() {
        for args in [
            ["xcprofile", "render", "--width", "90"],
            ["xcprofile", "render", "--width", "-800"],
            ["xcprofile", "render", "--height", "80"],
            ["xcprofile", "render", "--height", "NaN"],
        ] {
            assert!(Cli::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn render_accepts_a_size_just_above_the_margins() {
        let cli = Cli::try_parse_from(["xcprofile", "render", "--width", "91", "--height", "80.5"])
            .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };

        assert_eq!(args.width, 91.0);
        assert_eq!(args.height, 80.5);
    }

    #[test]
    fn parse_color_override_splits_id_and_color() {
        let actual = parse_color_override("vdwk2d=#ff8800").unwrap();

        assert_eq!(
            actual,
            ColorOverride {
                route_id: String::from("vdwk2d"),
                color: String::from("#ff8800"),
            }
        );
    }

    #[test]
    fn parse_color_override_rejects_malformed_values() {
        assert!(parse_color_override("vdwk2d").is_err());
        assert!(parse_color_override("=red").is_err());
        assert!(parse_color_override("vdwk2d=").is_err());
    }
}
