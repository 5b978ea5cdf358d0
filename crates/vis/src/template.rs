use chrono::SecondsFormat;
use chrono::Utc;
use serde::Serialize;
use tinytemplate::TinyTemplate;
use xcprofile_course::RouteProfile;

use crate::error::Result;
use crate::render::OutputStream;

const INDEX_TEMPLATE: &str = "index";

/// The HTML page that hosts the chart, its legend and its tooltip.
#[derive(Serialize, Debug)]
pub(crate) struct Page {
    svg: String,
    legend: Vec<LegendEntry>,
    style: &'static str,
    script: &'static str,
    generated_at: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub(crate) struct LegendEntry {
    id: String,
    name: String,
    color: String,
    distance: String,
}

impl Page {
    pub(crate) fn new(profiles: &[RouteProfile], svg: String) -> Result<Page> {
        let legend = profiles
            .iter()
            .map(|profile| LegendEntry {
                id: profile.descriptor.id.clone(),
                name: profile.descriptor.display_name.clone(),
                color: profile.descriptor.color.clone(),
                distance: format!("{:.2} km", profile.total_distance_km),
            })
            .collect();

        Ok(Self {
            svg,
            legend,
            style: include_str!("./template/profile.css"),
            script: include_str!("./template/profile.js"),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    pub(crate) fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let mut template = TinyTemplate::new();
        template.add_template(INDEX_TEMPLATE, include_str!("./template/index.html.tt"))?;

        let text = template.render(INDEX_TEMPLATE, self)?;
        output.write(&text)
    }
}
