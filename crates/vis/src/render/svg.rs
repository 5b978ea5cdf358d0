use std::fmt::Write;

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

impl Render for Scene {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        output.write(&format!(
            r#"<svg id="elevation" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" preserveAspectRatio="xMidYMid meet">"#,
            width = self.width,
            height = self.height,
        ))?;

        for element in &self.elements {
            element.render(output)?;
        }

        output.write("</svg>")
    }
}

impl Render for ElementKind {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        match self {
            ElementKind::Group(g) => g.render(output),
            ElementKind::Line(l) => l.render(output),
            ElementKind::Text(t) => t.render(output),
            ElementKind::Polyline(p) => p.render(output),
            ElementKind::Polygon(p) => p.render(output),
            ElementKind::Circle(c) => c.render(output),
        }
    }
}

impl Render for Group {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        output.write(&format!(
            r#"<g class="{class}" data-route="{route}">"#,
            class = self.class,
            route = escape(&self.route_id),
        ))?;

        for element in &self.elements {
            element.render(output)?;
        }

        output.write("</g>")
    }
}

impl Render for Line {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        output.write(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="{}"/>"#,
            self.from.0, self.from.1, self.to.0, self.to.1, self.class
        ))
    }
}

impl Render for Text {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let (x, y) = self.position;
        let anchor = match self.anchor {
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let transform = self
            .rotation
            .map(|angle| format!(r#" transform="rotate({angle} {x:.2},{y:.2})""#))
            .unwrap_or_default();

        output.write(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}"{transform} class="{class}">{content}</text>"#,
            class = self.class,
            content = escape(&self.content),
        ))
    }
}

impl Render for Polyline {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        output.write(&format!(
            r#"<polyline points="{points}" stroke="{stroke}" fill="none" class="{class}"/>"#,
            points = points(&self.points),
            stroke = escape(&self.stroke),
            class = self.class,
        ))
    }
}

impl Render for Polygon {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        output.write(&format!(
            r#"<polygon points="{points}" fill="{fill}" fill-opacity="{opacity}" stroke="none" class="{class}"/>"#,
            points = points(&self.points),
            fill = escape(&self.fill),
            opacity = self.opacity,
            class = self.class,
        ))
    }
}

impl Render for Circle {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let (cx, cy) = self.center;

        output.write(&format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{radius}" fill="{fill}" opacity="{opacity}" class="{class}" data-name="{name}" data-distance="{distance}" data-elevation="{elevation}"/>"#,
            radius = self.radius,
            fill = escape(&self.fill),
            opacity = self.opacity,
            class = self.class,
            name = escape(&self.tooltip.route_name),
            distance = escape(&self.tooltip.distance),
            elevation = escape(&self.tooltip.elevation),
        ))
    }
}

fn points(points: &[(f64, f64)]) -> String {
    let mut buffer = String::with_capacity(points.len() * 16);

    for (index, (x, y)) in points.iter().enumerate() {
        if index > 0 {
            buffer.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(buffer, "{x:.2},{y:.2}");
    }

    buffer
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }

    escaped
}
