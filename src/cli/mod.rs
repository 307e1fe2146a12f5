//! Command-line interface wiring for the `puncher` binary.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use log::debug;
use puncher::{
    CardModel, DEFAULT_MANUFACTURER, Margins, RASTER_SCALE, Rasterize, RenderOptions,
    ResvgRasterizer, TEST_PATTERN, WHITE,
};

pub mod common;
pub mod utils;

use common::{OutputForm, Switches};
use utils::{console_error, console_message, output_path, write_output};

const EXAMPLES: &str = "\
EXAMPLES:

  Generate the first line of a TLE and output both SVG and PNG forms to iss_tle_1.[png,svg]
  $ puncher --form svg --form png --out iss_tle_1 \\
    --cstring \"1 25544U 98067A   25324.86734766  .00014275  00000-0  26737-3 0  9990\"

  Generate the same card as SVG, flattening printed material to raster
  $ puncher --form svg --out iss_tle_1_flat --flatten \\
    --cstring \"1 25544U 98067A   25324.86734766  .00014275  00000-0  26737-3 0  9990\"

Set PUNCHER_DEBUG=debug for diagnostic logging on stderr.";

/// Creates an image of an IBM 80-column punch card. The SVG output keeps
/// cut-lines as vector paths so it can be sent to a cutting machine such as a
/// Cricut or Silhouette Cameo.
#[derive(Parser, Debug)]
#[command(name = "puncher", version, about, after_help = EXAMPLES)]
#[command(group(ArgGroup::new("content").required(true).args(["cstring", "testpattern"])))]
pub struct Cli {
    /// Output path stem; .svg or .png is appended per --form
    #[arg(long)]
    pub out: PathBuf,
    /// Output file form(s), repeatable [default: svg]
    #[arg(long = "form", value_enum)]
    pub forms: Vec<OutputForm>,
    /// String to print on the card
    #[arg(long)]
    pub cstring: Option<String>,
    /// Print a test pattern with every encodable character
    #[arg(long)]
    pub testpattern: bool,
    /// Manufacturer line printed along the bottom edge
    #[arg(long)]
    pub manufacturer: Option<String>,
    /// Blank margin around the card, in inches
    #[arg(long, default_value_t = 0.5)]
    pub margin: f64,
    /// Also write a JSON report of every punched hole
    #[arg(long)]
    pub report: Option<PathBuf>,
    #[command(flatten)]
    pub switches: Switches,
}

impl Cli {
    fn content(&self) -> &str {
        if self.testpattern {
            TEST_PATTERN
        } else {
            self.cstring.as_deref().unwrap_or_default()
        }
    }

    fn forms(&self) -> Vec<OutputForm> {
        let mut forms = self.forms.clone();
        if forms.is_empty() {
            forms.push(OutputForm::Svg);
        }
        forms.sort();
        forms.dedup();
        forms
    }

    fn render_options(&self) -> Result<RenderOptions> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            bail!("margin must be a non-negative number of inches, got {}", self.margin);
        }
        Ok(RenderOptions {
            flatten: self.switches.flatten,
            show_cell_boundaries: self.switches.cell_boundaries,
            show_punch_boundaries: self.switches.punch_boundaries,
            show_punch_boxes: self.switches.print_punch,
            margins: Margins::uniform(self.margin),
        })
    }
}

/// Loads system fonts only when something will be rasterized.
fn rasterizer_for(needs_raster: bool) -> ResvgRasterizer {
    if needs_raster {
        ResvgRasterizer::new()
    } else {
        debug!("vector output only; skipping font discovery");
        ResvgRasterizer::without_fonts()
    }
}

/// Execute the requested render.
pub fn run(cli: Cli) -> Result<()> {
    let options = cli.render_options()?;
    let forms = cli.forms();
    let content = cli.content();
    console_message(&format!(
        "creating punchcard with content: \"{}\", switches={}",
        content,
        cli.switches.summary()
    ));
    debug!("puncher with arguments: {:?}", cli);

    let model = CardModel::with_manufacturer(
        content,
        cli.manufacturer.as_deref().unwrap_or(DEFAULT_MANUFACTURER),
    );

    let needs_raster = options.flatten || forms.contains(&OutputForm::Png);
    let rasterizer = rasterizer_for(needs_raster);
    if needs_raster && !rasterizer.has_fonts() {
        console_error("no system fonts found; printed text will be missing from raster output");
    }

    let document = model
        .render(&options, &rasterizer)
        .context("failed to render punch card")?;

    let svg = document.to_svg_string();
    for form in forms {
        let path = output_path(&cli.out, form.extension());
        console_message(&format!(
            "writing {} to: {}",
            form.extension().to_uppercase(),
            path.display()
        ));
        match form {
            OutputForm::Svg => write_output(&path, svg.as_bytes())?,
            OutputForm::Png => {
                let png = rasterizer
                    .rasterize(&svg, RASTER_SCALE, WHITE)
                    .context("failed to rasterize card")?;
                write_output(&path, &png)?;
            }
        }
    }

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&model.report())?;
        console_message(&format!("writing report to: {}", path.display()));
        write_output(path, json.as_bytes())?;
    }
    Ok(())
}
