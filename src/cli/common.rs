//! Shared clap helper types for the CLI.

use clap::{Args, ValueEnum};

/// Output file forms; each one appends its extension to `--out`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputForm {
    Svg,
    Png,
}

impl OutputForm {
    pub fn extension(self) -> &'static str {
        match self {
            OutputForm::Svg => "svg",
            OutputForm::Png => "png",
        }
    }
}

/// Rendering switches. Each `--x` has a matching `--no-x`; the last one wins.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct Switches {
    /// Flatten printed material to a raster image
    #[arg(long, overrides_with = "no_flatten")]
    pub flatten: bool,
    /// Keep printed material as vector text
    #[arg(long, overrides_with = "flatten")]
    pub no_flatten: bool,
    /// Print all the character cell boundaries
    #[arg(long, overrides_with = "no_cell_boundaries")]
    pub cell_boundaries: bool,
    /// Don't print the character cell boundaries
    #[arg(long, overrides_with = "cell_boundaries")]
    pub no_cell_boundaries: bool,
    /// Print all the punch hole location boundaries
    #[arg(long, overrides_with = "no_punch_boundaries")]
    pub punch_boundaries: bool,
    /// Don't print the punch hole location boundaries
    #[arg(long, overrides_with = "punch_boundaries")]
    pub no_punch_boundaries: bool,
    /// Print filled boxes for punched holes
    #[arg(long, overrides_with = "no_print_punch")]
    pub print_punch: bool,
    /// Don't print boxes for punched holes
    #[arg(long, overrides_with = "print_punch")]
    pub no_print_punch: bool,
}

impl Switches {
    /// Compact `+name`/`-name` listing for status lines.
    pub fn summary(&self) -> String {
        [
            ("flatten", self.flatten),
            ("cellboundaries", self.cell_boundaries),
            ("punchboundaries", self.punch_boundaries),
            ("printpunch", self.print_punch),
        ]
        .iter()
        .map(|(name, on)| format!("{}{}", if *on { '+' } else { '-' }, name))
        .collect::<Vec<_>>()
        .join(",")
    }
}
