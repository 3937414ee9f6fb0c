//! This module handles a TOML settings file. Every key is optional, an
//! absent file means default settings.

use crate::errors::*;
use crate::render::{CurlScale, PlotStyle};
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

const DEFAULT_LEVELS: usize = 10;
const DEFAULT_CURL_SCALE: CurlScale = CurlScale::Log10Magnitude;
const DEFAULT_OUTPUT_FORMAT: OutputFormat = OutputFormat::MsgPack;
const DEFAULT_OUTPUT_STEM: &str = "diagnostics";

/// Structure that holds settings, which are defined externally in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub plot: PlotSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Holds plot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotSettings {
    /// Number of filled contour bands
    #[serde(default = "default_levels")]
    pub levels: usize,
    #[serde(default = "default_curl_scale")]
    pub curl_scale: CurlScale,
    #[serde(default)]
    pub style: PlotStyle,
}

impl Default for PlotSettings {
    fn default() -> PlotSettings {
        PlotSettings {
            levels: default_levels(),
            curl_scale: default_curl_scale(),
            style: PlotStyle::default(),
        }
    }
}

fn default_levels() -> usize {
    DEFAULT_LEVELS
}

fn default_curl_scale() -> CurlScale {
    DEFAULT_CURL_SCALE
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    CBOR,
    Bincode,
    MsgPack,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::CBOR => "cbor",
            OutputFormat::Bincode => "bincode",
            OutputFormat::MsgPack => "msgpack",
        }
    }
}

/// Holds output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Destination of the figure file. Defaults to `diagnostics.<format>` in
    /// the working directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> OutputSettings {
        OutputSettings {
            path: None,
            format: default_output_format(),
        }
    }
}

impl OutputSettings {
    pub fn destination(&self) -> PathBuf {
        match self.path {
            Some(ref p) => p.clone(),
            None => PathBuf::from(DEFAULT_OUTPUT_STEM).with_extension(self.format.extension()),
        }
    }
}

/// Default output format
fn default_output_format() -> OutputFormat {
    DEFAULT_OUTPUT_FORMAT
}

impl Settings {
    /// Replaces file values by the ones given on the command line and checks
    /// the result.
    pub fn with_overrides(
        mut self,
        levels: Option<usize>,
        output: Option<PathBuf>,
        format: Option<OutputFormat>,
    ) -> Result<Settings> {
        if let Some(n) = levels {
            self.plot.levels = n;
        }
        if let Some(p) = output {
            self.output.path = Some(p);
        }
        if let Some(f) = format {
            self.output.format = f;
        }

        check_settings(&self)?;

        Ok(self)
    }
}

/// Reads the content of a file `filename` into an string and return it.
fn read_from_file(filename: &Path) -> Result<String> {
    let mut f = File::open(filename)
        .chain_err(|| format!("Unable to open file '{}'.", filename.display()))?;
    let mut content = String::new();

    f.read_to_string(&mut content)
        .chain_err(|| format!("Unable to read file '{}'.", filename.display()))?;

    Ok(content)
}

/// Reads content of a file `param_file`, that should point to a valid TOML
/// file, and parses it.
/// Then returns the deserialized data in form of a Settings struct.
pub fn read_parameter_file(param_file: &Path) -> Result<Settings> {
    // read .toml file into string
    let toml_string = read_from_file(param_file).chain_err(|| "Unable to read parameter file.")?;

    let settings: Settings =
        toml::from_str(&toml_string).chain_err(|| "Unable to parse parameter file.")?;

    check_settings(&settings)?;

    Ok(settings)
}

pub fn check_settings(s: &Settings) -> Result<()> {
    if s.plot.levels == 0 {
        bail!("Number of contour levels must be at least 1.")
    }

    let (w, h) = s.plot.style.figure_size;
    if !(w > 0. && h > 0.) {
        bail!("Figure size is invalid. Must be bigger than 0: {:?}", (w, h))
    }

    Ok(())
}
