//! Sink that stores all plots of a run in one serialized file, to be drawn
//! by an external charting tool.

use super::{ContourPlot, ContourSink};
use crate::errors::*;
use crate::settings::{OutputFormat, Settings};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Content of a figure file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureDocument {
    /// Version of the crate that wrote the file.
    pub version: String,
    /// Dump the plots were computed from.
    pub source: String,
    pub settings: Settings,
    pub plots: Vec<ContourPlot>,
}

/// Collects plots in memory and writes them on `finish()`, so a failed run
/// leaves no file behind.
pub struct FigureFile {
    path: PathBuf,
    format: OutputFormat,
    document: FigureDocument,
}

impl FigureFile {
    pub fn new(path: &Path, source: &Path, settings: &Settings) -> FigureFile {
        FigureFile {
            path: path.to_path_buf(),
            format: settings.output.format,
            document: FigureDocument {
                version: crate::VERSION.to_string(),
                source: source.display().to_string(),
                settings: settings.clone(),
                plots: Vec::new(),
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn number_of_plots(&self) -> usize {
        self.document.plots.len()
    }
}

impl ContourSink for FigureFile {
    fn plot(&mut self, plot: ContourPlot) -> Result<()> {
        debug!("Queued plot '{}' for '{}'", plot.name, self.path.display());
        self.document.plots.push(plot);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let f = File::create(&self.path)
            .chain_err(|| format!("Unable to create file '{}'.", self.path.display()))?;
        let mut w = BufWriter::new(f);

        let doc = &self.document;
        match self.format {
            OutputFormat::CBOR => serde_cbor::to_writer(&mut w, doc)
                .chain_err(|| "CBOR, cannot encode figures.")?,
            OutputFormat::MsgPack => rmp_serde::encode::write_named(&mut w, doc)
                .chain_err(|| "MsgPack, cannot encode figures.")?,
            OutputFormat::Bincode => bincode::serialize_into(&mut w, doc)
                .chain_err(|| "Bincode, cannot encode figures.")?,
        }

        w.flush()
            .chain_err(|| format!("Unable to write file '{}'.", self.path.display()))?;

        info!(
            "Wrote {} plots to '{}'",
            self.document.plots.len(),
            self.path.display()
        );

        Ok(())
    }
}

/// Reads a file written by `FigureFile`.
pub fn read_figure_file(path: &Path, format: OutputFormat) -> Result<FigureDocument> {
    let f = File::open(path).chain_err(|| format!("Unable to open file '{}'.", path.display()))?;
    let mut r = BufReader::new(f);

    let doc = match format {
        OutputFormat::CBOR => {
            serde_cbor::from_reader(r).chain_err(|| "CBOR, cannot decode given file.")?
        }
        OutputFormat::MsgPack => {
            rmp_serde::from_read(r).chain_err(|| "MsgPack, cannot decode given file.")?
        }
        OutputFormat::Bincode => bincode::deserialize_from(&mut r)
            .chain_err(|| "Bincode, cannot decode given file.")?,
    };

    Ok(doc)
}
