use crate::{error::KineticError, simulation::state::TrajectorySelection};
use csv::Writer;
use std::fs;
use std::io;
use std::path::Path;

const TIME_COLUMN: &str = "time";

/// Writes trajectory selections as CSV: a `time` column followed by one column
/// per species, one record per trajectory row.
pub struct TrajectoryWriter<W: io::Write> {
    writer: Writer<W>,
}

impl TrajectoryWriter<fs::File> {
    pub fn create(path: &Path) -> Result<Self, io::Error> {
        let file = fs::File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: io::Write> TrajectoryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::from_writer(inner),
        }
    }

    pub fn write(&mut self, selection: &TrajectorySelection) -> Result<(), csv::Error> {
        let header = std::iter::once(TIME_COLUMN).chain(selection.names());
        self.writer.write_record(header)?;

        for (i, time) in selection.times.iter().enumerate() {
            let record = std::iter::once(*time)
                .chain(selection.row(i))
                .map(|value| value.to_string());
            self.writer.write_record(record)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Exports `selection` to a CSV file at `path`.
pub fn export_csv(selection: &TrajectorySelection, path: &Path) -> Result<(), KineticError> {
    let display = path.display().to_string();
    let mut writer = TrajectoryWriter::create(path).map_err(|e| KineticError::FileIO(display.clone(), e))?;
    writer
        .write(selection)
        .map_err(|e| KineticError::CsvError(display, e))
}
