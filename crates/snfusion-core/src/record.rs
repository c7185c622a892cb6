use crate::config::EngineConfig;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Marker prefixing the metadata line at the head of the output stream.
pub const METADATA_MARKER: &str = "# snfusion-gen=";

/// Column delimiter of the data rows.
pub const DELIMITER: char = ';';

/// Streams one run to a sink: a single metadata line followed by one
/// delimited abundance row per emitted state.
///
/// Write failures are not recoverable for the run; the engine propagates the
/// first error and stops iterating, leaving any rows already written as the
/// valid partial output.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    w: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    /// Write the metadata line: the marker immediately followed by the JSON
    /// serialization of the run configuration.
    pub fn write_metadata(&mut self, config: &EngineConfig) -> io::Result<()> {
        let hdr = serde_json::to_string(config).map_err(io::Error::other)?;
        writeln!(self.w, "{METADATA_MARKER}{hdr}")
    }

    /// Write one abundance row, one integer per tracked species.
    pub fn write_row(&mut self, values: &[u64]) -> io::Result<()> {
        let mut first = true;
        for v in values {
            if !first {
                write!(self.w, "{DELIMITER}")?;
            }
            write!(self.w, "{v}")?;
            first = false;
        }
        writeln!(self.w)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    /// No line carrying the metadata marker before the first data row.
    MissingMetadata,
    Metadata(serde_json::Error),
    InvalidValue {
        row: usize,
        value: String,
    },
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Fewer data rows than the metadata promised.
    Truncated {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "i/o error reading run stream: {err}"),
            ReadError::MissingMetadata => {
                write!(f, "could not find metadata line ({METADATA_MARKER:?})")
            }
            ReadError::Metadata(err) => write!(f, "malformed metadata record: {err}"),
            ReadError::InvalidValue { row, value } => {
                write!(f, "row {row}: invalid abundance value {value:?}")
            }
            ReadError::ColumnCountMismatch {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {row}: expected {expected} columns, found {actual}"
            ),
            ReadError::Truncated { expected, actual } => write!(
                f,
                "truncated stream: expected {expected} data rows, found {actual}"
            ),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(err) => Some(err),
            ReadError::Metadata(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err)
    }
}

/// A fully parsed run stream: the configuration from the metadata line plus
/// `num_iters + 1` abundance rows, one column per tracked species.
///
/// This is the consumer-side counterpart of [`RecordWriter`], the contract
/// downstream plotting tools rely on.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRecord {
    pub config: EngineConfig,
    pub rows: Vec<Vec<u64>>,
}

impl RunRecord {
    pub fn read<R: BufRead>(r: R) -> Result<Self, ReadError> {
        let mut lines = r.lines();

        // Scan leading comment lines for the metadata marker; hitting a data
        // row first means the stream has no header.
        let mut config: Option<EngineConfig> = None;
        for line in lines.by_ref() {
            let line = line?;
            if let Some(hdr) = line.strip_prefix(METADATA_MARKER) {
                config = Some(serde_json::from_str(hdr).map_err(ReadError::Metadata)?);
                break;
            }
            if !line.starts_with('#') {
                break;
            }
        }
        let Some(config) = config else {
            return Err(ReadError::MissingMetadata);
        };

        let expected_rows = config.num_iters + 1;
        let columns = config.species.len();
        let mut rows = Vec::with_capacity(expected_rows);
        for line in lines {
            let line = line?;
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            let row = Self::parse_row(&line, rows.len(), columns)?;
            rows.push(row);
            if rows.len() == expected_rows {
                break;
            }
        }
        if rows.len() < expected_rows {
            return Err(ReadError::Truncated {
                expected: expected_rows,
                actual: rows.len(),
            });
        }
        Ok(Self { config, rows })
    }

    fn parse_row(line: &str, row: usize, columns: usize) -> Result<Vec<u64>, ReadError> {
        let values = line
            .split(DELIMITER)
            .map(|field| {
                field.parse::<u64>().map_err(|_| ReadError::InvalidValue {
                    row,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<u64>, ReadError>>()?;
        if values.len() != columns {
            return Err(ReadError::ColumnCountMismatch {
                row,
                expected: columns,
                actual: values.len(),
            });
        }
        Ok(values)
    }

    /// Time series for the species column `i`, one value per emitted row.
    pub fn series(&self, i: usize) -> impl Iterator<Item = u64> + '_ {
        self.rows.iter().map(move |row| row[i])
    }
}
