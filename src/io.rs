use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use tempfile::tempfile_in;
use thiserror::Error;

use crate::pool::{OffsetRecord, Pool};

/// Sequences read from a plain sequence list, in file order.
#[derive(Debug, Default, PartialEq)]
pub struct SequenceList {
    pub sequences: Vec<String>,
    /// `None` when no line carried a name
    pub names: Option<Vec<Option<String>>>,
}

impl SequenceList {
    pub fn names(&self) -> Option<&[Option<String>]> {
        self.names.as_deref()
    }
}

/// Reads a sequence list. Each line is either `SEQUENCE` or
/// `SEQUENCE<TAB>NAME`; lines starting with `#` and blank lines are skipped.
///
/// # Errors
///
/// This function will return an error if:
/// * The file cannot be opened or read.
/// * A line has more than two tab-separated fields.
/// * A line has an empty name field, which the ranges file could not tell apart from
///   no name at all.
pub fn read_sequences(path: &str) -> Result<SequenceList> {
    let file = File::open(path).with_context(|| format!("Unable to open file {path}"))?;
    read_sequences_from(file)
}

pub fn read_sequences_from(reader: impl Read) -> Result<SequenceList> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut sequences = Vec::new();
    let mut names = Vec::new();
    let mut any_named = false;

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        match record.len() {
            1 => names.push(None),
            2 if record[1].is_empty() => bail!(InputErr::EmptyName { line }),
            2 => {
                any_named = true;
                names.push(Some(record[1].to_string()));
            }
            _ => bail!(InputErr::InvalidRow {
                line,
                row: record.iter().collect::<Vec<_>>().join("\t"),
            }),
        }
        sequences.push(record[0].to_string());
    }

    debug!("Read {} sequences", sequences.len());

    Ok(SequenceList {
        sequences,
        names: any_named.then_some(names),
    })
}

/// Writes the raw pool bytes to `path`.
pub fn write_pool(path: &str, pool: &Pool) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("Unable to create {path}"))?;
    file.write_all(pool.as_bytes())
        .with_context(|| format!("Unable to write pool to {path}"))?;
    Ok(())
}

/// Information about a build, stored as the first line of a ranges file.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct RangesFileMetadata {
    pub dnapool_version: String,
    pub input_path: String,
    pub pool_path: String,
    pub build_date: String,
    pub elapsed: f64,
    pub sequence_count: usize,
    pub pool_len: usize,
}

pub struct RangesWriter {
    wtr: Writer<File>,
    temp_file: File,
    out_file: String,
    pub metadata: RangesFileMetadata,
}

impl RangesWriter {
    /// Create a RangesWriter from a desired output path. Records are first written to a
    /// temporary file in the same directory as the output path, since the metadata line
    /// is only complete once every record has been seen.
    pub fn new(path: &str) -> Result<Self> {
        let mut tempfile_dir = std::path::absolute(path)?;
        tempfile_dir.pop();

        let temp_file = tempfile_in(tempfile_dir)?;

        let wtr = WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(temp_file.try_clone()?);

        Ok(RangesWriter {
            wtr,
            temp_file,
            out_file: path.to_string(),
            metadata: RangesFileMetadata {
                dnapool_version: crate::cli::VERSION.to_string(),
                build_date: format!("{:?}", chrono::offset::Local::now()),
                ..RangesFileMetadata::default()
            },
        })
    }

    pub fn write_record(&mut self, rec: &OffsetRecord) -> csv::Result<()> {
        self.wtr.serialize(rec)
    }

    /// Flushes the records, then writes the metadata line followed by the records to the
    /// final output file.
    pub fn finish_write(&mut self) -> Result<()> {
        info!("Writing ranges to {}...", self.out_file);

        self.wtr.flush()?;

        let mut wtr_out = File::create(&self.out_file)
            .with_context(|| format!("Unable to create {}", self.out_file))?;
        writeln!(wtr_out, "#{}", serde_json::to_string(&self.metadata)?)?;

        self.temp_file.seek(std::io::SeekFrom::Start(0))?;
        std::io::copy(&mut self.temp_file, &mut wtr_out)?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct RangesReader {
    path: String,
    pub metadata: RangesFileMetadata,
}

impl RangesReader {
    pub fn from_path(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Unable to open file {path}"))?;
        let mut file = BufReader::new(file);
        let metadata = read_metadata(&mut file, path)?;

        Ok(Self {
            path: path.to_string(),
            metadata,
        })
    }

    /// Reads every record of the ranges file.
    pub fn records(&self) -> Result<Vec<OffsetRecord>> {
        let file = File::open(&self.path)?;
        let mut file = BufReader::new(file);
        read_metadata(&mut file, &self.path)?;

        let rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(file);

        let records = rdr
            .into_deserialize()
            .collect::<csv::Result<Vec<OffsetRecord>>>()
            .with_context(|| format!("Malformed ranges file {}", self.path))?;
        Ok(records)
    }
}

fn read_metadata(file: &mut impl BufRead, path: &str) -> Result<RangesFileMetadata> {
    let mut header = String::new();

    // the first line is NOT in CSV format
    file.read_line(&mut header)
        .context("Could not read the first line")?;

    let Some(json) = header.strip_prefix('#') else {
        bail!(InputErr::MissingMetadata {
            path: path.to_string()
        });
    };
    serde_json::from_str(json.trim_end()).context("Could not parse ranges metadata")
}

#[derive(Error, Debug)]
enum InputErr {
    #[error(
        "invalid row at line {line}: should be of the format
  `SEQUENCE`
or
  `SEQUENCE<TAB>NAME`, but instead got
{row}"
    )]
    InvalidRow { line: u64, row: String },

    #[error("{path} does not start with a `#` metadata line; is it a ranges file?")]
    MissingMetadata { path: String },

    #[error("empty name at line {line}: drop the trailing tab to leave the sequence unnamed")]
    EmptyName { line: u64 },
}
