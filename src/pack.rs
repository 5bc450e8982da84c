use anyhow::{Context, Result};

use crate::io::{self, RangesWriter};
use crate::pool::{self, Pool};
use crate::ranges::{self, Ranges};

/// Builds the pool, in parallel when `threads` is more than 1.
///
/// A `threads` value of 0 uses rayon's default thread count.
pub fn build_with_threads(
    sequences: &[String],
    names: Option<&[Option<String>]>,
    threads: usize,
) -> Result<(Pool, Ranges)> {
    if threads == 1 {
        return Ok(ranges::create_pool(sequences, names, Ranges::new)?);
    }

    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .with_context(|| format!("Unable to set the number of threads to {threads}"))?;

    let (pool, records) = thread_pool.install(|| pool::build_parallel(sequences, names))?;
    Ok((pool, ranges::into_ranges(records, &Ranges::new)))
}

/// Packs the sequence list at `infile` into a pool file and a ranges file.
///
/// # Arguments
///
/// * `infile` - path to the sequence list, see [`io::read_sequences`]
/// * `pool_out` - path the raw pool bytes are written to
/// * `ranges_out` - path the ranges file is written to
/// * `threads` - number of threads used to validate sequences
///
/// # Errors
///
/// This function will return an error if reading the input, building the pool,
/// or writing either output fails. Nothing is written if the build fails.
pub fn construct_pool(
    infile: &str,
    pool_out: &str,
    ranges_out: &str,
    threads: usize,
) -> Result<()> {
    // time everything!
    let now = std::time::Instant::now();

    let list = io::read_sequences(infile)?;
    info!("Read {} sequences from {infile}", list.sequences.len());

    let (pool, ranges) = build_with_threads(&list.sequences, list.names(), threads)
        .with_context(|| format!("Could not build a pool from {infile}"))?;

    let mut wtr = RangesWriter::new(ranges_out)?;
    wtr.metadata.input_path = std::fs::canonicalize(infile)
        .with_context(|| format!("Unable to resolve the path of {infile}"))?
        .display()
        .to_string();
    wtr.metadata.pool_path = pool_out.to_string();
    wtr.metadata.sequence_count = ranges.len();
    wtr.metadata.pool_len = pool.len();

    for rec in ranges.iter() {
        debug!("{rec:?}");
        wtr.write_record(&rec)?;
    }

    wtr.metadata.elapsed = now.elapsed().as_secs_f64();
    wtr.finish_write()?;

    // the pool goes last so a failed ranges write leaves no pool behind
    io::write_pool(pool_out, &pool)?;
    info!("Wrote {} bytes to {pool_out}", pool.len());

    info!(
        "Stats: {} sequences, {} bytes, {:.1}s runtime",
        wtr.metadata.sequence_count,
        wtr.metadata.pool_len,
        now.elapsed().as_secs_f64()
    );
    Ok(())
}
