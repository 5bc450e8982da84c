use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::alphabet;
use crate::error::{PoolError, Result};

/// All sequence bytes of a set, back to back with no separators.
///
/// Every byte is an uppercase member of [`alphabet::DNA_IUPAC_LETTERS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pool(Box<[u8]>);

impl Pool {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Box<[u8]> {
        self.0
    }
}

impl AsRef<[u8]> for Pool {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Locates one input sequence within a [`Pool`].
///
/// # Fields
///
/// * `start` - zero-based offset of the first byte in the pool
/// * `width` - number of bytes the sequence contributed
/// * `name` - the name supplied alongside the sequence, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRecord {
    pub start: usize,
    pub width: usize,
    pub name: Option<String>,
}

impl OffsetRecord {
    /// One past the last byte of this record in the pool.
    pub fn end(&self) -> usize {
        self.start + self.width
    }
}

/// Checks the names against the sequences and resolves them to one entry
/// per sequence. An empty slice means "no names".
fn resolve_names(
    n_sequences: usize,
    names: Option<&[Option<String>]>,
) -> Result<Option<&[Option<String>]>> {
    match names {
        None => Ok(None),
        Some([]) => Ok(None),
        Some(names) if names.len() != n_sequences => Err(PoolError::LengthMismatch {
            sequences: n_sequences,
            names: names.len(),
        }),
        Some(names) => Ok(Some(names)),
    }
}

fn name_at(names: Option<&[Option<String>]>, i: usize) -> Option<String> {
    names.and_then(|n| n[i].clone())
}

/// Packs `sequences` into a single pool, recording where each one landed.
///
/// Each sequence is uppercased and checked against the DNA alphabet as it is
/// appended. The first invalid character aborts the whole build and nothing
/// is returned but the error.
///
/// # Arguments
///
/// * `sequences` - the raw sequences, in order
/// * `names` - optional names, one per sequence. `None` or an empty slice
///   leaves every record unnamed.
///
/// # Errors
///
/// * [`PoolError::LengthMismatch`] if names are given for a different number
///   of sequences. This is checked before any sequence is read.
/// * [`PoolError::InvalidCharacter`] for the first character outside the
///   alphabet, carrying the sequence index and the uppercased character.
///
/// # Example
///
/// ```
/// let (pool, records) = dnapool::pool::build(&["acgt", "NNN"], None).unwrap();
/// assert_eq!(pool.as_bytes(), b"ACGTNNN");
/// assert_eq!(records[1].start, 4);
/// ```
pub fn build<S: AsRef<str>>(
    sequences: &[S],
    names: Option<&[Option<String>]>,
) -> Result<(Pool, Vec<OffsetRecord>)> {
    let names = resolve_names(sequences.len(), names)?;

    let total: usize = sequences.iter().map(|s| s.as_ref().len()).sum();
    let mut buffer = Vec::with_capacity(total);
    let mut records = Vec::with_capacity(sequences.len());
    let mut offset = 0usize;

    for (index, seq) in sequences.iter().enumerate() {
        let seq = seq.as_ref();
        let width = seq.len();

        alphabet::normalize_str_into(seq, &mut buffer)
            .map_err(|character| PoolError::InvalidCharacter { index, character })?;

        records.push(OffsetRecord {
            start: offset,
            width,
            name: name_at(names, index),
        });
        offset += width;
    }

    debug_assert_eq!(offset, buffer.len());
    Ok((Pool(buffer.into_boxed_slice()), records))
}

/// Same result as [`build`], with per-sequence normalization spread over the
/// current rayon thread pool.
///
/// Offsets and concatenation still happen in one sequential pass, so the
/// pool is byte-identical to what [`build`] produces. When several sequences
/// are invalid, the one with the lowest index is reported.
pub fn build_parallel<S: AsRef<str> + Sync>(
    sequences: &[S],
    names: Option<&[Option<String>]>,
) -> Result<(Pool, Vec<OffsetRecord>)> {
    let names = resolve_names(sequences.len(), names)?;

    let normalized: Vec<std::result::Result<Vec<u8>, char>> = sequences
        .par_iter()
        .map(|s| alphabet::normalize_str(s.as_ref()))
        .collect();

    let total = normalized
        .iter()
        .map(|r| r.as_ref().map_or(0, Vec::len))
        .sum();
    let mut buffer = Vec::with_capacity(total);
    let mut records = Vec::with_capacity(sequences.len());

    for (index, seq) in normalized.into_iter().enumerate() {
        let seq = seq.map_err(|character| PoolError::InvalidCharacter { index, character })?;

        records.push(OffsetRecord {
            start: buffer.len(),
            width: seq.len(),
            name: name_at(names, index),
        });
        buffer.extend_from_slice(&seq);
    }

    Ok((Pool(buffer.into_boxed_slice()), records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<Option<String>> {
        v.iter().map(|x| Some(x.to_string())).collect()
    }

    #[test]
    fn concatenates_and_uppercases() {
        let n = names(&["s1", "s2", "s3"]);
        let (pool, records) = build(&["acgt", "NNN", "A-C"], Some(n.as_slice())).unwrap();

        assert_eq!(pool.as_bytes(), b"ACGTNNNA-C");
        assert_eq!(
            records,
            vec![
                OffsetRecord { start: 0, width: 4, name: Some("s1".into()) },
                OffsetRecord { start: 4, width: 3, name: Some("s2".into()) },
                OffsetRecord { start: 7, width: 3, name: Some("s3".into()) },
            ]
        );
    }

    #[test]
    fn invalid_character() {
        let err = build(&["ACGT", "ACXT"], None).unwrap_err();
        assert_eq!(err, PoolError::InvalidCharacter { index: 1, character: 'X' });
        assert_eq!(
            err.to_string(),
            "sequence 1 contains invalid DNA character: 'X'"
        );
    }

    #[test]
    fn lowercase_invalid_reported_uppercased() {
        let err = build(&["acgu"], None).unwrap_err();
        assert_eq!(err, PoolError::InvalidCharacter { index: 0, character: 'U' });
    }

    #[test]
    fn empty_input() {
        let (pool, records) = build::<&str>(&[], None).unwrap();
        assert!(pool.is_empty());
        assert!(records.is_empty());

        let (pool, records) = build::<&str>(&[], Some(&[][..])).unwrap();
        assert!(pool.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn zero_width_sequence() {
        let (pool, records) = build(&["AC", "", "G"], None).unwrap();
        assert_eq!(pool.as_bytes(), b"ACG");
        assert_eq!(records[1], OffsetRecord { start: 2, width: 0, name: None });
        assert_eq!(records[2].start, 2);
    }

    #[test]
    fn name_count_mismatch() {
        let n = names(&["only"]);
        let err = build(&["AC", "GT"], Some(n.as_slice())).unwrap_err();
        assert_eq!(err, PoolError::LengthMismatch { sequences: 2, names: 1 });
    }

    #[test]
    fn mismatch_checked_before_characters() {
        let n = names(&["a", "b", "c"]);
        let err = build(&["XXXX"], Some(n.as_slice())).unwrap_err();
        assert!(matches!(err, PoolError::LengthMismatch { .. }));
    }

    #[test]
    fn empty_names_means_unnamed() {
        let (_, records) = build(&["A", "C"], Some(&[][..])).unwrap();
        assert!(records.iter().all(|r| r.name.is_none()));
    }

    #[test]
    fn partially_named() {
        let n = vec![None, Some("b".to_string())];
        let (_, records) = build(&["A", "C"], Some(n.as_slice())).unwrap();
        assert_eq!(records[0].name, None);
        assert_eq!(records[1].name.as_deref(), Some("b"));
    }

    #[test]
    fn parallel_matches_sequential() {
        let seqs: Vec<String> = (0..500)
            .map(|i| "acgtRYSWKMBDHVN-".repeat(i % 7))
            .collect();
        let n: Vec<Option<String>> = (0..500).map(|i| Some(format!("seq{i}"))).collect();

        let sequential = build(&seqs, Some(n.as_slice())).unwrap();
        let parallel = build_parallel(&seqs, Some(n.as_slice())).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn parallel_reports_lowest_index() {
        let mut seqs: Vec<String> = vec!["ACGT".to_string(); 200];
        seqs[150] = "ACZT".to_string();
        seqs[40] = "AC.T".to_string();

        let err = build_parallel(&seqs, None).unwrap_err();
        assert_eq!(err, PoolError::InvalidCharacter { index: 40, character: '.' });
        assert_eq!(err, build(&seqs, None).unwrap_err());
    }

    #[test]
    fn record_end() {
        let r = OffsetRecord { start: 3, width: 4, name: None };
        assert_eq!(r.end(), 7);
    }
}
