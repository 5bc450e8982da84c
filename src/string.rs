use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::alphabet;
use crate::error::PoolError;
use crate::pool::Pool;

/// A single DNA sequence, stored uppercased.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct DnaString {
    data: Vec<u8>,
}

impl DnaString {
    /// Validates and uppercases `sequence`.
    pub fn new(sequence: &str) -> Result<Self, PoolError> {
        alphabet::normalize_str(sequence)
            .map(|data| Self { data })
            .map_err(|character| PoolError::InvalidString { character })
    }

    /// Wraps bytes which are already normalized, such as a slice of a pool.
    pub fn from_normalized(data: Vec<u8>) -> Self {
        debug_assert!(data.iter().all(|&b| alphabet::is_valid(b)));
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_str(&self) -> &str {
        // every byte is ASCII
        std::str::from_utf8(&self.data).unwrap_or_default()
    }

    /// The single base at `i`, as a one-base sequence.
    pub fn get(&self, i: usize) -> Option<Self> {
        self.data.get(i..=i).map(|b| Self { data: b.to_vec() })
    }

    /// Copies out the bases in `range`.
    ///
    /// # Panics
    ///
    /// If `range` is out of bounds or decreasing, as with slice indexing.
    pub fn subseq(&self, range: Range<usize>) -> Self {
        Self {
            data: self.data[range].to_vec(),
        }
    }

    /// Complements each base (IUPAC codes included) and reverses the order.
    pub fn reverse_complement(&self) -> Self {
        Self {
            data: self.data.iter().rev().map(|&b| alphabet::complement(b)).collect(),
        }
    }
}

impl FromStr for DnaString {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Every sequence of the pool, joined into one.
impl From<Pool> for DnaString {
    fn from(pool: Pool) -> Self {
        Self::from_normalized(pool.into_bytes().into_vec())
    }
}

impl AsRef<[u8]> for DnaString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for DnaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for DnaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.as_str();
        // long sequences are shown by their ends only
        if s.len() > 20 {
            let (head, tail) = (&s[..10], &s[s.len() - 10..]);
            write!(f, "DnaString(length={}, sequence='{head}...{tail}')", s.len())
        } else {
            write!(f, "DnaString(length={}, sequence='{s}')", s.len())
        }
    }
}

/// Case-insensitive, since the stored form is always uppercase.
impl PartialEq<str> for DnaString {
    fn eq(&self, other: &str) -> bool {
        self.data.eq_ignore_ascii_case(other.as_bytes())
    }
}

impl PartialEq<&str> for DnaString {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases() {
        let s = DnaString::new("acgtN-").unwrap();
        assert_eq!(s.as_bytes(), b"ACGTN-");
        assert_eq!(s.to_string(), "ACGTN-");
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn rejects_invalid() {
        let err = DnaString::new("ACGU").unwrap_err();
        assert_eq!(err, PoolError::InvalidString { character: 'U' });
    }

    #[test]
    fn empty() {
        let s: DnaString = "".parse().unwrap();
        assert!(s.is_empty());
        assert_eq!(s, "");
    }

    #[test]
    fn compare_with_str() {
        let s = DnaString::new("ACGT").unwrap();
        assert_eq!(s, "acgt");
        assert_eq!(s, "ACGT");
        assert_ne!(s, "ACG");
    }

    #[test]
    fn reverse_complement() {
        let s = DnaString::new("AACGTRYN-").unwrap();
        let rc = s.reverse_complement();
        assert_eq!(rc, "-NRYACGTT");
        assert_eq!(rc.reverse_complement(), s);
    }

    #[test]
    fn debug_snippet() {
        let s = DnaString::new(&"ACGT".repeat(10)).unwrap();
        assert_eq!(
            format!("{s:?}"),
            "DnaString(length=40, sequence='ACGTACGTAC...GTACGTACGT')"
        );
        let short = DnaString::new("acg").unwrap();
        assert_eq!(format!("{short:?}"), "DnaString(length=3, sequence='ACG')");
    }

    #[test]
    fn from_pool_slice() {
        let (pool, records) = crate::pool::build(&["acg", "TT"], None).unwrap();
        let r = &records[1];
        let s = DnaString::from_normalized(pool.as_bytes()[r.start..r.end()].to_vec());
        assert_eq!(s, "TT");
    }

    #[test]
    fn single_base() {
        let s = DnaString::new("acgt").unwrap();
        assert_eq!(s.get(0).unwrap(), "A");
        assert_eq!(s.get(3).unwrap(), "T");
        assert_eq!(s.get(4), None);
        assert_eq!(DnaString::default().get(0), None);
    }

    #[test]
    fn subsequence() {
        let s = DnaString::new("AACGTRYN-").unwrap();
        assert_eq!(s.subseq(2..5), "CGT");
        assert_eq!(s.subseq(0..0), "");
        assert_eq!(s.subseq(0..s.len()), s);
    }

    #[test]
    #[should_panic]
    fn subsequence_out_of_bounds() {
        DnaString::new("ACGT").unwrap().subseq(2..6);
    }

    #[test]
    fn flatten_pool() {
        let (pool, _) = crate::pool::build(&["acg", "", "TT", "n-"], None).unwrap();
        let s = DnaString::from(pool);
        assert_eq!(s, "ACGTTN-");
        assert_eq!(DnaString::from(Pool::default()), "");
    }
}
