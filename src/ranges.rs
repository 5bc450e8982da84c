use itertools::{izip, Itertools};

use crate::error::Result;
use crate::pool::{self, OffsetRecord, Pool};

/// Constructs a range table from three aligned arrays.
///
/// This is the only thing [`create_pool`] needs from a range table. Any
/// function or closure with the matching signature is a factory, so
/// `Ranges::new` can be passed directly.
pub trait RangeFactory {
    type Output;

    fn from_parts(
        &self,
        starts: Vec<usize>,
        widths: Vec<usize>,
        names: Vec<Option<String>>,
    ) -> Self::Output;
}

impl<F, R> RangeFactory for F
where
    F: Fn(Vec<usize>, Vec<usize>, Vec<Option<String>>) -> R,
{
    type Output = R;

    fn from_parts(
        &self,
        starts: Vec<usize>,
        widths: Vec<usize>,
        names: Vec<Option<String>>,
    ) -> R {
        self(starts, widths, names)
    }
}

/// Builds the pool for `sequences` and hands the offsets to `factory`.
///
/// See [`pool::build`] for the packing rules and errors. The factory is only
/// called once the pool has been built successfully.
///
/// # Example
///
/// ```
/// use dnapool::ranges::{create_pool, Ranges};
///
/// let (pool, ranges) = create_pool(&["acgt", "NNN"], None, Ranges::new).unwrap();
/// assert_eq!(pool.as_bytes(), b"ACGTNNN");
/// assert_eq!(ranges.widths(), &[4, 3]);
/// ```
pub fn create_pool<S, F>(
    sequences: &[S],
    names: Option<&[Option<String>]>,
    factory: F,
) -> Result<(Pool, F::Output)>
where
    S: AsRef<str>,
    F: RangeFactory,
{
    let (pool, records) = pool::build(sequences, names)?;
    Ok((pool, into_ranges(records, &factory)))
}

/// Splits records into `starts`, `widths` and `names` and passes them on.
pub fn into_ranges<F: RangeFactory>(records: Vec<OffsetRecord>, factory: &F) -> F::Output {
    let (starts, widths, names): (Vec<_>, Vec<_>, Vec<_>) = records
        .into_iter()
        .map(|r| (r.start, r.width, r.name))
        .multiunzip();
    factory.from_parts(starts, widths, names)
}

/// A plain table of `(start, width, name)` ranges, stored column-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranges {
    starts: Vec<usize>,
    widths: Vec<usize>,
    names: Vec<Option<String>>,
}

impl Ranges {
    /// # Panics
    ///
    /// If the three arrays differ in length, in release builds too.
    pub fn new(starts: Vec<usize>, widths: Vec<usize>, names: Vec<Option<String>>) -> Self {
        assert_eq!(starts.len(), widths.len(), "starts and widths must align");
        assert_eq!(starts.len(), names.len(), "starts and names must align");
        Self {
            starts,
            widths,
            names,
        }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    /// One past the last position of range `i`.
    pub fn end(&self, i: usize) -> usize {
        self.starts[i] + self.widths[i]
    }

    /// Sum of all widths.
    pub fn total_width(&self) -> usize {
        self.widths.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = OffsetRecord> + '_ {
        izip!(&self.starts, &self.widths, &self.names).map(|(&start, &width, name)| {
            OffsetRecord {
                start,
                width,
                name: name.clone(),
            }
        })
    }
}

impl FromIterator<OffsetRecord> for Ranges {
    fn from_iter<I: IntoIterator<Item = OffsetRecord>>(iter: I) -> Self {
        into_ranges(iter.into_iter().collect(), &Ranges::new)
    }
}
