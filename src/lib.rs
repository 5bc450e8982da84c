//! Packs a set of DNA sequences into one contiguous byte pool, alongside a
//! table of `(start, width, name)` records locating each sequence in it.
//!
//! ```
//! use dnapool::ranges::{create_pool, Ranges};
//!
//! let names = vec![Some("s1".to_string()), Some("s2".to_string())];
//! let (pool, ranges) = create_pool(&["acgt", "N-N"], Some(names.as_slice()), Ranges::new).unwrap();
//!
//! assert_eq!(pool.as_bytes(), b"ACGTN-N");
//! assert_eq!(ranges.starts(), &[0, 4]);
//! ```

#[macro_use]
extern crate log;

pub mod alphabet;
pub mod cli;
pub mod error;
pub mod io;
pub mod pack;
pub mod pool;
pub mod ranges;
pub mod string;
pub mod summary;

pub use error::PoolError;
pub use pool::{build, build_parallel, OffsetRecord, Pool};
pub use ranges::{create_pool, RangeFactory, Ranges};
pub use string::DnaString;
