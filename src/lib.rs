//! Sorts text files composed of `N. W1 W2 ... Wk` lines by the words
//! after the first space (the "suffix"), falling back to the leading
//! `N.` token (the "prefix") to break ties.
//!
//! The sort proceeds in three stages, out-of-core, so that the whole
//! input never has to fit in memory at once: the input is partitioned
//! into bounded-size chunks which are sorted and spilled to temp files,
//! those sorted runs are merged down pairwise wave by wave, and every
//! intermediate temp file is removed once it is no longer needed.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use wordsuffix_sort::sort::Sort;
//!
//! fn sort_lines(input: PathBuf) -> Result<(), anyhow::Error> {
//!     // set number of CPU cores the sort will attempt to use. When given a
//!     // number that exceeds the number of available cores the work will be
//!     // split among available cores with somewhat degraded performance.
//!     // The default is to use all available cores.
//!     let mut sort = Sort::new(input, None);
//!     sort.with_tasks(2);
//!     sort.sort()
//! }
//! ```

pub(crate) mod config;
pub(crate) mod key;
pub(crate) mod line;
pub(crate) mod merge;
pub(crate) mod partition;
pub(crate) mod registry;
pub(crate) mod tempfiles;

pub mod generator;
pub mod sort;
