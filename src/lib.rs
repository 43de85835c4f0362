//! Retrieves and prepares speech segments from the TEDLIUM3 corpus of TED
//! talks for downstream ASR-hallucination analysis.
//!
//! Segments come either from a standard corpus split, streamed from the
//! remote dataset provider, or from the custom held-back training subset,
//! which is filtered against an allow-list of canonical filenames and
//! cached locally so it is only ever fetched once.

pub mod corpus;
pub mod error;
pub mod utils;

pub use corpus::loader::CorpusLoader;
pub use corpus::source::{CorpusSource, HfRowsSource};
pub use corpus::{CorpusSnapshot, SegmentRecord};
pub use error::CorpusError;
