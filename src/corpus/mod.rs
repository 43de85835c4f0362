use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod allow_list;
pub mod loader;
pub mod naming;
pub mod source;

/// One spoken utterance from the corpus.
///
/// `id` is the corpus-assigned identifier encoding talk name plus start and
/// end offsets in seconds, e.g. `DavidRockwell_2002-49.484-50.449`. The
/// audio payload and the remaining corpus fields are carried through
/// unchanged; this crate never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id: String,
    pub audio: Vec<u8>,
    pub metadata: serde_json::Value,
}

/// Mapping from filename to segment record, built once per invocation and
/// never mutated afterwards. Keyed by canonical filename on the held-back
/// path, by raw corpus id on the standard path.
pub type CorpusSnapshot = HashMap<String, SegmentRecord>;
