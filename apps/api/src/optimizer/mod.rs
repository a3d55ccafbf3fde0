// Document optimization pipeline: per-document processor plus the HTTP handlers
// that expose it. Segmenter → Generator → Selector → Reconstructor.

pub mod handlers;
pub mod processor;
