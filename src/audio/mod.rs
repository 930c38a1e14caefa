//! In-memory audio: decoded clips, the silent timeline they are mixed onto,
//! and WAV export.

pub mod clip;
pub mod decode;
pub mod timeline;

pub use clip::{Clip, ClipKind, SILENCE_FALLBACK_MS};
pub use decode::decode;
pub use timeline::Timeline;
