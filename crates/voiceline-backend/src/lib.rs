//! # voiceline-backend
//!
//! Scene document processing for the voiceline toolchain: the room and
//! global XML traversals, the textual patcher, screenplay assembly, the
//! localization seam and the sequential pipeline that drives them.
//!
//! The backend consumes the core crate's allocator/cache engine and never
//! re-serializes parsed documents: patched output is produced by anchored
//! textual substitution on the original text.

mod dialog;
pub mod global;
pub mod localize;
pub mod patcher;
pub mod pipeline;
pub mod room;
pub mod screenplay;
pub mod xml;

pub use global::process_global;
pub use localize::{Localizer, NoopLocalizer};
pub use patcher::XmlPatcher;
pub use pipeline::{Pipeline, PipelineConfig, RunReport};
pub use room::{process_room, DocumentOutput};
pub use screenplay::Fragment;
