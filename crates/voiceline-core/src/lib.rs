//! # voiceline-core
//!
//! Core types for the voiceline toolchain: the per-scene slot allocation and
//! dialog deduplication engine, the directional geometry resolver, puppet to
//! actor resolution, and the immutable mapping tables that drive them.
//!
//! The engine guarantees that within one run, every unique (actor, text)
//! pair in a scene maps to exactly one slot reference, that allocated
//! indices are strictly increasing and never collide with the scene's
//! omission set, and that empty subtitle text never allocates.
//!
//! ```
//! use voiceline_core::{Mappings, RunContext};
//!
//! let mappings = Mappings::from_toml(r#"registry = ["harbor"]"#)?;
//! let mut ctx = RunContext::new(&mappings);
//!
//! let first = ctx.resolve_dialog("harbor", "june", "Anyone here?").unwrap();
//! let again = ctx.resolve_dialog("harbor", "june", "Anyone here?").unwrap();
//! assert_eq!(first.slot, again.slot);
//! assert!(again.duplicate);
//! # Ok::<(), voiceline_core::VoicelineError>(())
//! ```

pub mod actor;
pub mod error;
pub mod geometry;
pub mod mappings;
pub mod slots;

pub use actor::{ActorResolver, AVATAR_COLOR, AVATAR_PUPPET, NEUTRAL_COLOR};
pub use error::{Result, VoicelineError};
pub use geometry::{resolve_direction, Point, DEFAULT_TURN};
pub use mappings::{Mappings, GLOBAL_ID};
pub use slots::{slot_reference, voice_library, RunContext, RunCounters, SlotResolution};
