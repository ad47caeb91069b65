//! Team Builder Core Library
//!
//! Layouts, share codes and saved teams for a character roster team builder.
//!
//! ## Overview
//!
//! A team is a mode (one, two or four parties of four) plus a flat grid of
//! character ids. Teams can be:
//!
//! - shared as a compact token, on its own or as the fragment of a link
//! - saved by name in a key-value store and edited later
//! - resolved against the character catalog into per-slot fill/clear
//!   instructions, with unknown ids cleared
//!
//! ## Quick Start
//!
//! ```ignore
//! use teambuilder_core::{codec, reconcile, CharacterCatalog, Mode, ShareLinkBuilder, Team};
//!
//! let catalog = CharacterCatalog::load("characters.json")?;
//!
//! let team = Team::from_slots(Mode::Standard, vec![Some("3003".into()), None, None, None])
//!     .with_name("Test");
//!
//! let url = ShareLinkBuilder::new("https://example.com/").build_url(&team)?;
//! // -> "https://example.com/#JTdCJTIybiUyMi..."
//!
//! if let Some(shared) = teambuilder_core::share::parse_url(&url)? {
//!     for instruction in reconcile(&shared, &catalog) {
//!         println!("{:?}", instruction);
//!     }
//! }
//! ```

pub mod app;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod filter;
pub mod layout;
pub mod qr;
pub mod reconcile;
pub mod share;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;

// Re-exports
pub use app::{AppState, DEFAULT_SHARE_NAME};
pub use catalog::CharacterCatalog;
pub use error::{DecodeError, TeamError, TeamResult, ValidationError};
pub use filter::CharacterFilter;
pub use layout::{layout_for, Layout, Mode, SLOTS_PER_PARTY};
pub use reconcile::{reconcile, SlotInstruction};
pub use share::{ShareLinkBuilder, ShareSummary};
pub use stats::{team_stats, PartyStats};
pub use storage::{KeyValueStore, MemoryStore, RedbStore};
pub use store::{SavedTeamRecord, TeamStore};
pub use types::*;
