//! Game Timeline
//!
//! A chess session against the computer or between two people sharing a
//! board: the canonical move list, a cursor for reviewing earlier positions,
//! undo, hints, promotion input and the elapsed clock. [`Timeline`] is plain
//! synchronous state; [`GameDriver`] runs it on tokio with the computer's
//! moves and hints computed in the background.
//!
//! Around the timeline sit the session files: [`GameConfig`] (TOML),
//! [`SaveList`] and [`PlayerStats`] (JSON).

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod job;
pub mod save;
pub mod stats;
pub mod timeline;

pub use clock::{format_elapsed, ElapsedClock};
pub use config::{GameConfig, GameMode, PlayerColor};
pub use driver::{GameDriver, DEFAULT_MOVE_DELAY};
pub use error::{MoveError, TimelineError};
pub use events::TimelineEvent;
pub use job::{JobKey, JobKind, JobOutcome, SearchJob};
pub use save::{SaveList, SavedGame};
pub use stats::{opening_key, Outcome, PlayerStats};
pub use timeline::{Hint, PendingPromotion, SelectOutcome, Timeline};
