//! Taskdeck Core
//!
//! Pure data-model logic for projects, task boards, comment threads and the
//! activity feed. Nothing in this crate performs I/O; the API crate loads rows
//! from storage and hands them to these functions.
//!
//! # Modules
//!
//! - `aggregate`: derived project counts, progress and dashboard totals
//! - `board`: partitioning tasks into status columns
//! - `status`: status transitions and their activity descriptions
//! - `threads`: reply validation and nesting of comments
//! - `relative_time`: "3h ago" style labels for the activity feed
//! - `visibility`: who may view a project
//! - `validation`: checks applied to submitted forms before anything is stored
//!
//! # Example
//!
//! ```rust,ignore
//! use taskdeck_core::board::group_by_status;
//!
//! let board = group_by_status(tasks);
//! assert_eq!(board.len(), total);
//! ```

pub mod aggregate;
pub mod board;
pub mod error;
pub mod relative_time;
pub mod status;
pub mod threads;
pub mod validation;
pub mod visibility;

pub use aggregate::{aggregate_project, progress, summarize, ProjectRow};
pub use board::group_by_status;
pub use error::CoreError;
pub use relative_time::format_relative;
pub use status::{transition, StatusChange};
pub use threads::{build_threads, validate_reply, MAX_REPLY_DEPTH};
pub use visibility::can_view;
