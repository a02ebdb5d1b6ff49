//! Photo capture: which animals are in the shot, what they are worth, and
//! the saved picture.
//!
//! [`PhotoScorer`] owns the capture sequence (busy flag, cool-down, flash,
//! description text, running score). Detection runs against any
//! [`SpatialQuery`](wildlens_spatial::SpatialQuery); the picture itself is
//! produced by a [`PhotoRenderer`] at the end of the frame and persisted by
//! [`PhotoWriter`].

mod capture;
mod detection;
mod error;
mod flash;
mod output;
mod render;
mod scorable;

pub use capture::{CaptureOutcome, CaptureSettings, IgnoreReason, PendingPhoto, PhotoScorer};
pub use detection::{CaptureResult, DetectionSettings, detect};
pub use error::PhotoError;
pub use flash::{CaptureFlash, DescriptionDisplay};
pub use output::{PhotoWriter, photo_file_name};
pub use render::{PhotoRenderer, RaycastRenderer};
pub use scorable::{ScorableEntity, Scorables};
