//! Learned position values for the search engine.
//!
//! ## Overview
//!
//! - **Encoding**: [`FeatureEncoder`] projects a snapshot (or a telemetry
//!   record) plus the move that produced it into a flat feature vector
//! - **Estimation**: the [`ValueEstimator`] trait turns features into a
//!   scalar; [`LinearValue`] loads weights from JSON, [`ZeroValue`] is the
//!   baseline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use castle_duel::nn::{FeatureEncoder, LinearValue, ValueEstimator};
//!
//! let encoder = FeatureEncoder::new();
//! let model = LinearValue::from_file("value.json")?;
//!
//! let value = model.estimate(&encoder.encode(&snapshot, Some(mv)));
//! ```

pub mod encoder;
pub mod traits;

// Re-export main types
pub use encoder::{FeatureEncoder, CARD_SLOTS, FEATURE_LEN};
pub use traits::{EncodedState, LinearValue, ValueEstimator, ZeroValue};
