//! Effect system: the card effect mini-language.
//!
//! - `parse_effect`: turns effect text into typed `Effect` actions
//! - `EffectResolver`: applies those actions to the acting contender and
//!   its opponent
//!
//! Parsing happens once, when a `Card` is built. Resolution is infallible:
//! every value is clamped to its floor instead of being rejected.

mod effect;
mod resolver;

pub use effect::{parse_effect, resource_by_name, Effect, EffectAction, EffectTarget};
pub use resolver::EffectResolver;
