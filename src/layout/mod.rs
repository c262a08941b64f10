//! Layout module: The containers content flows into.
//!
//! A [`Region`] is anything that can hold fragments and say whether they
//! overflow. [`TextRegion`] is the terminal implementation: a [`Rect`] of
//! cells that word-wraps what it holds.

mod rect;
mod region;
mod text_region;

pub use rect::Rect;
pub use region::{ProbeError, Region, RegionId, RegionStatus};
pub use text_region::{Overflow, TextRegion};
