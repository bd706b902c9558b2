//! Canonicalization of ingredient names and units.
//!
//! Both normalizers are pure, total functions over fixed lookup tables: they
//! never fail and repeated application is a no-op.

pub mod names;
pub mod units;

pub use names::normalize;
pub use units::standardize;

use crate::model::NormalizedKey;

/// Compute the grouping key for a raw ingredient name and unit
pub fn normalized_key(name: &str, unit: &str) -> NormalizedKey {
    NormalizedKey::new(normalize(name), standardize(unit))
}
