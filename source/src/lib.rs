#[macro_use]
extern crate lazy_static;

pub mod normalization;
pub mod properties;

mod arabic_shaping;
mod bidi_brackets;
mod bidi_mirroring;
mod composition_exclusions;
mod derived_age;
mod fields;
mod prop_list;
mod unicode;

pub use unicode::UNICODE;

pub use composition_exclusions::is_composition_exclusion;
pub use composition_exclusions::is_full_composition_exclusion;
pub use composition_exclusions::COMPOSITION_EXCLUSIONS;

pub use arabic_shaping::joining;
pub use arabic_shaping::ARABIC_SHAPING;
pub use bidi_brackets::BIDI_BRACKETS;
pub use bidi_mirroring::BIDI_MIRRORING;
pub use derived_age::AGES;
pub use prop_list::PROP_LIST;

pub use normalization::COMBINES_BACKWARDS;
pub use normalization::COMPOSITION_PAIRS;
pub use normalization::NFD;
pub use normalization::NFKD;
