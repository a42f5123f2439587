// Pipeline processing: PN expansion, GENERAL constants, attribute indexing and catalog assembly

pub mod attributes;
pub mod catalog;
pub mod expand;
pub mod general;
pub mod normalize;

pub use attributes::{AttributeIndex, AttributeRecord, AttributeSheet, LookupKey};
pub use catalog::{assemble, CatalogEntry};
pub use expand::{Combinations, PnCombination, PnField, PnFieldSet};
pub use general::GeneralAttributes;
