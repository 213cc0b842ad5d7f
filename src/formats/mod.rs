//! Vendor file format decoders.
//!
//! - [`agilent`] - Agilent ChemStation GC-MS `DATA.MS`

/// Agilent ChemStation MS decoder.
pub mod agilent;
