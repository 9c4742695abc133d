//! License obligations.
//!
//! - [`attribution`]: decides whether a license text requires attribution
//!   when the package is redistributed.

pub mod attribution;
