//! Logo rasterization.
//!
//! Turns the vector logos under the public images directory into the square
//! PNG icons referenced by the web manifest.

pub mod convert;

pub use convert::{convert_logos, convert_svg_to_png, logo_jobs, rasterize, LogoError, LogoJob, LOGO_SIZES};
