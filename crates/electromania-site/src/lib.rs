//! Pages, templates and static export for the Electromania site.
//!
//! Renders the home, about, contact and 404 pages from typed content and the
//! UI state in `electromania-ui`, either per request or into a static build.

pub mod assets;
pub mod builder;
pub mod content;
pub mod icons;
pub mod render;
pub mod templates;
pub mod views;

pub use assets::{AssetPipeline, Theme};
pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use content::{Page, PageContent, SiteInfo};
pub use render::{SiteRenderer, TemplateError};
pub use views::{FormSlot, Notice, PageState};
