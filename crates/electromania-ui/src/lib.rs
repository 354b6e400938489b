//! UI state for the Electromania site.
//!
//! Everything here is plain owned data: the navigation menu and its
//! open/closed state machine, the two-phase presence of the mobile overlay,
//! and the form schemas with their validation and submit seam. Rendering
//! lives in `electromania-site`.

pub mod form;
pub mod menu;
pub mod navbar;
pub mod presence;
pub mod submit;

pub use form::{
    is_valid_email, FieldError, FieldErrors, FieldRule, FieldSpec, FieldView, Form, FormError,
    FormValues, InputKind, Schema, ValidationKind,
};
pub use menu::{FooterLink, MenuItem, FOOTER_LINKS, MENU_ITEMS};
pub use navbar::{Layout, MenuState, NavEvent, Navbar, MOBILE_BREAKPOINT};
pub use presence::{Phase, Presence};
pub use submit::{FormKind, LoggingSubmitHandler, SubmitError, SubmitHandler, Submission};
