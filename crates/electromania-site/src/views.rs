//! Per-request UI state and its render-ready views.

use serde::Serialize;

use electromania_ui::{
    FieldView, Form, FormKind, Layout, MenuState, Navbar, Schema, FOOTER_LINKS,
};

use crate::content::Page;

/// Where a form sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSlot {
    /// Newsletter form in the home hero
    Hero,
    /// Newsletter box in the footer
    Footer,
    /// Message form on the contact page
    Contact,
}

impl FormSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            FormSlot::Hero => "hero",
            FormSlot::Footer => "footer",
            FormSlot::Contact => "contact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hero" => Some(FormSlot::Hero),
            "footer" => Some(FormSlot::Footer),
            "contact" => Some(FormSlot::Contact),
            _ => None,
        }
    }

    pub fn kind(self) -> FormKind {
        match self {
            FormSlot::Hero | FormSlot::Footer => FormKind::Newsletter,
            FormSlot::Contact => FormKind::Contact,
        }
    }

    /// Path the form posts to.
    pub fn action(self) -> &'static str {
        match self.kind() {
            FormKind::Newsletter => "/subscribe",
            FormKind::Contact => "/contact",
        }
    }
}

/// Outcome banner shown next to a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub slot: FormSlot,
    pub success: bool,
    pub message: String,
}

impl Notice {
    pub fn success(slot: FormSlot) -> Self {
        let message = match slot.kind() {
            FormKind::Newsletter => "Thanks for subscribing! Watch your inbox for our next update.",
            FormKind::Contact => "Thanks for reaching out! We'll get back to you soon.",
        };
        Self {
            slot,
            success: true,
            message: message.to_string(),
        }
    }

    pub fn failure(slot: FormSlot, message: impl Into<String>) -> Self {
        Self {
            slot,
            success: false,
            message: message.into(),
        }
    }
}

/// Everything that varies between two renders of the same page.
#[derive(Debug)]
pub struct PageState {
    pub navbar: Navbar,
    pub layout: Layout,
    pub hero_form: Form,
    pub footer_form: Form,
    pub contact_form: Form,
    pub notice: Option<Notice>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            navbar: Navbar::new(),
            layout: Layout::Responsive,
            hero_form: Form::new(Schema::newsletter()),
            footer_form: Form::new(Schema::newsletter()),
            contact_form: Form::new(Schema::contact()),
            notice: None,
        }
    }
}

impl PageState {
    /// Form occupying `slot`.
    pub fn form_mut(&mut self, slot: FormSlot) -> &mut Form {
        match slot {
            FormSlot::Hero => &mut self.hero_form,
            FormSlot::Footer => &mut self.footer_form,
            FormSlot::Contact => &mut self.contact_form,
        }
    }

    pub fn form(&self, slot: FormSlot) -> &Form {
        match slot {
            FormSlot::Hero => &self.hero_form,
            FormSlot::Footer => &self.footer_form,
            FormSlot::Contact => &self.contact_form,
        }
    }
}

/// Join a site-absolute path onto the base URL.
pub fn href(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// A link with its resolved href.
#[derive(Debug, Clone, Serialize)]
pub struct LinkView {
    pub text: &'static str,
    pub href: String,
    pub active: bool,
}

/// Render-ready navbar.
#[derive(Debug, Clone, Serialize)]
pub struct NavView {
    pub items: Vec<LinkView>,
    pub state: MenuState,
    pub open: bool,
    pub phase: &'static str,
    pub render_desktop: bool,
    pub render_toggle: bool,
    /// Overlay element is emitted at all
    pub render_overlay: bool,
    /// Overlay is mounted (visible unless the stylesheet hides it)
    pub overlay_mounted: bool,
    /// No-script target of the toggle button
    pub toggle_href: String,
    pub subscribe_href: String,
}

impl NavView {
    pub fn new(navbar: &Navbar, layout: Layout, page: Page, base_url: &str) -> Self {
        let current = page.path();
        let page_href = href(base_url, current);
        let toggle_href = match navbar.state() {
            MenuState::Closed => format!("{page_href}?menu=open"),
            MenuState::Open => page_href,
        };

        Self {
            items: navbar
                .items()
                .iter()
                .map(|item| LinkView {
                    text: item.text,
                    href: href(base_url, item.to),
                    active: item.is_active(current),
                })
                .collect(),
            state: navbar.state(),
            open: navbar.is_open(),
            phase: navbar.overlay_phase().as_str(),
            render_desktop: layout != Layout::Mobile,
            render_toggle: layout != Layout::Desktop,
            render_overlay: layout != Layout::Desktop,
            overlay_mounted: navbar.renders_overlay(layout),
            toggle_href,
            subscribe_href: format!("{}#newsletter", href(base_url, "/")),
        }
    }
}

/// Render-ready form.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub slot: FormSlot,
    pub action: String,
    pub fields: Vec<FieldView>,
    pub notice: Option<Notice>,
}

impl FormView {
    pub fn new(slot: FormSlot, form: &Form, notice: Option<&Notice>, base_url: &str) -> Self {
        Self {
            slot,
            action: href(base_url, slot.action()),
            fields: form.field_views(),
            notice: notice.filter(|n| n.slot == slot).cloned(),
        }
    }
}

/// Footer quick links with resolved hrefs.
pub fn footer_links(base_url: &str) -> Vec<LinkView> {
    FOOTER_LINKS
        .iter()
        .map(|link| LinkView {
            text: link.text,
            href: href(base_url, link.to),
            active: false,
        })
        .collect()
}
