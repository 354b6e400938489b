//! Page rendering shared by the server and the static export.

use crate::content::{Page, PageContent, SiteInfo};
use crate::templates::{Context, LayoutIcons, TemplateEngine};
use crate::views::{footer_links, FormSlot, FormView, NavView, PageState};

/// Errors that can occur while rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// Renders pages for one site configuration.
pub struct SiteRenderer {
    templates: TemplateEngine,
    site: SiteInfo,
    base_url: String,
    live_reload: bool,
}

impl SiteRenderer {
    pub fn new(site: SiteInfo, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            templates: TemplateEngine::new(),
            site,
            base_url,
            live_reload: false,
        }
    }

    /// Include the live reload client in every page.
    pub fn with_live_reload(mut self, enabled: bool) -> Self {
        self.live_reload = enabled;
        self
    }

    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render `page` in the given UI state.
    pub fn render(&self, page: Page, state: &PageState) -> Result<String, TemplateError> {
        let notice = state.notice.as_ref();
        let form = |slot: FormSlot| FormView::new(slot, state.form(slot), notice, &self.base_url);

        let context = Context {
            title: page.title().to_string(),
            page,
            site: self.site.clone(),
            base_url: self.base_url.clone(),
            return_to: page.path().to_string(),
            nav: NavView::new(&state.navbar, state.layout, page, &self.base_url),
            icons: LayoutIcons::default(),
            footer_links: footer_links(&self.base_url),
            footer_form: form(FormSlot::Footer),
            hero_form: form(FormSlot::Hero),
            contact_form: form(FormSlot::Contact),
            content: PageContent::for_page(page, &self.site),
            live_reload: self.live_reload,
        };

        let template = page.template();
        self.templates
            .render_page(template, &context)
            .map_err(|source| TemplateError::Render { template, source })
    }

    /// Render `page` with nothing open, touched or submitted.
    pub fn render_default(&self, page: Page) -> Result<String, TemplateError> {
        self.render(page, &PageState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_base_url() {
        let renderer = SiteRenderer::new(SiteInfo::default(), "/site");
        assert_eq!(renderer.base_url(), "/site/");
    }

    #[test]
    fn links_follow_base_url() {
        let renderer = SiteRenderer::new(SiteInfo::default(), "/site/");
        let html = renderer.render_default(Page::About).unwrap();

        // Autoescape encodes `/` as `&#x2f;`
        assert!(html.contains(r#"href="&#x2f;site&#x2f;assets&#x2f;main.css""#));
        assert!(html.contains(r#"href="&#x2f;site&#x2f;contact""#));
        assert!(html.contains(r#"action="&#x2f;site&#x2f;subscribe""#));
        assert!(!html.contains(r#"href="&#x2f;contact""#));
    }

    #[test]
    fn live_reload_script_is_opt_in() {
        let plain = SiteRenderer::new(SiteInfo::default(), "/");
        assert!(!plain.render_default(Page::Home).unwrap().contains("__reload.js"));

        let dev = SiteRenderer::new(SiteInfo::default(), "/").with_live_reload(true);
        assert!(dev.render_default(Page::Home).unwrap().contains("/__reload.js"));
    }

    #[test]
    fn uses_configured_site_details() {
        let site = SiteInfo {
            title: "Acme".to_string(),
            phone: "+1 555 0100".to_string(),
            ..SiteInfo::default()
        };
        let renderer = SiteRenderer::new(site, "/");
        let html = renderer.render_default(Page::Contact).unwrap();

        assert!(html.contains("<title>Contact | Acme</title>"));
        assert!(html.contains("+1 555 0100"));
    }

    #[test]
    fn renders_every_page() {
        let renderer = SiteRenderer::new(SiteInfo::default(), "/");
        for page in Page::ROUTED.into_iter().chain([Page::NotFound]) {
            let html = renderer.render_default(page).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{page:?}");
        }
    }
}
