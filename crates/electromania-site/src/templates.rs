//! Template engine for rendering site pages.

use minijinja::Environment;
use serde::Serialize;

use crate::content::{Page, PageContent, SiteInfo};
use crate::icons::Icon;
use crate::views::{FormView, LinkView, NavView};

/// Icons the layout needs outside of page content.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutIcons {
    pub bars: Icon,
    pub close: Icon,
}

impl Default for LayoutIcons {
    fn default() -> Self {
        Self {
            bars: Icon::Bars,
            close: Icon::XMark,
        }
    }
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Page being rendered, serialized as `home`, `about`, ...
    pub page: Page,
    /// Company details
    pub site: SiteInfo,
    /// Base URL, always ending in `/`
    pub base_url: String,
    /// Path forms return to after a post
    pub return_to: String,
    pub nav: NavView,
    pub icons: LayoutIcons,
    pub footer_links: Vec<LinkView>,
    pub footer_form: FormView,
    pub hero_form: FormView,
    pub contact_form: FormView,
    /// Page-specific copy
    pub content: PageContent,
    /// Include the live reload client
    pub live_reload: bool,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the site templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .unwrap_or_else(|e| panic!("Failed to add template {name}: {e}"));
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(&self, template: &str, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("navbar.html", NAVBAR_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
    ("field.html", FIELD_TEMPLATE),
    ("notice.html", NOTICE_TEMPLATE),
    ("newsletter_form.html", NEWSLETTER_FORM_TEMPLATE),
    ("contact_form.html", CONTACT_FORM_TEMPLATE),
    ("card.html", CARD_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("about.html", ABOUT_TEMPLATE),
    ("contact.html", CONTACT_TEMPLATE),
    ("not_found.html", NOT_FOUND_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta http-equiv="Accept-CH" content="Sec-CH-Viewport-Width">
  <title>{{ title }} | {{ site.title }}</title>
  <link rel="icon" type="image/png" sizes="192x192" href="{{ base_url }}images/logo192.png">
  <link rel="apple-touch-icon" sizes="512x512" href="{{ base_url }}images/logo512.png">
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
  <script>document.documentElement.classList.add('js');</script>
</head>
<body class="page-{{ page }}">
  {% include "navbar.html" %}
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  {% include "footer.html" %}
  <script src="{{ base_url }}assets/main.js" defer></script>
  {% if live_reload %}<script src="/__reload.js"></script>{% endif %}
</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"<header class="navbar" data-navbar data-menu-state="{{ nav.state }}">
  <div class="container navbar-inner">
    <a href="{{ base_url }}" class="brand"><span class="brand-text gradient-text">{{ site.title }}</span></a>
    {% if nav.render_desktop %}
    <nav class="desktop-menu" aria-label="Main">
      {% for item in nav.items %}
      <a href="{{ item.href }}" class="nav-link{% if item.active %} active{% endif %}"{% if item.active %} aria-current="page"{% endif %}>{{ item.text }}</a>
      {% endfor %}
      <a href="{{ nav.subscribe_href }}" class="btn btn-primary press">Subscribe</a>
    </nav>
    {% endif %}
    {% if nav.render_toggle %}
    <a href="{{ nav.toggle_href }}" class="menu-toggle" role="button" aria-label="Toggle menu" aria-controls="mobile-menu" aria-expanded="{% if nav.open %}true{% else %}false{% endif %}" data-menu-toggle>
      <span class="icon icon-open">{{ icons.bars | safe }}</span>
      <span class="icon icon-close">{{ icons.close | safe }}</span>
    </a>
    {% endif %}
  </div>
  {% if nav.render_overlay %}
  <div id="mobile-menu" class="mobile-menu" data-phase="{{ nav.phase }}"{% if not nav.overlay_mounted %} hidden{% endif %}>
    <nav class="mobile-menu-list" aria-label="Mobile">
      {% for item in nav.items %}
      <a href="{{ item.href }}" class="mobile-link nudge{% if item.active %} active{% endif %}" data-menu-item>{{ item.text }}</a>
      {% endfor %}
      <a href="{{ nav.subscribe_href }}" class="btn btn-primary btn-block press" data-menu-item>Subscribe</a>
    </nav>
  </div>
  {% endif %}
</header>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="footer">
  <div class="footer-pattern" aria-hidden="true"></div>
  <div class="container footer-inner">
    <div class="grid grid-3">
      <section data-reveal style="--reveal-delay: 0ms">
        <h3 class="footer-title">Contact Us</h3>
        <p class="nudge">Email: {{ site.email }}</p>
        <p class="nudge">Phone: {{ site.phone }}</p>
        <p class="nudge">Website: {{ site.website }}</p>
      </section>
      <section data-reveal style="--reveal-delay: 200ms">
        <h3 class="footer-title">Quick Links</h3>
        <ul class="footer-links">
          {% for link in footer_links %}
          <li class="nudge"><a href="{{ link.href }}">{{ link.text }}</a></li>
          {% endfor %}
        </ul>
      </section>
      <section data-reveal style="--reveal-delay: 400ms">
        <h3 class="footer-title">Newsletter</h3>
        <p class="label-text">Stay updated with our latest AI innovations</p>
        {% with form = footer_form %}{% include "newsletter_form.html" %}{% endwith %}
      </section>
    </div>
    <p class="copyright" data-reveal="fade" style="--reveal-delay: 600ms">&copy; {{ site.year }} {{ site.title }}. All rights reserved.</p>
  </div>
</footer>"##;

const FIELD_TEMPLATE: &str = r##"<div class="form-control{% if f.error %} has-error{% endif %}">
  {% if form.slot == "contact" %}<label class="label" for="{{ form.slot }}-{{ f.name }}"><span class="label-text">{{ f.label }}</span></label>{% endif %}
  {% if f.input == "textarea" %}
  <textarea id="{{ form.slot }}-{{ f.name }}" name="{{ f.name }}" class="textarea" placeholder="{{ f.placeholder }}"{% if f.required_message %} data-required-message="{{ f.required_message }}"{% endif %}{% if f.error %} aria-invalid="true"{% endif %}>{{ f.value }}</textarea>
  {% else %}
  <input id="{{ form.slot }}-{{ f.name }}" type="{% if f.input == "email" %}email{% else %}text{% endif %}" name="{{ f.name }}" value="{{ f.value }}" class="input" placeholder="{{ f.placeholder }}"{% if f.required_message %} data-required-message="{{ f.required_message }}"{% endif %}{% if f.email_message %} data-email-message="{{ f.email_message }}"{% endif %}{% if f.error %} aria-invalid="true"{% endif %}>
  {% endif %}
  <span class="field-error" data-error-for="{{ f.name }}"{% if not f.error %} hidden{% endif %}>{{ f.error or "" }}</span>
</div>"##;

const NOTICE_TEMPLATE: &str = r##"{% if form.notice %}<div class="alert {% if form.notice.success %}alert-success{% else %}alert-error{% endif %}" role="status">{{ form.notice.message }}</div>{% endif %}"##;

const NEWSLETTER_FORM_TEMPLATE: &str = r##"<form class="newsletter-form newsletter-{{ form.slot }}" method="post" action="{{ form.action }}" novalidate data-validate>
  <input type="hidden" name="slot" value="{{ form.slot }}">
  <input type="hidden" name="return_to" value="{{ return_to }}">
  {% for f in form.fields %}{% include "field.html" %}{% endfor %}
  <button type="submit" class="btn btn-primary press">{% if form.slot == "hero" %}Subscribe to Newsletter{% else %}Subscribe{% endif %}</button>
  {% include "notice.html" %}
</form>"##;

const CONTACT_FORM_TEMPLATE: &str = r##"<form class="card contact-form" method="post" action="{{ form.action }}" novalidate data-validate>
  <div class="card-body">
    <h2 class="card-title">Send us a Message</h2>
    <input type="hidden" name="slot" value="{{ form.slot }}">
    <input type="hidden" name="return_to" value="{{ return_to }}">
    {% for f in form.fields %}{% include "field.html" %}{% endfor %}
    <button type="submit" class="btn btn-primary btn-block press">Send Message</button>
    {% include "notice.html" %}
  </div>
</form>"##;

const CARD_TEMPLATE: &str = r##"<article class="card card-hover" data-reveal style="--reveal-delay: {{ card.delay_ms }}ms">
  <div class="card-body">
    <div class="card-heading">
      <span class="card-icon">{{ card.icon | safe }}</span>
      <h3 class="card-title">{{ card.title }}</h3>
    </div>
    <p>{{ card.description }}</p>
  </div>
</article>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="hero" id="newsletter">
  <div class="hero-pattern" aria-hidden="true"></div>
  <div class="container hero-content" data-enter>
    <h1 class="display gradient-text">{{ content.headline }}</h1>
    <p class="lead">Join {{ site.title }}'s newsletter to receive the latest updates on AI automation, conversational AI, and avatars for small businesses worldwide.</p>
    {% with form = hero_form %}{% include "newsletter_form.html" %}{% endwith %}
  </div>
</section>

<section class="section">
  <div class="container">
    <h2 class="section-title" data-reveal>Why Choose {{ site.title }}?</h2>
    <div class="grid grid-3">
      {% for card in content.features %}{% include "card.html" %}{% endfor %}
    </div>
  </div>
</section>

<section class="section section-alt">
  <div class="container grid grid-3">
    {% for stat in content.stats %}
    <div class="card stat">
      <div class="card-body">
        <div class="stat-label">{{ stat.label }}</div>
        <div class="stat-value text-{{ stat.tone }}">{{ stat.value }}</div>
      </div>
    </div>
    {% endfor %}
  </div>
</section>

<section class="section">
  <div class="container">
    <h2 class="section-title">Our Solutions in Action</h2>
    <div class="grid grid-3">
      {% for solution in content.solutions %}
      <article class="card card-hover">
        <figure class="card-figure"><img src="{{ base_url }}{{ solution.image }}" alt="{{ solution.title }}" loading="lazy"></figure>
        <div class="card-body">
          <h3 class="card-title">{{ solution.title }}</h3>
          <p class="muted">{{ solution.description }}</p>
        </div>
      </article>
      {% endfor %}
    </div>
  </div>
</section>
{% endblock %}"##;

const ABOUT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="hero hero-compact">
  <div class="hero-pattern hero-pattern-drift" aria-hidden="true"></div>
  <div class="container hero-content" data-enter>
    <h1 class="display gradient-text">About {{ site.title }}</h1>
    <p class="lead">{{ site.title }} is a leading AI automation company specializing in creating intelligent solutions for small businesses worldwide. Our mission is to make advanced AI technology accessible and practical for businesses of all sizes.</p>
  </div>
</section>

<section class="section">
  <div class="container">
    <h2 class="section-title" data-reveal>Our Values</h2>
    <div class="grid grid-3">
      {% for card in content.values %}{% include "card.html" %}{% endfor %}
    </div>
  </div>
</section>

<section class="section section-alt">
  <div class="container">
    <h2 class="section-title" data-reveal>Our Expertise</h2>
    <div class="grid grid-2 narrow">
      {% for item in content.expertise %}
      <article class="card lift">
        <div class="card-body">
          <div class="card-heading">
            <span class="card-icon">{{ item.icon | safe }}</span>
            <h3 class="card-title">{{ item.title }}</h3>
          </div>
          <p>{{ item.description }}</p>
          <ul class="bullets">
            {% for point in item.points %}<li>{{ point }}</li>{% endfor %}
          </ul>
        </div>
      </article>
      {% endfor %}
    </div>
  </div>
</section>
{% endblock %}"##;

const CONTACT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="section contact">
  <div class="container">
    <h1 class="page-title gradient-text" data-enter>Contact Us</h1>
    <div class="grid grid-2 wide">
      <div class="card" data-enter="left">
        <div class="card-body">
          <h2 class="card-title">Get in Touch</h2>
          <ul class="contact-info">
            {% for entry in content.info %}
            <li data-enter style="--enter-delay: {{ entry.delay_ms }}ms">
              <span class="contact-icon">{{ entry.icon | safe }}</span>
              <div>
                <h3>{{ entry.title }}</h3>
                <p>{{ entry.content }}</p>
              </div>
            </li>
            {% endfor %}
          </ul>
        </div>
      </div>
      <div data-enter="right">
        {% with form = contact_form %}{% include "contact_form.html" %}{% endwith %}
      </div>
    </div>
  </div>
</section>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="section not-found">
  <div class="container" data-enter>
    <h1 class="page-title gradient-text">Page not found</h1>
    <p class="lead">The page you are looking for does not exist yet.</p>
    <a href="{{ base_url }}" class="btn btn-primary press">Back to home</a>
  </div>
</section>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{footer_links, FormSlot, Notice, PageState};

    fn context(page: Page, state: &PageState) -> Context {
        let site = SiteInfo::default();
        Context {
            title: page.title().to_string(),
            page,
            content: PageContent::for_page(page, &site),
            site,
            base_url: "/".to_string(),
            return_to: page.path().to_string(),
            nav: NavView::new(&state.navbar, state.layout, page, "/"),
            icons: LayoutIcons::default(),
            footer_links: footer_links("/"),
            footer_form: FormView::new(FormSlot::Footer, &state.footer_form, state.notice.as_ref(), "/"),
            hero_form: FormView::new(FormSlot::Hero, &state.hero_form, state.notice.as_ref(), "/"),
            contact_form: FormView::new(FormSlot::Contact, &state.contact_form, state.notice.as_ref(), "/"),
            live_reload: false,
        }
    }

    #[test]
    fn renders_home_page() {
        let engine = TemplateEngine::new();
        let html = engine
            .render_page("home.html", &context(Page::Home, &PageState::default()))
            .unwrap();

        assert!(html.contains("<title>Home | Electromania</title>"));
        assert!(html.contains("Stay Ahead with AI Innovations"));
        assert!(html.contains("Why Choose Electromania?"));
        assert!(html.contains("Subscribe to Newsletter"));
        assert!(html.contains("1,000+"));
    }

    #[test]
    fn renders_navbar_and_footer_on_every_page() {
        let engine = TemplateEngine::new();
        for page in [Page::Home, Page::About, Page::Contact, Page::NotFound] {
            let html = engine
                .render_page(page.template(), &context(page, &PageState::default()))
                .unwrap();
            assert!(html.contains("data-navbar"), "{page:?} navbar");
            assert!(html.contains("Quick Links"), "{page:?} footer");
            assert!(html.contains("Privacy Policy"), "{page:?} footer links");
        }
    }

    #[test]
    fn closed_menu_renders_hidden_overlay() {
        let engine = TemplateEngine::new();
        let html = engine
            .render_page("about.html", &context(Page::About, &PageState::default()))
            .unwrap();

        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains(r#"data-phase="unmounted" hidden"#));
        assert!(html.contains(r#"href="&#x2f;about?menu=open""#));
    }

    #[test]
    fn open_menu_renders_mounted_overlay() {
        let engine = TemplateEngine::new();
        let mut state = PageState::default();
        state.navbar.toggle();

        let html = engine
            .render_page("about.html", &context(Page::About, &state))
            .unwrap();

        assert!(html.contains(r#"aria-expanded="true""#));
        assert!(html.contains(r#"data-phase="entering">"#));
    }

    #[test]
    fn renders_contact_errors_and_escapes_values() {
        let engine = TemplateEngine::new();
        let mut state = PageState::default();
        state.contact_form.set_value("name", "<b>Ann</b>");
        state.contact_form.set_value("email", "nope");
        state.contact_form.blur("email");

        let html = engine
            .render_page("contact.html", &context(Page::Contact, &state))
            .unwrap();

        assert!(html.contains("Invalid email"));
        assert!(html.contains("&lt;b&gt;Ann&lt;&#x2f;b&gt;"));
        assert!(!html.contains("<b>Ann</b>"));
        assert!(html.contains("Send Message"));
    }

    #[test]
    fn renders_notice_in_submitted_slot_only() {
        let engine = TemplateEngine::new();
        let mut state = PageState::default();
        state.notice = Some(Notice::success(FormSlot::Footer));

        let html = engine
            .render_page("home.html", &context(Page::Home, &state))
            .unwrap();

        assert_eq!(html.matches("Thanks for subscribing!").count(), 1);
    }
}
