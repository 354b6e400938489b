//! Asset pipeline for CSS and JavaScript processing.

use std::fmt::Write;

use electromania_ui::MOBILE_BREAKPOINT;

/// Theme colors and fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub neutral: &'static str,
    /// Page background, card background, borders
    pub base: [&'static str; 3],
    pub body_font: &'static str,
    pub display_font: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#FF6B6B",
            secondary: "#4ECDC4",
            accent: "#45B7D1",
            neutral: "#2A303C",
            base: ["#FFFFFF", "#F2F2F2", "#E5E6E6"],
            body_font: "Outfit",
            display_font: "Space Grotesk",
        }
    }
}

impl Theme {
    /// Custom properties for the `:root` rule.
    pub fn variables(&self) -> String {
        let mut css = String::from(":root {\n");
        let vars = [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("neutral", self.neutral),
            ("base-100", self.base[0]),
            ("base-200", self.base[1]),
            ("base-300", self.base[2]),
        ];
        for (name, value) in vars {
            let _ = writeln!(css, "  --{name}: {value};");
        }
        let _ = writeln!(
            css,
            "  --font-body: \"{}\", system-ui, sans-serif;",
            self.body_font
        );
        let _ = writeln!(
            css,
            "  --font-display: \"{}\", system-ui, sans-serif;",
            self.display_font
        );
        css.push_str("}\n");
        css
    }
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        Self::generate_css_with(&Theme::default())
    }

    pub fn generate_css_with(theme: &Theme) -> String {
        let breakpoints = BREAKPOINT_CSS.replace("{breakpoint}", &MOBILE_BREAKPOINT.to_string());
        format!("{}\n{}\n{}", theme.variables(), BASE_CSS, breakpoints)
    }

    /// Generate the runtime JavaScript file.
    pub fn generate_js() -> String {
        RUNTIME_JS.replace("{breakpoint}", &MOBILE_BREAKPOINT.to_string())
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const BASE_CSS: &str = r#"* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-body);
  background: var(--base-100);
  color: var(--neutral);
  line-height: 1.6;
  min-height: 100vh;
  display: flex;
  flex-direction: column;
}

a {
  color: inherit;
  text-decoration: none;
}

img {
  max-width: 100%;
  display: block;
}

.main {
  flex: 1;
}

.container {
  width: 100%;
  max-width: 1200px;
  margin: 0 auto;
  padding: 0 1rem;
}

.gradient-text {
  background: linear-gradient(90deg, var(--primary), var(--secondary));
  -webkit-background-clip: text;
  background-clip: text;
  color: transparent;
}

.display,
.page-title,
.section-title,
.brand-text {
  font-family: var(--font-display);
  font-weight: 700;
  line-height: 1.2;
}

.display {
  font-size: 3rem;
  margin-bottom: 1.5rem;
}

.page-title {
  font-size: 2.5rem;
  text-align: center;
  margin-bottom: 3rem;
}

.section-title {
  font-size: 2rem;
  text-align: center;
  margin-bottom: 3rem;
}

.lead {
  font-size: 1.25rem;
  margin-bottom: 2rem;
}

.muted {
  opacity: 0.8;
}

.text-primary { color: var(--primary); }
.text-secondary { color: var(--secondary); }
.text-accent { color: var(--accent); }

/* Navbar */
.navbar {
  position: sticky;
  top: 0;
  z-index: 50;
  background: var(--base-100);
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.08);
  animation: slide-down 0.5s ease-out both;
}

.navbar-inner {
  display: flex;
  align-items: center;
  justify-content: space-between;
  height: 4rem;
}

.brand-text {
  font-size: 1.5rem;
}

.desktop-menu {
  display: flex;
  align-items: center;
  gap: 1rem;
}

.nav-link {
  padding: 0.5rem 0.75rem;
  border-radius: 0.5rem;
  transition: background 0.2s, color 0.2s;
}

.nav-link:hover,
.nav-link.active {
  color: var(--primary);
}

.menu-toggle {
  display: inline-flex;
  padding: 0.5rem;
  border-radius: 0.5rem;
}

.icon svg,
.card-icon svg,
.contact-icon svg {
  width: 1.5rem;
  height: 1.5rem;
}

.menu-toggle .icon-close,
[data-menu-state="open"] .menu-toggle .icon-open {
  display: none;
}

[data-menu-state="open"] .menu-toggle .icon-close {
  display: inline-flex;
}

.mobile-menu {
  position: absolute;
  left: 0;
  right: 0;
  top: 4rem;
  background: var(--base-100);
  box-shadow: 0 8px 16px rgba(0, 0, 0, 0.1);
  overflow: hidden;
  opacity: 0;
  max-height: 0;
  transition: opacity 0.2s ease, max-height 0.2s ease;
}

.mobile-menu[hidden] {
  display: none;
}

.mobile-menu[data-phase="present"],
html.js .mobile-menu[data-phase="entering"].is-shown,
html:not(.js) .mobile-menu[data-phase="entering"] {
  opacity: 1;
  max-height: 24rem;
}

.mobile-menu-list {
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  padding: 1rem;
}

.mobile-link {
  padding: 0.75rem 1rem;
  border-radius: 0.5rem;
}

.mobile-link.active {
  color: var(--primary);
  background: var(--base-200);
}

/* Buttons and motion helpers */
.btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  padding: 0.75rem 1.5rem;
  border: none;
  border-radius: 0.5rem;
  font: inherit;
  font-weight: 600;
  cursor: pointer;
}

.btn-primary {
  background: var(--primary);
  color: var(--base-100);
}

.btn-block {
  width: 100%;
}

.press {
  transition: transform 0.15s ease;
}

.press:hover {
  transform: scale(1.05);
}

.press:active {
  transform: scale(0.95);
}

.nudge {
  transition: transform 0.2s ease;
}

.nudge:hover {
  transform: translateX(10px);
}

.lift {
  transition: transform 0.2s ease;
}

.lift:hover {
  transform: translateY(-5px);
}

/* Hero */
.hero {
  position: relative;
  overflow: hidden;
  min-height: 70vh;
  display: flex;
  align-items: center;
  text-align: center;
  background: var(--base-200);
}

.hero-compact {
  min-height: 50vh;
}

.hero-content {
  position: relative;
  max-width: 48rem;
}

.hero-pattern,
.footer-pattern {
  position: absolute;
  inset: 0;
  opacity: 0.1;
  background-image: radial-gradient(circle at 1px 1px, var(--primary) 1px, transparent 0);
  background-size: 40px 40px;
}

.hero-pattern-drift,
.footer-pattern {
  animation: drift 20s linear infinite alternate;
}

/* Sections and cards */
.section {
  padding: 5rem 0;
}

.section-alt {
  background: var(--base-200);
}

.grid {
  display: grid;
  gap: 2rem;
}

.narrow {
  max-width: 64rem;
  margin: 0 auto;
}

.card {
  background: var(--base-100);
  border-radius: 1rem;
  box-shadow: 0 10px 25px rgba(0, 0, 0, 0.08);
  overflow: hidden;
}

.card-body {
  padding: 2rem;
}

.card-hover {
  transition: transform 0.2s ease, box-shadow 0.2s ease;
}

.card-hover:hover {
  transform: translateY(-5px);
  box-shadow: 0 16px 32px rgba(0, 0, 0, 0.12);
}

.card-heading {
  display: flex;
  align-items: center;
  gap: 1rem;
  margin-bottom: 1rem;
}

.card-icon,
.contact-icon {
  color: var(--primary);
  display: inline-flex;
}

.card-title {
  font-size: 1.25rem;
  font-weight: 700;
}

.card-figure img {
  width: 100%;
  height: 12rem;
  object-fit: cover;
}

.stat {
  text-align: center;
}

.stat-label {
  opacity: 0.7;
}

.stat-value {
  font-size: 2.5rem;
  font-weight: 800;
}

.bullets {
  margin-top: 1rem;
  padding-left: 1.25rem;
}

.contact-info {
  list-style: none;
  display: flex;
  flex-direction: column;
  gap: 1.5rem;
  margin-top: 1.5rem;
}

.contact-info li {
  display: flex;
  gap: 1rem;
  align-items: flex-start;
}

/* Forms */
.newsletter-form {
  display: flex;
  flex-direction: column;
  gap: 1rem;
  max-width: 28rem;
  margin: 0 auto;
}

.form-control {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
  margin-bottom: 1rem;
  text-align: left;
}

.input,
.textarea {
  width: 100%;
  padding: 0.75rem 1rem;
  border: 1px solid var(--base-300);
  border-radius: 0.5rem;
  font: inherit;
  background: var(--base-100);
}

.textarea {
  min-height: 8rem;
  resize: vertical;
}

.has-error .input,
.has-error .textarea {
  border-color: var(--primary);
}

.field-error {
  color: var(--primary);
  font-size: 0.875rem;
}

.field-error[hidden] {
  display: none;
}

.alert {
  padding: 0.75rem 1rem;
  border-radius: 0.5rem;
}

.alert-success {
  background: var(--secondary);
  color: var(--neutral);
}

.alert-error {
  background: var(--primary);
  color: var(--base-100);
}

/* Footer */
.footer {
  position: relative;
  overflow: hidden;
  background: var(--neutral);
  color: var(--base-100);
  padding: 4rem 0 2rem;
}

.footer-inner {
  position: relative;
}

.footer-title {
  font-family: var(--font-display);
  font-size: 1.125rem;
  margin-bottom: 1rem;
}

.footer-links {
  list-style: none;
}

.footer .label-text {
  color: var(--base-300);
  margin-bottom: 1rem;
  display: block;
}

.copyright {
  margin-top: 3rem;
  padding-top: 2rem;
  border-top: 1px solid rgba(255, 255, 255, 0.1);
  text-align: center;
  opacity: 0.8;
}

/* Entrance and reveal */
[data-enter] {
  animation: enter-up 0.6s ease-out both;
  animation-delay: var(--enter-delay, 0ms);
}

[data-enter="left"] {
  animation-name: enter-left;
}

[data-enter="right"] {
  animation-name: enter-right;
}

html.js [data-reveal] {
  transition: opacity 0.5s ease, transform 0.5s ease;
  transition-delay: var(--reveal-delay, 0ms);
}

html.js [data-reveal]:not(.is-revealed) {
  opacity: 0;
  transform: translateY(20px);
}

html.js [data-reveal="fade"]:not(.is-revealed) {
  transform: none;
}

@keyframes slide-down {
  from { transform: translateY(-100px); }
  to { transform: none; }
}

@keyframes enter-up {
  from { opacity: 0; transform: translateY(20px); }
  to { opacity: 1; transform: none; }
}

@keyframes enter-left {
  from { opacity: 0; transform: translateX(-20px); }
  to { opacity: 1; transform: none; }
}

@keyframes enter-right {
  from { opacity: 0; transform: translateX(20px); }
  to { opacity: 1; transform: none; }
}

@keyframes drift {
  from { background-position: 0 0; }
  to { background-position: 40px 40px; }
}
"#;

const BREAKPOINT_CSS: &str = r#"@media (max-width: 767px) {
  .desktop-menu {
    display: none;
  }

  .display {
    font-size: 2.25rem;
  }
}

@media (min-width: {breakpoint}px) {
  .menu-toggle,
  .mobile-menu {
    display: none !important;
  }

  .grid-2 { grid-template-columns: repeat(2, 1fr); }
  .grid-3 { grid-template-columns: repeat(3, 1fr); }
}

@media (prefers-reduced-motion: reduce) {
  *,
  *::before,
  *::after {
    animation-duration: 0.01ms !important;
    animation-iteration-count: 1 !important;
    transition-duration: 0.01ms !important;
  }
}
"#;

// Mirrors the navbar state machine: the overlay stays mounted through its
// exit transition and unmounts on `transitionend`, or at once when the
// exit has nothing to animate.
const RUNTIME_JS: &str = r##"(function () {
  'use strict';

  var EMAIL_RE = /^[a-zA-Z0-9.!#$%&'*+\/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$/;
  var reducedMotion = window.matchMedia('(prefers-reduced-motion: reduce)');
  var desktop = window.matchMedia('(min-width: {breakpoint}px)');

  function initNavbar(root) {
    var toggle = root.querySelector('[data-menu-toggle]');
    var overlay = root.querySelector('#mobile-menu');
    if (!toggle || !overlay) return;

    var state = root.getAttribute('data-menu-state') === 'open' ? 'open' : 'closed';
    var phase = overlay.getAttribute('data-phase') || 'unmounted';

    function setPhase(next) {
      phase = next;
      overlay.setAttribute('data-phase', next);
      overlay.hidden = next === 'unmounted';
      overlay.classList.toggle('is-shown', next === 'entering' || next === 'present');
    }

    function setState(next) {
      state = next;
      root.setAttribute('data-menu-state', next);
      toggle.setAttribute('aria-expanded', String(next === 'open'));
    }

    function complete() {
      if (phase === 'entering') setPhase('present');
      else if (phase === 'exiting') setPhase('unmounted');
    }

    function enter() {
      if (phase === 'entering' || phase === 'present') return;
      if (phase === 'unmounted') {
        overlay.hidden = false;
        void overlay.offsetWidth;
      }
      setPhase('entering');
      if (reducedMotion.matches) complete();
    }

    // An exit that starts at opacity 0 never fires `transitionend`.
    function settleExit() {
      if (phase === 'exiting' && window.getComputedStyle(overlay).opacity === '0') complete();
    }

    function exit() {
      if (phase === 'unmounted' || phase === 'exiting') return;
      setPhase('exiting');
      if (reducedMotion.matches) complete();
      else settleExit();
    }

    function close() {
      if (state !== 'open') return;
      setState('closed');
      exit();
    }

    toggle.addEventListener('click', function (event) {
      event.preventDefault();
      if (state === 'open') {
        close();
      } else {
        setState('open');
        enter();
      }
    });

    overlay.addEventListener('transitionend', function (event) {
      if (event.target === overlay && event.propertyName === 'opacity') complete();
    });

    overlay.addEventListener('transitioncancel', function (event) {
      if (event.target === overlay && event.propertyName === 'opacity') settleExit();
    });

    overlay.querySelectorAll('[data-menu-item]').forEach(function (item) {
      item.addEventListener('click', close);
    });

    desktop.addEventListener('change', function (event) {
      if (!event.matches) return;
      close();
      setPhase('unmounted');
    });

    if (state === 'open' && phase === 'entering') {
      overlay.classList.add('is-shown');
    }
  }

  function initReveal() {
    var targets = document.querySelectorAll('[data-reveal]');
    if (!('IntersectionObserver' in window)) {
      targets.forEach(function (el) { el.classList.add('is-revealed'); });
      return;
    }
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (entry) {
        if (!entry.isIntersecting) return;
        entry.target.classList.add('is-revealed');
        observer.unobserve(entry.target);
      });
    }, { threshold: 0.1 });
    targets.forEach(function (el) { observer.observe(el); });
  }

  function fieldError(input) {
    var value = input.value;
    var required = input.getAttribute('data-required-message');
    var email = input.getAttribute('data-email-message');
    if (required && value === '') return required;
    if (email && value !== '' && !EMAIL_RE.test(value)) return email;
    return null;
  }

  function showError(form, input, message) {
    var slot = form.querySelector('[data-error-for="' + input.name + '"]');
    var control = input.closest('.form-control');
    if (slot) {
      slot.textContent = message || '';
      slot.hidden = !message;
    }
    if (control) control.classList.toggle('has-error', !!message);
    if (message) input.setAttribute('aria-invalid', 'true');
    else input.removeAttribute('aria-invalid');
  }

  function initForm(form) {
    var inputs = form.querySelectorAll('[data-required-message], [data-email-message]');
    var touched = {};

    inputs.forEach(function (input) {
      if (input.getAttribute('aria-invalid') === 'true') touched[input.name] = true;
      input.addEventListener('blur', function () {
        touched[input.name] = true;
        showError(form, input, fieldError(input));
      });
      input.addEventListener('input', function () {
        if (touched[input.name]) showError(form, input, fieldError(input));
      });
    });

    form.addEventListener('submit', function (event) {
      var firstInvalid = null;
      inputs.forEach(function (input) {
        touched[input.name] = true;
        var message = fieldError(input);
        showError(form, input, message);
        if (message && !firstInvalid) firstInvalid = input;
      });
      if (firstInvalid) {
        event.preventDefault();
        firstInvalid.focus();
      }
    });
  }

  document.querySelectorAll('[data-navbar]').forEach(initNavbar);
  document.querySelectorAll('form[data-validate]').forEach(initForm);
  initReveal();
})();
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css_from_theme() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains("--primary: #FF6B6B;"));
        assert!(css.contains("--secondary: #4ECDC4;"));
        assert!(css.contains("\"Space Grotesk\""));
        assert!(css.contains("@media (min-width: 768px)"));
        assert!(!css.contains("{breakpoint}"));
    }

    #[test]
    fn custom_theme_overrides_colors() {
        let theme = Theme {
            primary: "#000000",
            ..Theme::default()
        };
        let css = AssetPipeline::generate_css_with(&theme);
        assert!(css.contains("--primary: #000000;"));
    }

    #[test]
    fn generates_js_runtime() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("transitionend"));
        assert!(js.contains("transitioncancel"));
        assert!(js.contains("IntersectionObserver"));
        assert!(js.contains("threshold: 0.1"));
        assert!(js.contains("(min-width: 768px)"));
        assert!(!js.contains("{breakpoint}"));
    }

    #[test]
    fn exit_settles_without_a_transition() {
        let js = AssetPipeline::generate_js();
        let exit = &js[js.find("function exit()").unwrap()..];
        let exit = &exit[..exit.find("\n    }\n").unwrap()];

        assert!(exit.contains("settleExit()"));
        assert!(js.contains("getComputedStyle(overlay).opacity === '0'"));
    }

    #[test]
    fn minifies_css() {
        let css = AssetPipeline::generate_css();
        let minified = AssetPipeline::minify_css(&css).unwrap();
        assert!(minified.len() < css.len());
        assert!(!minified.contains("\n  "));
    }
}
