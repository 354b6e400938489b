//! Site details, routes and the copy of each page.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::icons::Icon;

/// Company details shown in the navbar, footer and contact page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    /// Company name
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    /// Copyright year
    pub year: u16,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Electromania".to_string(),
            email: "info@electromania.llc".to_string(),
            phone: "+1 786 213 5996".to_string(),
            website: "electromania.llc".to_string(),
            year: 2024,
        }
    }
}

/// A routable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    About,
    Contact,
    NotFound,
}

impl Page {
    /// Pages with a route of their own.
    pub const ROUTED: [Page; 3] = [Page::Home, Page::About, Page::Contact];

    /// Resolve a request path. Anything unknown is [`Page::NotFound`].
    pub fn from_path(path: &str) -> Page {
        match path.trim_end_matches('/') {
            "" => Page::Home,
            "/about" => Page::About,
            "/contact" => Page::Contact,
            _ => Page::NotFound,
        }
    }

    /// Route path.
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Contact => "/contact",
            Page::NotFound => "/404",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Contact => "Contact",
            Page::NotFound => "Page not found",
        }
    }

    /// Template that renders this page.
    pub fn template(self) -> &'static str {
        match self {
            Page::Home => "home.html",
            Page::About => "about.html",
            Page::Contact => "contact.html",
            Page::NotFound => "not_found.html",
        }
    }

    /// File written by the static export, relative to the output directory.
    pub fn output_file(self) -> PathBuf {
        match self {
            Page::Home => PathBuf::from("index.html"),
            Page::About => PathBuf::from("about").join("index.html"),
            Page::Contact => PathBuf::from("contact").join("index.html"),
            Page::NotFound => PathBuf::from("404.html"),
        }
    }
}

/// Card revealed on scroll.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    /// Reveal delay
    pub delay_ms: u32,
}

/// Headline number on the home page.
#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
    /// Theme color class (`primary`, `secondary`, `accent`)
    pub tone: &'static str,
}

/// Illustrated solution card.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

/// Expertise card on the about page.
#[derive(Debug, Clone, Serialize)]
pub struct Expertise {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub points: [&'static str; 3],
}

/// One contact channel.
#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub title: &'static str,
    pub content: String,
    pub icon: Icon,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeContent {
    pub headline: &'static str,
    pub features: Vec<Card>,
    pub stats: Vec<Stat>,
    pub solutions: Vec<Solution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutContent {
    pub values: Vec<Card>,
    pub expertise: Vec<Expertise>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactContent {
    pub info: Vec<ContactInfo>,
}

/// Page-specific part of the template context.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PageContent {
    Home(HomeContent),
    About(AboutContent),
    Contact(ContactContent),
    Empty {},
}

impl PageContent {
    /// Copy for `page`.
    pub fn for_page(page: Page, site: &SiteInfo) -> Self {
        match page {
            Page::Home => PageContent::Home(home()),
            Page::About => PageContent::About(about()),
            Page::Contact => PageContent::Contact(contact(site)),
            Page::NotFound => PageContent::Empty {},
        }
    }
}

fn home() -> HomeContent {
    HomeContent {
        headline: "Stay Ahead with AI Innovations",
        features: vec![
            Card {
                title: "AI-Driven Success",
                description: "Transform your business with our cutting-edge AI solutions that deliver measurable results.",
                icon: Icon::Beaker,
                delay_ms: 0,
            },
            Card {
                title: "Conversational AI",
                description: "Enhance customer engagement with intelligent chatbots and virtual assistants.",
                icon: Icon::ChatBubbleText,
                delay_ms: 200,
            },
            Card {
                title: "Custom Avatars",
                description: "Create unique brand personalities with customized AI avatars for your business.",
                icon: Icon::UserCircle,
                delay_ms: 400,
            },
        ],
        stats: vec![
            Stat {
                label: "Happy Clients",
                value: "500+",
                tone: "primary",
            },
            Stat {
                label: "AI Solutions Deployed",
                value: "1,000+",
                tone: "secondary",
            },
            Stat {
                label: "Success Rate",
                value: "98%",
                tone: "accent",
            },
        ],
        solutions: vec![
            Solution {
                title: "AI Automation",
                description: "Streamline your business processes with intelligent automation.",
                image: "images/ai-automation.svg",
            },
            Solution {
                title: "Conversational AI",
                description: "Engage customers 24/7 with intelligent chat solutions.",
                image: "images/chatbot.svg",
            },
            Solution {
                title: "Custom Avatars",
                description: "Create unique brand personalities with AI avatars.",
                image: "images/avatar.svg",
            },
        ],
    }
}

fn about() -> AboutContent {
    AboutContent {
        values: vec![
            Card {
                title: "Innovation",
                description: "We constantly push the boundaries of what's possible with AI technology, creating cutting-edge solutions that drive business growth.",
                icon: Icon::LightBulb,
                delay_ms: 0,
            },
            Card {
                title: "Accessibility",
                description: "We believe that advanced AI technology should be accessible to businesses of all sizes, not just large enterprises.",
                icon: Icon::Globe,
                delay_ms: 200,
            },
            Card {
                title: "Customer Success",
                description: "Your success is our success. We're committed to providing solutions that deliver real, measurable results for your business.",
                icon: Icon::UserGroup,
                delay_ms: 400,
            },
        ],
        expertise: vec![
            Expertise {
                title: "AI Automation",
                description: "Our team specializes in creating custom AI automation solutions that streamline operations and boost efficiency for small businesses.",
                icon: Icon::CpuChip,
                points: [
                    "Process Automation",
                    "Workflow Optimization",
                    "Custom AI Solutions",
                ],
            },
            Expertise {
                title: "Conversational AI",
                description: "We develop intelligent chatbots and virtual assistants that provide 24/7 customer support and enhance user engagement.",
                icon: Icon::ChatBubbles,
                points: [
                    "Custom Chatbots",
                    "Virtual Assistants",
                    "Natural Language Processing",
                ],
            },
        ],
    }
}

fn contact(site: &SiteInfo) -> ContactContent {
    ContactContent {
        info: vec![
            ContactInfo {
                title: "Email",
                content: site.email.clone(),
                icon: Icon::Envelope,
                delay_ms: 200,
            },
            ContactInfo {
                title: "Phone",
                content: site.phone.clone(),
                icon: Icon::Phone,
                delay_ms: 400,
            },
            ContactInfo {
                title: "Website",
                content: site.website.clone(),
                icon: Icon::Globe,
                delay_ms: 600,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_routes() {
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path(""), Page::Home);
        assert_eq!(Page::from_path("/about"), Page::About);
        assert_eq!(Page::from_path("/about/"), Page::About);
        assert_eq!(Page::from_path("/contact"), Page::Contact);
        assert_eq!(Page::from_path("/services"), Page::NotFound);
        assert_eq!(Page::from_path("/privacy"), Page::NotFound);
    }

    #[test]
    fn routed_pages_round_trip_through_paths() {
        for page in Page::ROUTED {
            assert_eq!(Page::from_path(page.path()), page);
        }
    }

    #[test]
    fn output_files_nest_under_directories() {
        assert_eq!(Page::Home.output_file(), PathBuf::from("index.html"));
        assert_eq!(
            Page::Contact.output_file(),
            PathBuf::from("contact/index.html")
        );
        assert_eq!(Page::NotFound.output_file(), PathBuf::from("404.html"));
    }

    #[test]
    fn contact_info_uses_site_details() {
        let site = SiteInfo {
            email: "hello@example.com".to_string(),
            ..SiteInfo::default()
        };
        let PageContent::Contact(content) = PageContent::for_page(Page::Contact, &site) else {
            panic!("contact page should have contact content");
        };
        assert_eq!(content.info[0].content, "hello@example.com");
        let delays: Vec<u32> = content.info.iter().map(|i| i.delay_ms).collect();
        assert_eq!(delays, vec![200, 400, 600]);
    }

    #[test]
    fn site_info_defaults_to_company_details() {
        let site: SiteInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(site.title, "Electromania");
        assert_eq!(site.phone, "+1 786 213 5996");
        assert_eq!(site.year, 2024);
    }
}
