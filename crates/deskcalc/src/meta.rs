//! Page metadata
//!
//! Head tags for the desktop page: primary meta tags, schema.org, Twitter
//! Card, Open Graph, icons and the font stylesheet.

use serde::{Deserialize, Serialize};

/// Key attribute of a `<meta>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaKey {
    /// `<meta charset>`; the tag's content is the charset itself
    Charset,
    /// `name="..."`
    Name(String),
    /// `property="..."`
    Property(String),
    /// `itemprop="..."`
    ItemProp(String),
    /// `http-equiv="..."`
    HttpEquiv(String),
}

/// One element of the document head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum HeadTag {
    /// `<title>`
    Title {
        /// Title text
        text: String,
    },
    /// `<meta>`
    Meta {
        /// Key attribute
        key: MetaKey,
        /// Content value
        content: String,
    },
    /// `<link>`
    Link {
        /// Link relation
        rel: String,
        /// Target URL
        href: String,
        /// Preload destination (`as` attribute)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        as_type: Option<String>,
    },
}

impl HeadTag {
    fn name(name: &str, content: &str) -> Self {
        Self::Meta {
            key: MetaKey::Name(name.to_string()),
            content: content.to_string(),
        }
    }

    fn property(property: &str, content: &str) -> Self {
        Self::Meta {
            key: MetaKey::Property(property.to_string()),
            content: content.to_string(),
        }
    }

    fn itemprop(itemprop: &str, content: &str) -> Self {
        Self::Meta {
            key: MetaKey::ItemProp(itemprop.to_string()),
            content: content.to_string(),
        }
    }

    fn link(rel: &str, href: &str) -> Self {
        Self::Link {
            rel: rel.to_string(),
            href: href.to_string(),
            as_type: None,
        }
    }

    /// Renders the tag as HTML
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Title { text } => format!("<title>{}</title>", escape(text)),
            Self::Meta { key, content } => {
                let (attr, value) = match key {
                    MetaKey::Charset => {
                        return format!(r#"<meta charset="{}">"#, escape(content));
                    }
                    MetaKey::Name(v) => ("name", v),
                    MetaKey::Property(v) => ("property", v),
                    MetaKey::ItemProp(v) => ("itemprop", v),
                    MetaKey::HttpEquiv(v) => ("http-equiv", v),
                };
                format!(
                    r#"<meta {attr}="{}" content="{}">"#,
                    escape(value),
                    escape(content)
                )
            }
            Self::Link { rel, href, as_type } => {
                let as_attr = as_type
                    .as_ref()
                    .map(|a| format!(r#" as="{}""#, escape(a)))
                    .unwrap_or_default();
                format!(
                    r#"<link rel="{}" href="{}"{as_attr}>"#,
                    escape(rel),
                    escape(href)
                )
            }
        }
    }
}

/// Escapes text for use inside an HTML attribute or element
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Site-wide metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    /// Page and share title
    pub title: String,
    /// Page and share description
    pub description: String,
    /// Author name, also used as Twitter creator
    pub author: String,
    /// Search keywords
    pub keywords: Vec<String>,
    /// Robots directive
    pub robots: String,
    /// Content language name
    pub language: String,
    /// Browser theme colour
    pub theme_color: String,
    /// Search engine and schema.org image
    pub image: String,
    /// Canonical site URL
    pub site_url: String,
    /// Open Graph site name
    pub site_name: String,
    /// Open Graph locale
    pub locale: String,
    /// Open Graph image
    pub og_image: String,
    /// Twitter card type
    pub twitter_card: String,
    /// Twitter site handle
    pub twitter_site: String,
    /// Twitter image
    pub twitter_image: String,
    /// Favicon
    pub icon: String,
    /// Apple touch icon
    pub apple_touch_icon: String,
    /// Web font stylesheet, preloaded then applied; empty to skip
    pub font_stylesheet: String,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: "Desktop Portfolio".to_string(),
            description: "A personal portfolio presented as a desktop environment.".to_string(),
            author: "Portfolio Owner".to_string(),
            keywords: vec![
                "portfolio".to_string(),
                "desktop".to_string(),
                "calculator".to_string(),
            ],
            robots: "index, follow".to_string(),
            language: "English".to_string(),
            theme_color: "#E95420".to_string(),
            image: "images/logos/favicon.png".to_string(),
            site_url: "http://localhost/".to_string(),
            site_name: "Desktop Portfolio".to_string(),
            locale: "en_US".to_string(),
            og_image: "images/logos/logo_1200.png".to_string(),
            twitter_card: "summary".to_string(),
            twitter_site: "Portfolio Owner".to_string(),
            twitter_image: "images/logos/logo_1024.png".to_string(),
            icon: "images/logos/favicon.svg".to_string(),
            apple_touch_icon: "images/logos/logo.png".to_string(),
            font_stylesheet: "https://fonts.googleapis.com/css2?family=Ubuntu:wght@300;400;500;700&display=swap"
                .to_string(),
        }
    }
}

impl PageMeta {
    /// Head tags in document order
    #[must_use]
    pub fn head_tags(&self) -> Vec<HeadTag> {
        let keywords = self.keywords.join(", ");
        let mut tags = vec![
            HeadTag::Title {
                text: self.title.clone(),
            },
            HeadTag::Meta {
                key: MetaKey::Charset,
                content: "utf-8".to_string(),
            },
            HeadTag::name("title", &self.title),
            HeadTag::name("description", &self.description),
            HeadTag::name("author", &self.author),
            HeadTag::name("keywords", &keywords),
            HeadTag::name("robots", &self.robots),
            HeadTag::Meta {
                key: MetaKey::HttpEquiv("Content-Type".to_string()),
                content: "text/html; charset=utf-8".to_string(),
            },
            HeadTag::name("language", &self.language),
            HeadTag::name("viewport", "width=device-width, initial-scale=1"),
            HeadTag::name("theme-color", &self.theme_color),
            HeadTag::name("image", &self.image),
            // schema.org
            HeadTag::itemprop("name", &self.title),
            HeadTag::itemprop("description", &self.description),
            HeadTag::itemprop("image", &self.image),
            // Twitter
            HeadTag::name("twitter:card", &self.twitter_card),
            HeadTag::name("twitter:title", &self.title),
            HeadTag::name("twitter:description", &self.description),
            HeadTag::name("twitter:site", &self.twitter_site),
            HeadTag::name("twitter:creator", &self.author),
            HeadTag::name("twitter:image:src", &self.twitter_image),
            // Open Graph
            HeadTag::property("og:title", &self.title),
            HeadTag::property("og:description", &self.description),
            HeadTag::property("og:image", &self.og_image),
            HeadTag::property("og:url", &self.site_url),
            HeadTag::property("og:site_name", &self.site_name),
            HeadTag::property("og:locale", &self.locale),
            HeadTag::property("og:type", "website"),
            HeadTag::link("icon", &self.icon),
            HeadTag::link("apple-touch-icon", &self.apple_touch_icon),
        ];

        if !self.font_stylesheet.is_empty() {
            tags.push(HeadTag::Link {
                rel: "preload".to_string(),
                href: self.font_stylesheet.clone(),
                as_type: Some("style".to_string()),
            });
            tags.push(HeadTag::link("stylesheet", &self.font_stylesheet));
        }

        tags
    }

    /// Renders every head tag, one per line
    #[must_use]
    pub fn render_head(&self) -> String {
        self.head_tags()
            .iter()
            .map(HeadTag::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
