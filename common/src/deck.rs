use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Background used when a slide does not carry a usable color.
pub const DEFAULT_BACKGROUND: &str = "FFFFFF";

/// A whole presentation: a title plus its slides in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

/// One page of a [`Deck`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub title: String,
    /// Bullet lines, in presentation order.
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Visual template of a slide. Unknown values read as [`Layout::Content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    Title,
    #[default]
    Content,
    ImageContent,
    TwoColumn,
}

impl Layout {
    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Layout::Title,
            "image-content" => Layout::ImageContent,
            "two-column" => Layout::TwoColumn,
            _ => Layout::Content,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Title => "title",
            Layout::Content => "content",
            Layout::ImageContent => "image-content",
            Layout::TwoColumn => "two-column",
        }
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Layout::from_wire).unwrap_or_default())
    }
}

impl Deck {
    pub fn new(title: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            title: title.into(),
            slides,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Ids that appear on more than one slide, each reported once.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dups = Vec::new();
        for slide in &self.slides {
            let id = slide.id.as_str();
            if !seen.insert(id) && reported.insert(id) {
                dups.push(id);
            }
        }
        dups
    }

    /// Ids of `prior` that no longer appear in this deck.
    pub fn missing_ids<'a>(&self, prior: &'a Deck) -> Vec<&'a str> {
        let current: HashSet<&str> = self.slides.iter().map(|s| s.id.as_str()).collect();
        prior
            .slides
            .iter()
            .map(|s| s.id.as_str())
            .filter(|id| !current.contains(id))
            .collect()
    }
}

impl Slide {
    pub fn new(id: impl Into<String>, title: impl Into<String>, layout: Layout) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: Vec::new(),
            layout,
            background_color: None,
            image_url: None,
        }
    }

    pub fn with_content<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// First content line, shown as the subtitle of title slides.
    pub fn subtitle(&self) -> Option<&str> {
        self.content.first().map(String::as_str)
    }

    /// Background as six hex digits. Tolerates a leading `#`; anything else
    /// that is not `RRGGBB` falls back to white.
    pub fn background_hex(&self) -> &str {
        self.background_color
            .as_deref()
            .map(|c| c.trim().trim_start_matches('#'))
            .filter(|c| c.len() == 6 && c.chars().all(|ch| ch.is_ascii_hexdigit()))
            .unwrap_or(DEFAULT_BACKGROUND)
    }
}
