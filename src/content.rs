//! Content types and quick-prompt presets.
//!
//! A content type is the output shape the user asks for. The tag strings are
//! what the host CMS stores in the field value, so they must stay stable.

use serde::{Deserialize, Serialize};

/// Requested output shape for generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    #[default]
    Text,
    Headline,
    Description,
    Bullets,
    Cta,
    AltText,
    Tagline,
    Subject,
}

impl ContentType {
    pub fn all() -> Vec<ContentType> {
        vec![
            ContentType::Text,
            ContentType::Headline,
            ContentType::Description,
            ContentType::Bullets,
            ContentType::Cta,
            ContentType::AltText,
            ContentType::Tagline,
            ContentType::Subject,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Headline => "headline",
            ContentType::Description => "description",
            ContentType::Bullets => "bullets",
            ContentType::Cta => "cta",
            ContentType::AltText => "alt-text",
            ContentType::Tagline => "tagline",
            ContentType::Subject => "subject",
        }
    }

    /// Parse a stored tag. Unknown or empty tags fall back to `Text`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "headline" => ContentType::Headline,
            "description" => ContentType::Description,
            "bullets" => ContentType::Bullets,
            "cta" => ContentType::Cta,
            "alt-text" => ContentType::AltText,
            "tagline" => ContentType::Tagline,
            "subject" => ContentType::Subject,
            _ => ContentType::Text,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Text => "General Text",
            ContentType::Headline => "Headline",
            ContentType::Description => "Description",
            ContentType::Bullets => "Bullet Points",
            ContentType::Cta => "Call to Action",
            ContentType::AltText => "Alt Text",
            ContentType::Tagline => "Tagline",
            ContentType::Subject => "Email Subject",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ContentType::Text => "📄",
            ContentType::Headline => "✨",
            ContentType::Description => "🤖",
            ContentType::Bullets => "✅",
            ContentType::Cta => "➡️",
            ContentType::AltText => "🖼️",
            ContentType::Tagline => "💡",
            ContentType::Subject => "✉️",
        }
    }

    /// Multi-line list output (one item per line).
    pub fn is_list(&self) -> bool {
        matches!(self, ContentType::Bullets)
    }

    /// Headlines never end with punctuation.
    pub fn is_headline(&self) -> bool {
        matches!(self, ContentType::Headline)
    }
}

impl From<String> for ContentType {
    fn from(tag: String) -> Self {
        ContentType::from_tag(&tag)
    }
}

impl From<ContentType> for String {
    fn from(ct: ContentType) -> Self {
        ct.as_str().to_string()
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A preset instruction the user can drop into the prompt box.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickPrompt {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
    pub content_type: ContentType,
    pub icon: &'static str,
}

pub const QUICK_PROMPTS: &[QuickPrompt] = &[
    QuickPrompt {
        id: "headline-value",
        label: "Magnetic Value Headline",
        prompt: "Craft a 7-10 word headline that states the core value prop with urgency and clarity. Avoid jargon. End without punctuation.",
        content_type: ContentType::Headline,
        icon: "✨",
    },
    QuickPrompt {
        id: "description-benefit",
        label: "Benefit-First Description",
        prompt: "Explain what this does in 2 crisp sentences. Lead with the main benefit, then how it works. Keep it friendly, confident, approachable.",
        content_type: ContentType::Description,
        icon: "🤖",
    },
    QuickPrompt {
        id: "bullets-outcomes",
        label: "Outcome Bullets",
        prompt: "List 4 bullets focused on outcomes, not features. Each bullet should start with an action verb and be <9 words.",
        content_type: ContentType::Bullets,
        icon: "✅",
    },
    QuickPrompt {
        id: "cta-primary",
        label: "Primary CTA",
        prompt: "Write a concise CTA (2-4 words) that sets clear expectations and reduces anxiety (e.g., Free, No card, 30s).",
        content_type: ContentType::Cta,
        icon: "➡️",
    },
    QuickPrompt {
        id: "alt-text-accessible",
        label: "Accessible Alt Text",
        prompt: "Describe the image for screen readers: mention role, key objects, color or mood if relevant, avoid redundancy like “image of”. Max 120 chars.",
        content_type: ContentType::AltText,
        icon: "🖼️",
    },
    QuickPrompt {
        id: "tagline",
        label: "Smart Tagline",
        prompt: "Create a short, memorable tagline (3-5 words) that reinforces the value proposition. Avoid clichés.",
        content_type: ContentType::Tagline,
        icon: "💡",
    },
    QuickPrompt {
        id: "email-subject",
        label: "Email Subject",
        prompt: "Generate a high-open-rate subject line with curiosity, ~45 chars, no clickbait, action-oriented.",
        content_type: ContentType::Subject,
        icon: "✉️",
    },
];

/// Look up a quick prompt by id.
pub fn quick_prompt(id: &str) -> Option<&'static QuickPrompt> {
    QUICK_PROMPTS.iter().find(|qp| qp.id == id)
}
