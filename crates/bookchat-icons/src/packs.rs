//! Icon packs and the built-in solid, regular and brand sets.

use crate::definition::{IconDefinition, IconPrefix};

/// Icons sharing one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPack {
    prefix: IconPrefix,
    icons: Vec<IconDefinition>,
}

impl IconPack {
    /// Create an empty pack.
    #[must_use]
    pub fn new(prefix: IconPrefix) -> Self {
        Self {
            prefix,
            icons: Vec::new(),
        }
    }

    /// Add an icon. Its prefix is forced to the pack's prefix.
    #[must_use]
    pub fn with(mut self, mut icon: IconDefinition) -> Self {
        icon.prefix = self.prefix;
        self.icons.push(icon);
        self
    }

    /// Pack prefix.
    #[must_use]
    pub fn prefix(&self) -> IconPrefix {
        self.prefix
    }

    /// Icons in the pack.
    #[must_use]
    pub fn icons(&self) -> &[IconDefinition] {
        &self.icons
    }

    /// Number of icons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether the pack has no icons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Built-in pack for a prefix.
    #[must_use]
    pub fn builtin(prefix: IconPrefix) -> Self {
        match prefix {
            IconPrefix::Fas => solid(),
            IconPrefix::Far => regular(),
            IconPrefix::Fab => brands(),
        }
    }
}

fn icon(name: &str, codepoint: u32) -> IconDefinition {
    IconDefinition::new(IconPrefix::Fas, name, codepoint)
}

/// Solid icons used across the book and thread views.
#[must_use]
pub fn solid() -> IconPack {
    IconPack::new(IconPrefix::Fas)
        .with(icon("book", 0xf02d))
        .with(icon("book-open", 0xf518))
        .with(icon("bookmark", 0xf02e))
        .with(icon("user", 0xf007))
        .with(icon("heart", 0xf004))
        .with(icon("comment", 0xf075))
        .with(icon("comments", 0xf086))
        .with(icon("star", 0xf005))
        .with(icon("magnifying-glass", 0xf002).alias("search"))
        .with(icon("pen", 0xf304))
        .with(icon("trash", 0xf1f8))
        .with(icon("lock", 0xf023))
        .with(icon("house", 0xf015).alias("home"))
        .with(icon("right-from-bracket", 0xf2f5).alias("sign-out-alt"))
        .with(icon("right-to-bracket", 0xf2f6).alias("sign-in-alt"))
        .with(icon("plus", 0x2b))
        .with(icon("xmark", 0xf00d).alias("times").alias("close"))
}

/// Outlined variants.
#[must_use]
pub fn regular() -> IconPack {
    IconPack::new(IconPrefix::Far)
        .with(icon("bookmark", 0xf02e))
        .with(icon("user", 0xf007))
        .with(icon("heart", 0xf004))
        .with(icon("comment", 0xf075))
        .with(icon("comments", 0xf086))
        .with(icon("star", 0xf005))
}

/// Brand logos for sign-in and sharing.
#[must_use]
pub fn brands() -> IconPack {
    IconPack::new(IconPrefix::Fab)
        .with(icon("github", 0xf09b))
        .with(icon("google", 0xf1a0))
        .with(icon("x-twitter", 0xe61b))
        .with(icon("twitter", 0xf099))
}
