//! Icon prefixes and definitions.

use crate::error::IconError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Icon style, identified by its short prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPrefix {
    /// Solid icons (`fas`)
    Fas,
    /// Regular (outlined) icons (`far`)
    Far,
    /// Brand logos (`fab`)
    Fab,
}

impl IconPrefix {
    /// All prefixes.
    pub const ALL: [IconPrefix; 3] = [Self::Fas, Self::Far, Self::Fab];

    /// Short prefix (`fas`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fas => "fas",
            Self::Far => "far",
            Self::Fab => "fab",
        }
    }

    /// Style class used in markup (`fa-solid`).
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Fas => "fa-solid",
            Self::Far => "fa-regular",
            Self::Fab => "fa-brands",
        }
    }

    /// Accepts both the short prefix and the style class.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == token || p.class_name() == token)
    }
}

impl FromStr for IconPrefix {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| IconError::UnknownPrefix(s.to_string()))
    }
}

impl fmt::Display for IconPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single icon glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDefinition {
    /// Pack the icon belongs to
    pub prefix: IconPrefix,
    /// Canonical name (`book`)
    pub name: String,
    /// Font codepoint
    pub codepoint: u32,
    /// Alternative names (`search` for `magnifying-glass`)
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl IconDefinition {
    /// Create a definition without aliases.
    #[must_use]
    pub fn new(prefix: IconPrefix, name: impl Into<String>, codepoint: u32) -> Self {
        Self {
            prefix,
            name: name.into(),
            codepoint,
            aliases: Vec::new(),
        }
    }

    /// Add an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Glyph character, if the codepoint is a valid scalar value.
    #[must_use]
    pub fn glyph(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }

    /// Class string for markup (`fa-solid fa-book`).
    #[must_use]
    pub fn class_list(&self) -> String {
        format!("{} fa-{}", self.prefix.class_name(), self.name)
    }

    /// `<i>` element for the icon, hidden from assistive technology.
    #[must_use]
    pub fn render(&self) -> String {
        format!(r#"<i class="{}" aria-hidden="true"></i>"#, self.class_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_tokens() {
        assert_eq!(IconPrefix::from_token("fas"), Some(IconPrefix::Fas));
        assert_eq!(IconPrefix::from_token("fa-brands"), Some(IconPrefix::Fab));
        assert_eq!(IconPrefix::from_token("fa-light"), None);
        assert!(matches!(
            "fal".parse::<IconPrefix>(),
            Err(IconError::UnknownPrefix(p)) if p == "fal"
        ));
    }

    #[test]
    fn test_render() {
        let book = IconDefinition::new(IconPrefix::Fas, "book", 0xf02d);
        assert_eq!(book.class_list(), "fa-solid fa-book");
        assert_eq!(
            book.render(),
            r#"<i class="fa-solid fa-book" aria-hidden="true"></i>"#
        );
        assert_eq!(book.glyph(), Some('\u{f02d}'));
    }

    #[test]
    fn test_serde_prefix() {
        let json = serde_json::to_string(&IconPrefix::Far).expect("serialize");
        assert_eq!(json, "\"far\"");
    }
}
