//! Icon registry keyed by prefix and name.

use crate::definition::{IconDefinition, IconPrefix};
use crate::error::{IconError, Result};
use crate::packs::IconPack;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Registry of installed icon packs.
///
/// Names and aliases share one namespace per prefix; a later pack
/// overrides earlier icons with the same name.
#[derive(Debug, Clone, Default)]
pub struct IconLibrary {
    icons: BTreeMap<IconPrefix, HashMap<String, IconDefinition>>,
    aliases: BTreeMap<IconPrefix, HashMap<String, String>>,
}

impl IconLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the built-in packs for `prefixes`.
    #[must_use]
    pub fn with_builtin(prefixes: &[IconPrefix]) -> Self {
        let mut library = Self::new();
        for prefix in prefixes {
            library.add(IconPack::builtin(*prefix));
        }
        library
    }

    /// Install a pack.
    pub fn add(&mut self, pack: IconPack) {
        let prefix = pack.prefix();
        let count = pack.len();
        let icons = self.icons.entry(prefix).or_default();
        let aliases = self.aliases.entry(prefix).or_default();

        for icon in pack.icons() {
            if icons.contains_key(&icon.name) {
                warn!(prefix = %prefix, name = %icon.name, "icon redefined");
            }
            for alias in &icon.aliases {
                aliases.insert(alias.clone(), icon.name.clone());
            }
            icons.insert(icon.name.clone(), icon.clone());
        }

        debug!(prefix = %prefix, count, "added icon pack");
    }

    /// Look up an icon by name or alias.
    ///
    /// # Errors
    /// Returns `NotFound` if neither matches.
    pub fn lookup(&self, prefix: IconPrefix, name: &str) -> Result<&IconDefinition> {
        let not_found = || IconError::NotFound {
            prefix: prefix.to_string(),
            name: name.to_string(),
        };

        let icons = self.icons.get(&prefix).ok_or_else(not_found)?;
        if let Some(icon) = icons.get(name) {
            return Ok(icon);
        }

        self.aliases
            .get(&prefix)
            .and_then(|aliases| aliases.get(name))
            .and_then(|canonical| icons.get(canonical))
            .ok_or_else(not_found)
    }

    /// Resolve an icon string: `"fas book"`, `"fa-solid fa-book"` or
    /// `"book"` (solid).
    ///
    /// # Errors
    /// Returns `InvalidSpec` for malformed strings, `UnknownPrefix` or
    /// `NotFound` otherwise.
    pub fn parse(&self, spec: &str) -> Result<&IconDefinition> {
        let invalid = |reason: &str| IconError::InvalidSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let tokens: Vec<&str> = spec.split_whitespace().collect();
        let (prefix, name) = match tokens.as_slice() {
            [] => return Err(invalid("empty")),
            [name] => (IconPrefix::Fas, *name),
            [prefix, name] => (prefix.parse()?, *name),
            _ => return Err(invalid("expected '<prefix> <name>'")),
        };

        let name = name.strip_prefix("fa-").unwrap_or(name);
        if name.is_empty() {
            return Err(invalid("empty icon name"));
        }
        self.lookup(prefix, name)
    }

    /// Markup for an icon string.
    ///
    /// # Errors
    /// Same as [`IconLibrary::parse`].
    pub fn render(&self, spec: &str) -> Result<String> {
        self.parse(spec).map(IconDefinition::render)
    }

    /// Installed prefixes.
    #[must_use]
    pub fn prefixes(&self) -> Vec<IconPrefix> {
        self.icons.keys().copied().collect()
    }

    /// Canonical names in a pack, sorted.
    #[must_use]
    pub fn names(&self, prefix: IconPrefix) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .icons
            .get(&prefix)
            .map(|icons| icons.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Total number of icons across packs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.values().map(HashMap::len).sum()
    }

    /// Whether no icons are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
