//! Icon commands.

use crate::error::CommandError;
use crate::state::AppState;
use bookchat_icons::{IconDefinition, IconPrefix};

/// Markup for an icon string such as `"fas book"`.
pub fn render_icon(state: &AppState, spec: String) -> Result<String, CommandError> {
    Ok(state.with_icons(|icons| icons.render(&spec))??)
}

/// Definition of an icon by prefix and name or alias.
pub fn lookup_icon(
    state: &AppState,
    prefix: String,
    name: String,
) -> Result<IconDefinition, CommandError> {
    let prefix: IconPrefix = prefix.parse()?;
    Ok(state.with_icons(|icons| icons.lookup(prefix, &name).cloned())??)
}

/// Canonical icon names in a pack.
pub fn list_icons(state: &AppState, prefix: String) -> Result<Vec<String>, CommandError> {
    let prefix: IconPrefix = prefix.parse()?;
    Ok(state.with_icons(|icons| {
        icons
            .names(prefix)
            .into_iter()
            .map(str::to_string)
            .collect()
    })?)
}
