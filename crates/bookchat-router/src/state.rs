//! Navigation state: what is active, where, and since when.

use crate::location::Location;
use crate::params::ParamBindings;
use crate::route::RouteEntry;
use bookchat_core::{RouteName, Timestamp, ViewId};
use serde::{Deserialize, Serialize};

/// Read-only view of an active route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    /// Route name
    pub name: RouteName,
    /// View to render
    pub view: ViewId,
    /// Bound path parameters
    pub params: ParamBindings,
    /// Whether `params` are forwarded to the view
    pub props_from_params: bool,
}

impl RouteSnapshot {
    pub(crate) fn from_entry(entry: &RouteEntry, params: ParamBindings) -> Self {
        Self {
            name: entry.name().clone(),
            view: entry.view().clone(),
            params,
            props_from_params: entry.props_from_params(),
        }
    }

    /// Inputs handed to the view, if the route forwards its parameters.
    #[must_use]
    pub fn view_props(&self) -> Option<&ParamBindings> {
        self.props_from_params.then_some(&self.params)
    }
}

/// One entry of the history stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Active route, `None` when nothing matched
    pub route: Option<RouteSnapshot>,
    /// Concrete location of the entry
    pub location: Location,
    /// When the entry was created
    pub visited_at: Timestamp,
}

/// Navigator lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum NavigatorState {
    /// No location resolved yet
    #[default]
    Uninitialized,
    /// A route is active
    Resolved(RouteName),
    /// The current location matched no route
    NotFound(String),
}

impl NavigatorState {
    pub(crate) fn of(entry: &NavigationState) -> Self {
        match &entry.route {
            Some(route) => Self::Resolved(route.name.clone()),
            None => Self::NotFound(entry.location.path.clone()),
        }
    }
}
