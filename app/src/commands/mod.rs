//! Command handlers invoked by the rendering layer.

pub mod icons;
pub mod navigation;
pub mod store;
