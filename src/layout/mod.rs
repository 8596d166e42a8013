//! Product model layouts: the stored element definition and the renderer that turns a
//! definition plus a product into a render tree.

pub mod definition;
pub mod render;

pub use definition::{
    BadgeProps, Element, ElementKind, HeadingTag, HtmlProps, ImageFit, ImageProps, ImageRatio,
    Layout, ModelDefinition, PlaceholderMode, TitleProps,
};
pub use render::{
    ImageNode, RenderNode, RenderSubject, RenderTree, encode_uri_component, render,
    render_for_product,
};
