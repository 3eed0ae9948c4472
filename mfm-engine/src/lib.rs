// Library exports for mfm-engine
// Emoji catalogs and resolution, the MFM pre-transform, and segment rendering

pub mod alias;
pub mod catalog;
pub mod error;
pub mod markup;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod source;

pub use catalog::EmojiCatalog;
pub use error::{EngineError, EngineResult};
pub use markup::{classify_link, pre_transform};
pub use registry::EmojiRegistry;
pub use render::{attach, legacy_encode, render, HtmlConverter, RichTextHost, SegmentRenderer};
pub use resolver::{encode, resolve};
pub use source::EmojiSource;
