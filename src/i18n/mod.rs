//! Language catalog and provider code mapping.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all selectable target languages
//! - `language`: `Language` handle validated against the registry
//! - `mapping`: Catalog code to provider code translation
//!
//! # Example
//!
//! ```rust,ignore
//! use translate_redirect::i18n::{map_for_provider, Language, LanguageRegistry};
//! use translate_redirect::Provider;
//!
//! let polish = Language::from_code("pl")?;
//! let matches = LanguageRegistry::get().search("chin");
//! assert_eq!(map_for_provider("zh", Provider::Google), "zh-CN");
//! ```

mod language;
mod mapping;
mod registry;

pub use language::Language;
pub use mapping::map_for_provider;
pub use registry::{LanguageEntry, LanguageRegistry, CATALOG_SIZE};
