//! Data types shared across the redaction pipeline.

pub mod config;
pub mod key;
pub mod policy;
pub mod span;
pub mod table;

pub use config::{CustomDictionary, RedactionConfig};
pub use key::WrappedKey;
pub use policy::{TransformationKind, TransformationRule};
pub use span::{EntityCategory, SensitiveSpan};
pub use table::{PseudonymTable, TransformedDocument};
