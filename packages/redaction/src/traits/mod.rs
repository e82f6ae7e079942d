//! Collaborator trait abstractions.
//!
//! The core never talks to the network itself; every external service
//! (master key service, classifier, encoding primitive, generator) is
//! an injected handle behind one of these traits, so the pipeline is
//! testable with fakes and deployable against real backends.

pub mod classifier;
pub mod encoder;
pub mod generator;
pub mod key_service;

pub use classifier::{Classifier, Finding};
pub use encoder::FormatPreservingEncoder;
pub use generator::TextGenerator;
pub use key_service::MasterKeyService;
