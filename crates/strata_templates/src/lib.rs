//! # strata_templates
//!
//! Template translation and infrastructure discovery for Strata.
//!
//! The translation engine and the discovery backend are collaborators of the
//! infrastructure driver. This crate defines their contracts and ships
//! simple implementations:
//!
//! - [`NativeTemplateTranslator`] for templates already in stack format
//! - [`BackendLookupDiscovery`] which finds a stack by name on the backend
//! - [`MockDiscoveryService`] for tests
//!
//! ## Example
//!
//! ```rust
//! use strata_templates::{NativeTemplateTranslator, TemplateTranslator};
//!
//! let translator = NativeTemplateTranslator::new();
//! let native = translator
//!     .translate("resources:\n  net:\n    type: OS::Neutron::Net\n")
//!     .unwrap();
//! assert!(native.contains("OS::Neutron::Net"));
//! ```

pub mod discovery;
pub mod error;
pub mod mock;
pub mod translator;

pub use discovery::{BackendLookupDiscovery, DiscoveryRequest, DiscoveryResult, DiscoveryService};
pub use error::{TemplateError, TemplateResult};
pub use mock::{CapturedDiscovery, MockDiscovery, MockDiscoveryService};
pub use translator::{NativeTemplateTranslator, TemplateTranslator};
