#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::new_without_default)]

//! Build-time module resolution for dev servers and bundlers.
//!
//! A [`Session`] combines an [`AliasTable`] and a [`PluginPipeline`], both
//! frozen at construction, and answers `resolve`/`load`/`transform` requests.

pub mod alias;
pub mod config;
pub mod error;
pub mod plugin;
pub mod plugins;
pub mod resolve;
pub mod session;
pub mod version;

pub use alias::{AliasMatch, AliasRule, AliasTable};
pub use config::{AliasEntry, PluginSpec, ResolveOptions, SessionConfig};
pub use error::{
    ConfigError, Error, HookError, PluginError, ResolutionError, ResolutionReason, TransformError,
};
pub use plugin::{Hooks, Plugin, PluginContext, PluginPipeline};
pub use plugins::PluginRegistry;
pub use resolve::{ModuleId, ResolvedLocation, ResolvedVia, Resolver};
pub use session::{ModuleOutput, ModuleRequest, Session};
pub use version::VERSION;
