//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{NotifierDeps, ResendAdapter, ServerDeps, SolapiAdapter};
pub use test_dependencies::{MockEmailSender, MockSmsSender, TestDependencies};
pub use traits::*;
