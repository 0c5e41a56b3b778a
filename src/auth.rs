//! Auth-domain identifiers, scope sets, and client credentials.

pub mod credentials;
pub mod id;
pub mod scope;

pub use credentials::*;
pub use id::*;
pub use scope::*;
