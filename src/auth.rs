//! Auth-domain identifiers, session values, and claim models.

pub mod claim;
pub mod id;
pub mod session;

pub use claim::*;
pub use id::*;
pub use session::*;
