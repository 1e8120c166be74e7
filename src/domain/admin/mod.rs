//! Admin module - back-office administrator accounts.

mod administrator;
mod errors;

pub use administrator::{AdminClaims, Administrator};
pub(crate) use administrator::normalize_email;
pub use errors::AdminError;
