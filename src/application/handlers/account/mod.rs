//! Account lifecycle, phone verification and admin access handlers.

mod admin_login;
mod admin_register;
mod finish_register;
mod notify_metrics;
mod register;
mod send_verification_pin;
mod verify_pin;

pub use admin_login::{
    AdminLoginCommand, AdminLoginHandler, AdminLoginResult, DEFAULT_TOKEN_TTL_HOURS,
};
pub use admin_register::{AdminRegisterCommand, AdminRegisterHandler, AdminRegisterResult};
pub use finish_register::{FinishRegisterCommand, FinishRegisterHandler, FinishRegisterResult};
pub use notify_metrics::{NotifyLoginCommand, NotifyLoginHandler, NotifyPasswordRecoverHandler};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
pub use send_verification_pin::{
    SendVerificationPinCommand, SendVerificationPinHandler, SendVerificationPinResult,
};
pub use verify_pin::{VerifyPinCommand, VerifyPinHandler};
