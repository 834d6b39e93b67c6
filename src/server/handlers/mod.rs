pub mod health;
pub use self::health::health;

pub mod session;
pub use self::session::{login, logout, whoami};

/// Service banner; also doubles as an unauthenticated smoke-test route.
pub async fn root() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
