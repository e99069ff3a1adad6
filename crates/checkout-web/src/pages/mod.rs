//! Page Components

mod login;
mod payment;
mod pricing;

pub use login::LoginPage;
pub use payment::PaymentPage;
pub use pricing::PricingPage;
