pub mod bill;
pub mod payment;
pub mod user;

pub use bill::*;
pub use payment::*;
pub use user::*;
