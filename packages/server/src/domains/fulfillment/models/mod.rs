pub mod activation;
pub mod asset;
pub mod parameter;
pub mod request;

pub use activation::*;
pub use asset::*;
pub use parameter::*;
pub use request::*;
