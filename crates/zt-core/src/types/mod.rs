mod decision;
mod factor;
mod score;
mod service;

pub use decision::*;
pub use factor::*;
pub use score::*;
pub use service::*;
