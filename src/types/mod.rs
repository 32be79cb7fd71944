pub mod chart;
pub mod forecast;
pub mod price;
pub mod projection;

pub use chart::*;
pub use forecast::*;
pub use price::*;
pub use projection::*;
