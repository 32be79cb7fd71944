pub mod chart;
pub mod loader;
pub mod pipeline;
pub mod projection;

pub use chart::ChartComposer;
pub use loader::{DashboardData, DataLoader};
pub use pipeline::Pipeline;
pub use projection::{rolling_mean, Projector};
