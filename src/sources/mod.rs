pub mod forecast_csv;
pub mod yahoo;

pub use forecast_csv::{load_forecast, read_forecast};
pub use yahoo::YahooFinanceClient;
