pub mod client;
pub mod jsonbin;
pub mod market;
pub mod models;

pub use jsonbin::JsonBinClient;
pub use market::LocalMarketClient;
pub use models::ApiError;
