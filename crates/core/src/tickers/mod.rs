mod tickers_model;
mod tickers_service;

pub use tickers_model::TickerList;
pub use tickers_service::TickerListStore;
