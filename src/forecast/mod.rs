pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod request;
pub mod transport;
