//! Provider adapters.
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`MockProvider`] | Synthetic series, one random point per day |
//! | [`HttpProvider`] | JSON POST to the stock-data service |

mod http;
mod mock;

pub use http::{HttpProvider, HttpProviderConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV};
pub(crate) use http::join_symbols;
pub use mock::{
    generate_series, MockProvider, MockProviderConfig, MAX_SYNTHETIC_CLOSE, MAX_SYNTHETIC_VOLUME,
};
