//! Async HTTP client for the backend JSON API
//!
//! Resolves the API base URL from injected configuration, attaches the
//! backend's CSRF token to mutating requests, and performs HTTP calls with
//! cookie inclusion, caching disabled, and merged default/caller headers.
//!
//! # Example
//!
//! ```no_run
//! use api_client::{ApiClient, ClientConfig, Error};
//!
//! async fn example() -> Result<(), Error> {
//!     let config = ClientConfig::default().from_env();
//!     let client = ApiClient::new(config)?;
//!
//!     let response = client.get("/users/").await?;
//!     if response.is_success() {
//!         let users: serde_json::Value = response.json().await?;
//!         println!("{}", users);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod env_vars;
mod error;
mod request;
mod response;

pub use client::ApiClient;
pub use config::{ClientConfig, Mode};
pub use env_vars::{ENV_API_DOMAIN, ENV_API_MODE, ENV_API_URL};
pub use error::Error;
pub use request::{merge_headers, RequestOptions, CSRF_HEADER};
pub use response::{RawResponse, Response};
