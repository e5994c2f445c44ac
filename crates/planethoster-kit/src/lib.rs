//! A typed Rust client for the PlanetHoster domain reseller API.
//!
//! **planethoster-kit** wraps every reseller endpoint (account, availability,
//! WHOIS, nameservers, hosted DNS, registration, renewal, contact and lock
//! updates) behind a single [`Reseller`] client.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use planethoster_kit::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), planethoster_kit::Error> {
//!     // Reads PLANETHOSTER_API_KEY / PLANETHOSTER_API_USER
//!     let reseller = Reseller::from_env()?;
//!
//!     reseller.test_connection().await?;
//!
//!     let info = reseller.domain_info("example", "com").await?;
//!     println!("expires {}", info.expiry_date);
//!
//!     Ok(())
//! }
//! ```
//!
//! # How requests work
//!
//! Every operation goes through the same path:
//!
//! 1. Parameters are collected in order into [`Params`]. Structured inputs
//!    ([`Contact`], [`DomainRegistration`], [`DnsRecord`]) flatten themselves
//!    via [`ToParams`] or their own helpers; booleans become `"1"` / `"0"`.
//! 2. [`HttpClient`] prepends `api_key` and `api_user`, form-encodes the body
//!    and sets the content type and user agent.
//! 3. The whole JSON body is decoded into the operation's result type.
//! 4. [`ApiResponse::check`] applies the error convention: a non-zero
//!    `error_code` becomes [`Error::Api`].
//!
//! # Errors
//!
//! Transport failures, undecodable bodies, API refusals and local validation
//! failures are separate [`Error`] variants. Nothing is retried.
//!
//! # TLS
//!
//! Certificates are validated. [`ResellerBuilder::danger_accept_invalid_certs`]
//! turns that off for test servers.

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, Error, ValidationError};
pub use types::*;

// Re-export client types
pub use client::{
    Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpClient, Reseller, ResellerBuilder,
    USER_AGENT,
};
