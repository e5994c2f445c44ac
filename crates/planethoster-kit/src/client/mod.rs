//! Client module for the PlanetHoster reseller API.
//!
//! - [`Reseller`]: The main client, one method per API operation
//! - [`ResellerBuilder`]: Fluent builder for configuring the client
//! - [`HttpClient`]: Low-level request builder and executor
//!
//! # Operations
//!
//! | Method | Endpoint | Verb |
//! |--------|----------|------|
//! | [`Reseller::test_connection`] | `test-connection` | GET |
//! | [`Reseller::account_info`] | `account-info` | GET |
//! | [`Reseller::check_availability`] | `check-availability` | GET |
//! | [`Reseller::domain_info`] | `domain-info` | GET |
//! | [`Reseller::contact_details`] | `get-contact-details` | GET |
//! | [`Reseller::nameservers`] | `get-nameservers` | GET |
//! | [`Reseller::dns_records`] | `get-ph-dns-records` | GET |
//! | [`Reseller::registrar_lock`] | `get-registrar-lock` | GET |
//! | [`Reseller::tld_prices`] | `tld-prices` | GET |
//! | [`Reseller::email_epp_code`] | `email-epp-code` | POST |
//! | [`Reseller::register_domain`] | `register-domain` | POST |
//! | [`Reseller::renew_domain`] | `renew-domain` | POST |
//! | [`Reseller::save_contact_details`] | `save-contact-details` | POST |
//! | [`Reseller::save_nameservers`] | `save-nameservers` | POST |
//! | [`Reseller::save_dns_records`] | `save-ph-dns-records` | POST |
//! | [`Reseller::save_registrar_lock`] | `save-registrar-lock` | POST |
//! | [`Reseller::delete_dns_zone`] | `delete-ph-dns-zone` | POST |

mod http;
mod reseller;

pub use http::{Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpClient, USER_AGENT};
pub use reseller::{
    ENV_API_KEY, ENV_API_URL, ENV_API_USER, ENV_TIMEOUT_SECS, Reseller, ResellerBuilder,
};
