//! The main Reseller client.

use std::time::Duration;

use reqwest::Method;
use tracing::instrument;

use super::http::{Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpClient};
use crate::error::{Error, ValidationError};
use crate::types::{
    AccountInfo, ActionResult, ApiResponse, ConnectionTest, ContactDetails, ContactUpdate,
    DnsRecord, DnsRecordList, DomainAvailability, DomainInfo, DomainRegistration, LockAction,
    LockStatus, MAX_NAMESERVERS, NameserverList, Params, TldPrices, indexed_params,
};

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "PLANETHOSTER_API_KEY";
/// Environment variable holding the API user.
pub const ENV_API_USER: &str = "PLANETHOSTER_API_USER";
/// Optional base URL override.
pub const ENV_API_URL: &str = "PLANETHOSTER_API_URL";
/// Optional timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "PLANETHOSTER_TIMEOUT_SECS";

/// Endpoint paths.
mod paths {
    pub const TEST_CONNECTION: &str = "/reseller-api/test-connection";
    pub const ACCOUNT_INFO: &str = "/reseller-api/account-info";
    pub const CHECK_AVAILABILITY: &str = "/reseller-api/check-availability";
    pub const DOMAIN_INFO: &str = "/reseller-api/domain-info";
    pub const GET_CONTACT_DETAILS: &str = "/reseller-api/get-contact-details";
    pub const GET_NAMESERVERS: &str = "/reseller-api/get-nameservers";
    pub const GET_DNS_RECORDS: &str = "/reseller-api/get-ph-dns-records";
    pub const GET_REGISTRAR_LOCK: &str = "/reseller-api/get-registrar-lock";
    pub const TLD_PRICES: &str = "/reseller-api/tld-prices";
    pub const EMAIL_EPP_CODE: &str = "/reseller-api/email-epp-code";
    pub const REGISTER_DOMAIN: &str = "/reseller-api/register-domain";
    pub const RENEW_DOMAIN: &str = "/reseller-api/renew-domain";
    pub const SAVE_CONTACT_DETAILS: &str = "/reseller-api/save-contact-details";
    pub const SAVE_NAMESERVERS: &str = "/reseller-api/save-nameservers";
    pub const SAVE_DNS_RECORDS: &str = "/reseller-api/save-ph-dns-records";
    pub const SAVE_REGISTRAR_LOCK: &str = "/reseller-api/save-registrar-lock";
    pub const DELETE_DNS_ZONE: &str = "/reseller-api/delete-ph-dns-zone";
}

/// Client for the PlanetHoster reseller API.
///
/// Every method performs a single request and applies the API's error
/// convention: a non-zero `error_code` comes back as [`Error::Api`] and the
/// payload is dropped.
///
/// The client is cheap to clone and can be shared between tasks. The timeout
/// is the only mutable setting; configure it before sharing the client.
///
/// # Example
///
/// ```rust,no_run
/// use planethoster_kit::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), planethoster_kit::Error> {
///     let reseller = Reseller::new("my-api-key", "my-api-user")?;
///
///     reseller.test_connection().await?;
///
///     let availability = reseller.check_availability("example", "com").await?;
///     println!("example.com available: {}", availability.available);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Reseller {
    http: HttpClient,
}

impl Reseller {
    /// Create a client for the production API with default settings.
    pub fn new(api_key: impl Into<String>, api_user: impl Into<String>) -> Result<Self, Error> {
        Self::builder(api_key, api_user).build()
    }

    /// Start configuring a client.
    pub fn builder(api_key: impl Into<String>, api_user: impl Into<String>) -> ResellerBuilder {
        ResellerBuilder::new(Credentials::new(api_key, api_user))
    }

    /// Create a client from environment variables.
    ///
    /// Reads:
    /// - `PLANETHOSTER_API_KEY` (required)
    /// - `PLANETHOSTER_API_USER` (required)
    /// - `PLANETHOSTER_API_URL` (optional): base URL override
    /// - `PLANETHOSTER_TIMEOUT_SECS` (optional): request timeout in seconds
    ///
    /// ```rust,no_run
    /// # use planethoster_kit::*;
    /// # async fn example() -> Result<(), planethoster_kit::Error> {
    /// let reseller = Reseller::from_env()?;
    /// let account = reseller.account_info().await?;
    /// println!("{} {}", account.credit_remaining, account.credit_currency);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{name} is not set")))
        };

        let mut builder = Self::builder(required(ENV_API_KEY)?, required(ENV_API_USER)?);

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            builder = builder.base_url(url.trim());
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// The API user this client authenticates as.
    pub fn api_user(&self) -> &str {
        self.http.credentials().api_user()
    }

    /// The current per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.http.timeout()
    }

    /// Change the per-request timeout.
    ///
    /// Only affects requests started afterwards, and only on this instance:
    /// clones made earlier keep their timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.http.set_timeout(timeout);
    }

    /// Access the low-level HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Make a checked call to any endpoint.
    ///
    /// Useful for endpoints without a dedicated method; the envelope check
    /// still applies.
    pub async fn call<R: ApiResponse>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<R, Error> {
        self.http.call(method, path, &params).await
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Test the credentials.
    ///
    /// Succeeds only when `error_code` is zero *and* the API reports
    /// `successful_connection: true`; otherwise returns
    /// [`Error::ConnectionFailed`] (or [`Error::Api`] for a non-zero code).
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> Result<ConnectionTest, Error> {
        self.call(Method::GET, paths::TEST_CONNECTION, Params::new())
            .await
    }

    /// Reseller account balance and counters.
    #[instrument(skip(self))]
    pub async fn account_info(&self) -> Result<AccountInfo, Error> {
        self.call(Method::GET, paths::ACCOUNT_INFO, Params::new())
            .await
    }

    /// Whether `sld.tld` can be registered, and at what price if premium.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        sld: &str,
        tld: &str,
    ) -> Result<DomainAvailability, Error> {
        self.call(Method::GET, paths::CHECK_AVAILABILITY, Params::domain(sld, tld))
            .await
    }

    /// Order and registration details for a domain.
    #[instrument(skip(self))]
    pub async fn domain_info(&self, sld: &str, tld: &str) -> Result<DomainInfo, Error> {
        self.call(Method::GET, paths::DOMAIN_INFO, Params::domain(sld, tld))
            .await
    }

    /// WHOIS contacts of a domain.
    #[instrument(skip(self))]
    pub async fn contact_details(&self, sld: &str, tld: &str) -> Result<ContactDetails, Error> {
        self.call(Method::GET, paths::GET_CONTACT_DETAILS, Params::domain(sld, tld))
            .await
    }

    /// Nameservers of a domain.
    #[instrument(skip(self))]
    pub async fn nameservers(&self, sld: &str, tld: &str) -> Result<NameserverList, Error> {
        self.call(Method::GET, paths::GET_NAMESERVERS, Params::domain(sld, tld))
            .await
    }

    /// DNS records, for domains using PlanetHoster's DNS.
    #[instrument(skip(self))]
    pub async fn dns_records(&self, sld: &str, tld: &str) -> Result<DnsRecordList, Error> {
        self.call(Method::GET, paths::GET_DNS_RECORDS, Params::domain(sld, tld))
            .await
    }

    /// Registrar lock status.
    #[instrument(skip(self))]
    pub async fn registrar_lock(&self, sld: &str, tld: &str) -> Result<LockStatus, Error> {
        self.call(Method::GET, paths::GET_REGISTRAR_LOCK, Params::domain(sld, tld))
            .await
    }

    /// Prices of every TLD offered to the reseller.
    #[instrument(skip(self))]
    pub async fn tld_prices(&self) -> Result<TldPrices, Error> {
        self.call(Method::GET, paths::TLD_PRICES, Params::new())
            .await
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Email the EPP (transfer) code to the registrant and unlock the domain.
    #[instrument(skip(self))]
    pub async fn email_epp_code(&self, sld: &str, tld: &str) -> Result<ActionResult, Error> {
        self.call(Method::POST, paths::EMAIL_EPP_CODE, Params::domain(sld, tld))
            .await
    }

    /// Register a domain for `period` years.
    ///
    /// The payload is validated first; an invalid payload returns
    /// [`Error::Validation`] without sending anything.
    #[instrument(skip(self, registration))]
    pub async fn register_domain(
        &self,
        sld: &str,
        tld: &str,
        period: u32,
        registration: &DomainRegistration,
    ) -> Result<ActionResult, Error> {
        registration.validate()?;

        let mut params = Params::domain(sld, tld).with("period", period.to_string());
        params.append(registration);

        self.call(Method::POST, paths::REGISTER_DOMAIN, params)
            .await
    }

    /// Renew a domain for `period` years.
    #[instrument(skip(self))]
    pub async fn renew_domain(
        &self,
        sld: &str,
        tld: &str,
        period: u32,
    ) -> Result<ActionResult, Error> {
        let params = Params::domain(sld, tld).with("period", period.to_string());
        self.call(Method::POST, paths::RENEW_DOMAIN, params).await
    }

    /// Replace one or more WHOIS contacts.
    ///
    /// Returns [`ValidationError::NothingToDo`] without sending anything when
    /// the update carries no contact.
    #[instrument(skip(self, update))]
    pub async fn save_contact_details(
        &self,
        sld: &str,
        tld: &str,
        update: &ContactUpdate,
    ) -> Result<ActionResult, Error> {
        if update.is_empty() {
            return Err(ValidationError::NothingToDo.into());
        }

        let mut params = Params::domain(sld, tld);
        params.append(update);

        self.call(Method::POST, paths::SAVE_CONTACT_DETAILS, params)
            .await
    }

    /// Replace the nameservers of a domain.
    ///
    /// Between one and five hostnames; `ns1` to `ns5` are always sent, unused
    /// slots empty.
    #[instrument(skip(self, nameservers))]
    pub async fn save_nameservers<S: AsRef<str>>(
        &self,
        sld: &str,
        tld: &str,
        nameservers: &[S],
    ) -> Result<ActionResult, Error> {
        if nameservers.is_empty() {
            return Err(ValidationError::NoNameservers.into());
        }
        if nameservers.len() > MAX_NAMESERVERS {
            return Err(ValidationError::TooManyNameservers(nameservers.len()).into());
        }

        let mut params = Params::domain(sld, tld);
        for slot in 0..MAX_NAMESERVERS {
            let host = nameservers.get(slot).map(|s| s.as_ref()).unwrap_or("");
            params.push(format!("ns{}", slot + 1), host);
        }

        self.call(Method::POST, paths::SAVE_NAMESERVERS, params)
            .await
    }

    /// Replace the DNS zone hosted by PlanetHoster.
    ///
    /// Records are sent as `hostname{i}`, `address{i}`, `type{i}` numbered
    /// from 1 in slice order.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn save_dns_records(
        &self,
        sld: &str,
        tld: &str,
        records: &[DnsRecord],
    ) -> Result<ActionResult, Error> {
        let mut params = Params::domain(sld, tld);
        params.extend(indexed_params(records));

        self.call(Method::POST, paths::SAVE_DNS_RECORDS, params)
            .await
    }

    /// Lock or unlock a domain at the registrar.
    #[instrument(skip(self))]
    pub async fn save_registrar_lock(
        &self,
        sld: &str,
        tld: &str,
        action: LockAction,
    ) -> Result<ActionResult, Error> {
        let params = Params::domain(sld, tld).with("lock_action", action.as_str());
        self.call(Method::POST, paths::SAVE_REGISTRAR_LOCK, params)
            .await
    }

    /// Delete the DNS zone hosted by PlanetHoster.
    #[instrument(skip(self))]
    pub async fn delete_dns_zone(&self, sld: &str, tld: &str) -> Result<ActionResult, Error> {
        self.call(Method::POST, paths::DELETE_DNS_ZONE, Params::domain(sld, tld))
            .await
    }
}

/// Builder for [`Reseller`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use planethoster_kit::Reseller;
///
/// let reseller = Reseller::builder("my-api-key", "my-api-user")
///     .base_url("https://api.planethoster.net")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok::<(), planethoster_kit::Error>(())
/// ```
#[derive(Debug)]
pub struct ResellerBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl ResellerBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Send requests somewhere other than the production API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate validation.
    ///
    /// Off by default. Turning it on exposes the API key to anyone able to
    /// intercept the connection; use it only against test servers.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Reseller, Error> {
        Ok(Reseller {
            http: HttpClient::new(
                self.base_url,
                self.credentials,
                self.timeout,
                self.accept_invalid_certs,
            )?,
        })
    }
}
