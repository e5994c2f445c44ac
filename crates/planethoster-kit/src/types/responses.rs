//! Response types for the reseller API.
//!
//! Every response carries the common [`Envelope`] (`error_code` / `error`) at
//! the top level of the JSON document. Each type here embeds it explicitly as
//! its `error` field; [`ApiResponse::check`] turns a non-zero code into
//! [`Error::Api`](crate::Error::Api).
//!
//! All payload fields default when absent, so an error document such as
//! `{"error_code":5,"error":"bad key"}` still decodes and the envelope check
//! decides the outcome.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dns::DnsRecord;
use crate::error::{ApiError, Error};

// ============================================================================
// Lenient field decoding
// ============================================================================

/// `null` decodes as the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a string, a number or `null` and keeps it as text.
///
/// Amounts come back as `"12.50"` on some endpoints and `12.5` on others.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accepts an integer, a float, a numeric string or `null`.
fn code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .ok_or_else(|| {
                D::Error::custom(format!("error_code is not an integer in range: {n}"))
            }),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("error_code is not numeric: {s:?}"))),
        other => Err(D::Error::custom(format!(
            "error_code has unexpected type: {other}"
        ))),
    }
}

/// `5.0` is accepted as `5`; fractions and values outside `i64` are not.
fn integral(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

// ============================================================================
// Envelope
// ============================================================================

/// The `error_code` / `error` pair present on every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    /// `0` on success.
    #[serde(rename = "error_code", deserialize_with = "code")]
    pub code: i64,
    #[serde(rename = "error", deserialize_with = "text")]
    pub message: String,
}

impl Envelope {
    /// True when the code is zero.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// The envelope as a result; a non-zero code is authoritative.
    pub fn to_result(&self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::new(self.code, self.message.clone()))
        }
    }
}

/// A decoded response that carries the common envelope.
pub trait ApiResponse: DeserializeOwned {
    /// The response's envelope.
    fn envelope(&self) -> &Envelope;

    /// Apply the error convention, consuming the response.
    ///
    /// The default treats a non-zero `error_code` as failure. Endpoints with a
    /// different success signal override this.
    fn check(self) -> Result<Self, Error> {
        self.envelope().to_result()?;
        Ok(self)
    }
}

macro_rules! impl_api_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn envelope(&self) -> &Envelope {
                    &self.error
                }
            }
        )*
    };
}

// ============================================================================
// Read endpoints
// ============================================================================

/// `test-connection`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionTest {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub successful_connection: bool,
}

impl ApiResponse for ConnectionTest {
    fn envelope(&self) -> &Envelope {
        &self.error
    }

    /// A zero code is not enough here: `successful_connection` must be true.
    fn check(self) -> Result<Self, Error> {
        self.error.to_result()?;
        if !self.successful_connection {
            let reason = if self.message.is_empty() {
                "successful_connection flag missing or false".to_string()
            } else {
                self.message
            };
            return Err(Error::ConnectionFailed(reason));
        }
        Ok(self)
    }
}

/// `account-info`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "text")]
    pub credit_remaining: String,
    #[serde(deserialize_with = "nullable")]
    pub credit_currency: String,
    #[serde(deserialize_with = "nullable")]
    pub num_active_orders: u64,
    #[serde(deserialize_with = "nullable")]
    pub num_active_domains: u64,
}

/// `check-availability`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainAvailability {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub available: bool,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub is_premium: bool,
    #[serde(deserialize_with = "text")]
    pub premium_register_price: String,
    #[serde(deserialize_with = "text")]
    pub premium_renew_price: String,
}

/// `domain-info`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainInfo {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub order_id: u64,
    #[serde(deserialize_with = "nullable")]
    pub is_transfer: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_registration: bool,
    #[serde(deserialize_with = "nullable")]
    pub registration_date: String,
    #[serde(deserialize_with = "nullable")]
    pub expiry_date: String,
    #[serde(deserialize_with = "nullable")]
    pub registration_status_info: String,
    #[serde(deserialize_with = "nullable")]
    pub purchase_status: String,
    #[serde(deserialize_with = "nullable")]
    pub id_protection: bool,
    #[serde(deserialize_with = "nullable")]
    pub domain_statuses: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub transfer_request_status: String,
    #[serde(deserialize_with = "nullable")]
    pub transfer_request_denied_reason: String,
    #[serde(deserialize_with = "nullable")]
    pub transfer_request_denied_at: String,
    #[serde(deserialize_with = "nullable")]
    pub transfer_request_confirmed_at: String,
}

/// Postal address of a WHOIS contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostalAddress {
    #[serde(deserialize_with = "nullable")]
    pub address1: String,
    #[serde(deserialize_with = "nullable")]
    pub address2: String,
    #[serde(deserialize_with = "nullable")]
    pub address3: String,
    #[serde(deserialize_with = "nullable")]
    pub city: String,
    #[serde(deserialize_with = "nullable")]
    pub state: String,
    #[serde(deserialize_with = "nullable")]
    pub postal_code: String,
    #[serde(deserialize_with = "nullable")]
    pub country: String,
}

/// A contact as reported by `get-contact-details`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisteredContact {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub company_name: String,
    #[serde(rename = "addr", deserialize_with = "nullable")]
    pub address: PostalAddress,
    #[serde(deserialize_with = "nullable")]
    pub phone_number: String,
    #[serde(deserialize_with = "nullable")]
    pub phone_extension: String,
    #[serde(deserialize_with = "nullable")]
    pub fax: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    /// `registrant`, `admin`, `tech` or `billing`.
    #[serde(deserialize_with = "nullable")]
    pub contact_type: String,
    #[serde(deserialize_with = "nullable")]
    pub statuses: Vec<String>,
}

/// `get-contact-details` (WHOIS).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub contacts: Vec<RegisteredContact>,
}

impl ContactDetails {
    /// The contact registered for a role, e.g. `"registrant"`.
    pub fn by_type(&self, contact_type: &str) -> Option<&RegisteredContact> {
        self.contacts
            .iter()
            .find(|c| c.contact_type.eq_ignore_ascii_case(contact_type))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Nameserver {
    #[serde(deserialize_with = "nullable")]
    pub host: String,
}

/// `get-nameservers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameserverList {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub nameservers: Vec<Nameserver>,
}

impl NameserverList {
    /// Nameserver hostnames, in order.
    pub fn hosts(&self) -> Vec<&str> {
        self.nameservers.iter().map(|ns| ns.host.as_str()).collect()
    }
}

/// `get-ph-dns-records`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DnsRecordList {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub records: Vec<DnsRecord>,
}

/// `get-registrar-lock`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LockStatus {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub is_locked: bool,
}

/// Pricing for one TLD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TldPrice {
    #[serde(deserialize_with = "text")]
    pub register: String,
    #[serde(deserialize_with = "text")]
    pub transfer: String,
    #[serde(deserialize_with = "text")]
    pub renew: String,
    #[serde(deserialize_with = "nullable")]
    pub transfer_requires_epp_code: bool,
    #[serde(deserialize_with = "nullable")]
    pub id_protection_supported: bool,
}

/// `tld-prices`, keyed by TLD string (`"com"`, `"ca"`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TldPrices {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub tlds: BTreeMap<String, TldPrice>,
}

impl TldPrices {
    /// Price entry for `tld`, with or without a leading dot.
    pub fn get(&self, tld: &str) -> Option<&TldPrice> {
        self.tlds.get(tld.trim_start_matches('.'))
    }
}

// ============================================================================
// Write endpoints
// ============================================================================

/// Result of a write operation (registration, renewal, updates, ...).
///
/// `extra` holds every top-level field besides the envelope and `message`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionResult {
    #[serde(flatten)]
    pub error: Envelope,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ActionResult {
    /// An additional response field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

impl_api_response!(
    AccountInfo,
    DomainAvailability,
    DomainInfo,
    ContactDetails,
    NameserverList,
    DnsRecordList,
    LockStatus,
    TldPrices,
    ActionResult,
);
