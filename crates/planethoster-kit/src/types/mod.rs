//! Request and response types for the reseller API.
//!
//! - [`Param`], [`Params`], [`ToParams`]: ordered form parameters
//! - [`Contact`], [`ContactRole`], [`ContactUpdate`]: contact records
//! - [`DomainRegistration`]: `register-domain` payload
//! - [`DnsRecord`]: hosted DNS records
//! - [`LockAction`]: registrar lock changes
//! - [`responses`]: typed results, all embedding the common [`Envelope`]

mod contact;
mod dns;
mod lock;
mod params;
mod registration;
pub mod responses;

pub use contact::{CONTACT_FIELD_COUNT, Contact, ContactRole, ContactUpdate};
pub use dns::{DnsRecord, indexed_params};
pub use lock::LockAction;
pub use params::{Param, Params, ToParams};
pub use registration::{DomainRegistration, MAX_NAMESERVERS};
pub use responses::{
    AccountInfo, ActionResult, ApiResponse, ConnectionTest, ContactDetails, DnsRecordList,
    DomainAvailability, DomainInfo, Envelope, LockStatus, Nameserver, NameserverList,
    PostalAddress, RegisteredContact, TldPrice, TldPrices,
};
