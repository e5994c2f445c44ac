//! Domain registration payload.

use super::contact::{Contact, ContactRole};
use super::params::{Param, ToParams};
use crate::error::ValidationError;

/// Maximum number of nameservers the API accepts.
pub const MAX_NAMESERVERS: usize = 5;

/// Everything `register-domain` needs besides the domain and period.
///
/// # Example
///
/// ```
/// use planethoster_kit::{Contact, DomainRegistration};
///
/// let registrant = Contact {
///     first_name: "Jane".into(),
///     last_name: "Doe".into(),
///     email: "jane@example.com".into(),
///     country_code: "CA".into(),
///     ..Default::default()
/// };
///
/// let registration = DomainRegistration::new(registrant, "ns1.example.net", "ns2.example.net")
///     .nameserver("ns3.example.net")
///     .id_protection(true);
///
/// assert!(registration.is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRegistration {
    pub registrant: Option<Contact>,
    /// Nameserver hostnames, in order; at most [`MAX_NAMESERVERS`].
    pub nameservers: Vec<String>,
    pub id_protection: bool,
    pub register_if_premium: bool,
    pub admin: Option<Contact>,
    pub tech: Option<Contact>,
    pub billing: Option<Contact>,
    /// TLD-specific extra fields, sent as `addtl_fields[<key>]`.
    pub additional_fields: Vec<(String, String)>,
}

impl DomainRegistration {
    /// Minimal payload: a registrant and two nameservers. Both flags default to off.
    pub fn new(registrant: Contact, ns1: impl Into<String>, ns2: impl Into<String>) -> Self {
        Self {
            registrant: Some(registrant),
            nameservers: vec![ns1.into(), ns2.into()],
            ..Default::default()
        }
    }

    /// Append a nameserver.
    pub fn nameserver(mut self, host: impl Into<String>) -> Self {
        self.nameservers.push(host.into());
        self
    }

    pub fn id_protection(mut self, enabled: bool) -> Self {
        self.id_protection = enabled;
        self
    }

    pub fn register_if_premium(mut self, enabled: bool) -> Self {
        self.register_if_premium = enabled;
        self
    }

    /// Set an optional contact. Setting the registrant this way is also allowed.
    pub fn contact(mut self, role: ContactRole, contact: Contact) -> Self {
        let slot = match role {
            ContactRole::Registrant => &mut self.registrant,
            ContactRole::Admin => &mut self.admin,
            ContactRole::Tech => &mut self.tech,
            ContactRole::Billing => &mut self.billing,
        };
        *slot = Some(contact);
        self
    }

    /// Add a TLD-specific field.
    pub fn additional_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_fields.push((key.into(), value.into()));
        self
    }

    /// First nameserver, or `""` when none is set.
    pub fn primary_nameserver(&self) -> &str {
        self.nameservers.first().map(String::as_str).unwrap_or("")
    }

    /// True iff the first nameserver is non-empty and a registrant is present.
    ///
    /// [`validate`](Self::validate) additionally bounds the nameserver count.
    pub fn is_valid(&self) -> bool {
        self.registrant.is_some() && !self.primary_nameserver().is_empty()
    }

    /// Check the payload before sending, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.registrant.is_none() {
            return Err(ValidationError::MissingRegistrant);
        }
        if self.primary_nameserver().is_empty() {
            return Err(ValidationError::MissingNameserver);
        }
        if self.nameservers.len() > MAX_NAMESERVERS {
            return Err(ValidationError::TooManyNameservers(self.nameservers.len()));
        }
        Ok(())
    }

    fn nameserver_at(&self, index: usize) -> &str {
        self.nameservers.get(index).map(String::as_str).unwrap_or("")
    }
}

impl ToParams for DomainRegistration {
    fn to_params(&self) -> Vec<Param> {
        let mut params = Vec::with_capacity(16);

        if let Some(registrant) = &self.registrant {
            params.extend(registrant.to_role_params(ContactRole::Registrant));
        }
        params.push(Param::flag("id_protection", self.id_protection));

        // ns1 and ns2 are always sent; the rest only when set.
        params.push(Param::new("ns1", self.nameserver_at(0)));
        params.push(Param::new("ns2", self.nameserver_at(1)));
        for index in 2..MAX_NAMESERVERS {
            let host = self.nameserver_at(index);
            if !host.is_empty() {
                params.push(Param::new(format!("ns{}", index + 1), host));
            }
        }

        params.push(Param::flag("register_if_premium", self.register_if_premium));

        for (role, contact) in [
            (ContactRole::Admin, &self.admin),
            (ContactRole::Tech, &self.tech),
            (ContactRole::Billing, &self.billing),
        ] {
            if let Some(contact) = contact {
                params.extend(contact.to_role_params(role));
            }
        }

        for (key, value) in &self.additional_fields {
            params.push(Param::new(format!("addtl_fields[{key}]"), value.as_str()));
        }

        params
    }
}
