//! Contact records and their form encoding.

use std::fmt;

use super::params::{Param, ToParams};

/// Number of parameters a contact flattens into.
pub const CONTACT_FIELD_COUNT: usize = 11;

/// The role a contact plays on a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactRole {
    Registrant,
    Admin,
    Tech,
    Billing,
}

impl ContactRole {
    /// All roles, in the order the API expects them.
    pub const ALL: [ContactRole; 4] = [
        ContactRole::Registrant,
        ContactRole::Admin,
        ContactRole::Tech,
        ContactRole::Billing,
    ];

    /// Wire name, also used as the parameter prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactRole::Registrant => "registrant",
            ContactRole::Admin => "admin",
            ContactRole::Tech => "tech",
            ContactRole::Billing => "billing",
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registrant-style contact details.
///
/// A contact has no identity of its own on the reseller API; it is only ever
/// sent flattened under a role prefix, e.g. `registrant_first_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    pub phone: String,
}

impl Contact {
    /// Flatten under `prefix`. Always yields [`CONTACT_FIELD_COUNT`] parameters,
    /// empty fields included.
    pub fn to_params(&self, prefix: &str) -> Vec<Param> {
        let field = |name: &str, value: &str| Param::new(format!("{prefix}_{name}"), value);
        vec![
            field("first_name", &self.first_name),
            field("last_name", &self.last_name),
            field("email", &self.email),
            field("company_name", &self.company_name),
            field("address1", &self.address1),
            field("address2", &self.address2),
            field("city", &self.city),
            field("postal_code", &self.postal_code),
            field("state", &self.state),
            field("country_code", &self.country_code),
            field("phone", &self.phone),
        ]
    }

    /// Flatten under a role's prefix.
    pub fn to_role_params(&self, role: ContactRole) -> Vec<Param> {
        self.to_params(role.as_str())
    }
}

/// A set of contact changes for `save-contact-details`.
///
/// Only the roles that are present are sent, followed by a `contact_types`
/// parameter listing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub registrant: Option<Contact>,
    pub admin: Option<Contact>,
    pub tech: Option<Contact>,
    pub billing: Option<Contact>,
}

impl ContactUpdate {
    /// An update with no contacts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contact for a role, replacing any previous one.
    pub fn with(mut self, role: ContactRole, contact: Contact) -> Self {
        *self.slot_mut(role) = Some(contact);
        self
    }

    /// Contact for `role`, if any.
    pub fn get(&self, role: ContactRole) -> Option<&Contact> {
        match role {
            ContactRole::Registrant => self.registrant.as_ref(),
            ContactRole::Admin => self.admin.as_ref(),
            ContactRole::Tech => self.tech.as_ref(),
            ContactRole::Billing => self.billing.as_ref(),
        }
    }

    fn slot_mut(&mut self, role: ContactRole) -> &mut Option<Contact> {
        match role {
            ContactRole::Registrant => &mut self.registrant,
            ContactRole::Admin => &mut self.admin,
            ContactRole::Tech => &mut self.tech,
            ContactRole::Billing => &mut self.billing,
        }
    }

    /// Roles that carry a contact, in wire order.
    pub fn roles(&self) -> Vec<ContactRole> {
        ContactRole::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_some())
            .collect()
    }

    /// True when no role carries a contact.
    pub fn is_empty(&self) -> bool {
        self.roles().is_empty()
    }

    /// Comma-separated list of present roles, e.g. `registrant,tech`.
    pub fn contact_types(&self) -> String {
        self.roles()
            .iter()
            .map(ContactRole::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl ToParams for ContactUpdate {
    fn to_params(&self) -> Vec<Param> {
        let mut params = Vec::new();
        for role in self.roles() {
            if let Some(contact) = self.get(role) {
                params.extend(contact.to_role_params(role));
            }
        }
        params.push(Param::new("contact_types", self.contact_types()));
        params
    }
}
