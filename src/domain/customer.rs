use serde::{Deserialize, Serialize};

/// The channels a customer can be reached through.
///
/// Empty strings are treated the same as missing values.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    email: Option<String>,
    phone: Option<String>,
}

impl ContactInfo {
    pub fn new(email: Option<String>, phone: Option<String>) -> Self {
        Self { email, phone }
    }

    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone: None,
        }
    }

    pub fn with_phone(phone: impl Into<String>) -> Self {
        Self {
            email: None,
            phone: Some(phone.into()),
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.is_empty())
    }

    /// True when at least one channel is usable.
    pub fn is_reachable(&self) -> bool {
        self.email().is_some() || self.phone().is_some()
    }
}

/// The customer on whose behalf a payment is made.
///
/// Read-only once built; the builder-style `with_*` methods consume `self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerData {
    name: String,
    contact_info: Option<ContactInfo>,
    /// Reference to the customer record held by the gateway, if one exists.
    customer_id: Option<String>,
}

impl CustomerData {
    pub fn new(name: impl Into<String>, contact_info: ContactInfo) -> Self {
        Self {
            name: name.into(),
            contact_info: Some(contact_info),
            customer_id: None,
        }
    }

    /// A customer with no contact record at all.
    pub fn without_contact(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_info: None,
            customer_id: None,
        }
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact_info(&self) -> Option<&ContactInfo> {
        self.contact_info.as_ref()
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.contact_info.as_ref().and_then(ContactInfo::email)
    }

    pub fn phone(&self) -> Option<&str> {
        self.contact_info.as_ref().and_then(ContactInfo::phone)
    }
}
