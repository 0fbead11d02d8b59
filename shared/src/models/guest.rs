//! Guest Model

use serde::{Deserialize, Serialize};

/// Guest entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Create guest payload (id assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGuest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl NewGuest {
    pub fn into_guest(self, id: String) -> Guest {
        Guest {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Guest reference in a booking request: an existing guest or one to create
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuestRef {
    Existing { guest_id: String },
    New(NewGuest),
}
