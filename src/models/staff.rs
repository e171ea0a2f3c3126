use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub identity_card_number: Option<String>,
    #[serde(default)]
    pub emergency_contact_number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Hourly pay per role-key.
    #[serde(default, deserialize_with = "super::de_rates")]
    pub rates: BTreeMap<String, f64>,
}

impl Staff {
    /// Staff without any hourly rate are paid a fixed salary.
    pub fn is_fixed_salary(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn rate_for(&self, role_key: &str) -> Option<f64> {
        self.rates.get(role_key).copied()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayload {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rates: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolePayload {
    pub name: String,
    pub key: String,
}

impl RolePayload {
    /// The key is normalised the same way the role form does while typing.
    pub fn new(name: &str, key: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            key: role_key_slug(key),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() || self.key.is_empty() {
            return Err(AppError::Validation("Role name and key are both required.".to_string()));
        }
        Ok(())
    }
}

/// Lowercases, strips Vietnamese diacritics, turns whitespace runs into `-`
/// and drops anything outside `[a-z0-9-]`.
pub fn role_key_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut in_space = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;

        for lower in ch.to_lowercase() {
            let folded = fold_vietnamese(lower);
            if folded.is_ascii_lowercase() || folded.is_ascii_digit() || folded == '-' {
                slug.push(folded);
            }
        }
    }

    slug
}

fn fold_vietnamese(ch: char) -> char {
    const GROUPS: [(&str, char); 7] = [
        ("àáạảãâầấậẩẫăằắặẳẵ", 'a'),
        ("èéẹẻẽêềếệểễ", 'e'),
        ("ìíịỉĩ", 'i'),
        ("òóọỏõôồốộổỗơờớợởỡ", 'o'),
        ("ùúụủũưừứựửữ", 'u'),
        ("ỳýỵỷỹ", 'y'),
        ("đ", 'd'),
    ];

    GROUPS
        .iter()
        .find(|(accented, _)| accented.contains(ch))
        .map(|(_, base)| *base)
        .unwrap_or(ch)
}
