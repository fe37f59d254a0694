//! User record types, as served by the remote endpoint.

use serde::{Deserialize, Serialize};

/// One simulated person returned by `GET <base>/<id>`.
///
/// Only `id`, `name` and `phone` are projected by the display surface; the
/// remaining fields are part of the payload and kept so the JSON renderer
/// can show the whole record. Auxiliary fields default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier, positive (the endpoint serves 1..=10).
    pub id: u32,
    /// Display name, shown in the `Username` column.
    pub name: String,
    /// Phone number, free-form.
    pub phone: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

/// Postal address block of a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinates as strings, exactly as the endpoint sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Employer block of a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}
