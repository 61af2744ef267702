//! Domain records: users, gas stations, price history.
//!
//! Field names serialize as `Name`, `Location`, `Time`, ... . Input objects
//! match fields ignoring case (see [`crate::wire`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wire::Fields;

/// Fuel kind -> price. Ordered so JSON output is stable.
pub type Prices = BTreeMap<String, f64>;

/// Append-only price history of one station, oldest first.
pub type History = Vec<HistoryRecord>;

#[derive(Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Fields")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<Fields> for CreateUserRequest {
    type Error = String;

    fn try_from(f: Fields) -> Result<Self, String> {
        Ok(Self {
            name: f.required("Name")?,
            email: f.required("Email")?,
            password: f.required("Password")?,
        })
    }
}

impl From<CreateUserRequest> for User {
    fn from(req: CreateUserRequest) -> Self {
        User::new(req.name, req.email, req.password)
    }
}

/// Public view of a user (never carries the password).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "Fields")]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl TryFrom<Fields> for Location {
    type Error = String;

    fn try_from(f: Fields) -> Result<Self, String> {
        Ok(Self {
            lat: f.required("Lat")?,
            lon: f.required("Lon")?,
        })
    }
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Euclidean distance in degree space. Not geodesic.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

/// `Address` and `Prices` may be omitted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "Fields")]
pub struct GasStation {
    pub name: String,
    pub address: String,
    pub location: Location,
    pub prices: Prices,
}

impl TryFrom<Fields> for GasStation {
    type Error = String;

    fn try_from(f: Fields) -> Result<Self, String> {
        Ok(Self {
            name: f.required("Name")?,
            address: f.optional("Address")?,
            location: f.required("Location")?,
            prices: f.optional("Prices")?,
        })
    }
}

impl GasStation {
    pub fn new(name: impl Into<String>, address: impl Into<String>, location: Location, prices: Prices) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            location,
            prices,
        }
    }

    /// Last-writer-wins merge: fuels in `update` are added or overwritten,
    /// everything else is left as is.
    pub fn merge_prices(&mut self, update: &Prices) {
        for (fuel, price) in update {
            self.prices.insert(fuel.clone(), *price);
        }
    }
}

/// Immutable snapshot of the prices supplied by one update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Fields")]
pub struct HistoryRecord {
    /// Unix seconds.
    #[serde(rename = "Time")]
    pub timestamp: i64,
    #[serde(rename = "Prices")]
    pub prices: Prices,
}

impl TryFrom<Fields> for HistoryRecord {
    type Error = String;

    fn try_from(f: Fields) -> Result<Self, String> {
        Ok(Self {
            timestamp: f.required("Time")?,
            prices: f.optional("Prices")?,
        })
    }
}

/// Response of `GET /gas-stations/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GasStationWithHistory {
    #[serde(flatten)]
    pub station: GasStation,
    #[serde(rename = "History")]
    pub history: History,
}

/// Build a [`Prices`] map from `(fuel, price)` pairs.
pub fn prices<I, S>(pairs: I) -> Prices
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
