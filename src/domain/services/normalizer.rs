//! Response Normalizer
//!
//! Maps heterogeneous provider payloads into the canonical `ResolvedAddress`.
//! Pure domain logic - no I/O.

use crate::domain::entities::ResolvedAddress;
use crate::domain::value_objects::{strip_non_digits, Cep, ProviderSource};
use serde_json::Value;

/// Maps provider payloads into canonical addresses.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Build a canonical address from a raw provider payload.
    ///
    /// Each canonical field is taken from the first key present among the
    /// provider aliases (ViaCEP uses Portuguese keys, BrasilAPI English ones).
    /// Missing or non-textual values degrade to the empty string. Coordinates
    /// are read from `location.coordinates` and accept both numbers and
    /// numeric strings. A payload without a CEP keeps the `requested` one.
    ///
    /// Never fails.
    pub fn to_canonical(
        payload: &Value,
        source: ProviderSource,
        requested: &Cep,
    ) -> ResolvedAddress {
        let (latitude, longitude) = coordinates(payload);
        let cep = match strip_non_digits(&text(payload, &["cep"])) {
            digits if digits.is_empty() => requested.to_string(),
            digits => digits,
        };

        ResolvedAddress {
            source,
            cep,
            street: text(payload, &["logradouro", "street", "address"]),
            neighborhood: text(payload, &["bairro", "neighborhood"]),
            city: text(payload, &["localidade", "city"]),
            state: text(payload, &["uf", "state"]),
            complement: text(payload, &["complemento", "complement"]),
            area_code: text(payload, &["ddd"]),
            ibge: text(payload, &["ibge", "city_ibge"]),
            gia: text(payload, &["gia"]),
            siafi: text(payload, &["siafi"]),
            latitude,
            longitude,
            cached: false,
        }
    }
}

/// First non-empty textual value among `keys`.
fn text(payload: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn coordinates(payload: &Value) -> (Option<f64>, Option<f64>) {
    let coords = match payload.pointer("/location/coordinates") {
        Some(c) if c.is_object() => c,
        _ => return (None, None),
    };
    let lat = number(coords.get("latitude"));
    let lng = number(coords.get("longitude"));
    match (lat, lng) {
        (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
        _ => (None, None),
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
