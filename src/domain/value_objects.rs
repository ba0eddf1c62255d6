//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use crate::domain::errors::LookupError;
use serde::{Deserialize, Serialize};

/// Number of digits in a Brazilian postal code.
pub const CEP_LEN: usize = 8;

/// Normalized Brazilian postal code (CEP).
///
/// Always holds exactly eight ASCII digits. Construction strips every
/// non-digit character, so `"01001-000"`, `"01.001-000"` and `"01001000"`
/// all produce the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// Normalize a raw, possibly formatted, postal code.
    ///
    /// # Examples
    /// ```
    /// use pizzeria_api::domain::value_objects::Cep;
    ///
    /// assert_eq!(Cep::parse("01001-000").unwrap().as_str(), "01001000");
    /// assert!(Cep::parse("0100-100").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let digits = strip_non_digits(raw);
        if digits.len() != CEP_LEN {
            return Err(LookupError::InvalidFormat(raw.to_string()));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human formatted form, `NNNNN-NNN`.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl TryFrom<String> for Cep {
    type Error = LookupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.0
    }
}

impl std::fmt::Display for Cep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep only ASCII digits.
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// External lookup service that produced an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSource {
    /// ViaCEP - primary, fastest
    ViaCep,
    /// BrasilAPI - fallback, richer payload
    BrasilApi,
}

impl ProviderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViaCep => "viacep",
            Self::BrasilApi => "brasilapi",
        }
    }

    /// Display name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ViaCep => "ViaCEP",
            Self::BrasilApi => "BrasilAPI",
        }
    }
}

impl std::fmt::Display for ProviderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Canonical address field that can be bound to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressField {
    Cep,
    Street,
    Neighborhood,
    City,
    State,
    Complement,
    AreaCode,
    Ibge,
    Gia,
    Siafi,
}

impl AddressField {
    /// Parse a field name. Accepts both the canonical English names and the
    /// Portuguese keys used by the storefront forms.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cep" => Some(Self::Cep),
            "street" | "logradouro" => Some(Self::Street),
            "neighborhood" | "bairro" => Some(Self::Neighborhood),
            "city" | "cidade" | "localidade" => Some(Self::City),
            "state" | "estado" | "uf" => Some(Self::State),
            "complement" | "complemento" => Some(Self::Complement),
            "area_code" | "areacode" | "ddd" => Some(Self::AreaCode),
            "ibge" => Some(Self::Ibge),
            "gia" => Some(Self::Gia),
            "siafi" => Some(Self::Siafi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cep => "cep",
            Self::Street => "street",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::State => "state",
            Self::Complement => "complement",
            Self::AreaCode => "area_code",
            Self::Ibge => "ibge",
            Self::Gia => "gia",
            Self::Siafi => "siafi",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    // ===== Cep::parse Tests =====

    #[test]
    fn test_cep_parse_plain_digits() {
        let cep = Cep::parse("01001000").unwrap();
        assert_eq!(cep.as_str(), "01001000");
    }

    #[test]
    fn test_cep_parse_strips_formatting() {
        let inputs = vec!["01001-000", "01.001-000", " 01001 000 ", "CEP: 01001-000"];

        for input in inputs {
            assert_eq!(
                Cep::parse(input).unwrap().as_str(),
                "01001000",
                "Failed for input: {}",
                input
            );
        }
    }

    #[test]
    fn test_cep_parse_rejects_wrong_length() {
        let invalid = vec!["", "1234567", "123456789", "abc", "0100-100", "01001-0000"];

        for input in invalid {
            match Cep::parse(input) {
                Err(LookupError::InvalidFormat(raw)) => assert_eq!(raw, input),
                other => panic!("expected InvalidFormat for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_cep_parse_is_idempotent() {
        let once = Cep::parse("22030-060").unwrap();
        let twice = Cep::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cep_formatted() {
        let cep = Cep::parse("01001000").unwrap();
        assert_eq!(cep.formatted(), "01001-000");
        assert_eq!(format!("{}", cep), "01001000");
    }

    #[test]
    fn test_cep_serde() {
        let cep: Cep = serde_json::from_str("\"01001-000\"").unwrap();
        assert_eq!(cep.as_str(), "01001000");
        assert_eq!(serde_json::to_string(&cep).unwrap(), "\"01001000\"");
        assert!(serde_json::from_str::<Cep>("\"123\"").is_err());
    }

    // ===== ProviderSource Tests =====

    #[test]
    fn test_provider_source_names() {
        assert_eq!(ProviderSource::ViaCep.as_str(), "viacep");
        assert_eq!(ProviderSource::BrasilApi.as_str(), "brasilapi");
        assert_eq!(format!("{}", ProviderSource::ViaCep), "ViaCEP");
        assert_eq!(format!("{}", ProviderSource::BrasilApi), "BrasilAPI");
    }

    #[test]
    fn test_provider_source_serde() {
        let json = serde_json::to_string(&ProviderSource::BrasilApi).unwrap();
        assert_eq!(json, "\"brasilapi\"");
    }

    // ===== AddressField Tests =====

    #[test]
    fn test_address_field_from_str_aliases() {
        let tests = vec![
            ("logradouro", AddressField::Street),
            ("street", AddressField::Street),
            ("bairro", AddressField::Neighborhood),
            ("cidade", AddressField::City),
            ("localidade", AddressField::City),
            ("UF", AddressField::State),
            ("complemento", AddressField::Complement),
            ("ddd", AddressField::AreaCode),
        ];

        for (input, expected) in tests {
            assert_eq!(
                AddressField::from_str(input),
                Some(expected),
                "Failed for input: {}",
                input
            );
        }
    }

    #[test]
    fn test_address_field_from_str_unknown() {
        assert_eq!(AddressField::from_str("numero"), None);
        assert_eq!(AddressField::from_str(""), None);
    }

    #[test]
    fn test_address_field_roundtrip() {
        for field in [
            AddressField::Cep,
            AddressField::Street,
            AddressField::Neighborhood,
            AddressField::City,
            AddressField::State,
            AddressField::Complement,
            AddressField::AreaCode,
            AddressField::Ibge,
            AddressField::Gia,
            AddressField::Siafi,
        ] {
            assert_eq!(AddressField::from_str(field.as_str()), Some(field));
        }
    }
}
