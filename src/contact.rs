// Contact routing methods
// Tagged union with exhaustive dispatch. Decorative relative to the query
// core, but it carries the record/union data model used by the demo.

use serde::{Deserialize, Serialize};

/// A postal delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Address {
            street: street.into(),
            city: city.into(),
            postal_code: postal_code.into(),
        }
    }
}

/// A dialable number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub country_code: String,
    pub number: String,
}

impl PhoneNumber {
    pub fn new(country_code: impl Into<String>, number: impl Into<String>) -> Self {
        PhoneNumber {
            country_code: country_code.into(),
            number: number.into(),
        }
    }

    pub fn formatted(&self) -> String {
        format!("+{} {}", self.country_code, self.number)
    }
}

/// How a customer prefers to be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactMethod {
    PostalMail(Address),
    Email(String),
    VoiceMail(PhoneNumber),
    Sms(PhoneNumber),
}

impl ContactMethod {
    /// Short code for internal use
    pub fn code(&self) -> &str {
        match self {
            ContactMethod::PostalMail(_) => "post",
            ContactMethod::Email(_) => "email",
            ContactMethod::VoiceMail(_) => "voice",
            ContactMethod::Sms(_) => "sms",
        }
    }

    /// One routing line per variant, used by the demo output.
    pub fn dispatch_label(&self) -> String {
        match self {
            ContactMethod::PostalMail(address) => format!(
                "post -> {}, {} {}",
                address.street, address.city, address.postal_code
            ),
            ContactMethod::Email(address) => format!("email -> {address}"),
            ContactMethod::VoiceMail(number) => format!("voice -> {}", number.formatted()),
            ContactMethod::Sms(number) => format!("sms -> {}", number.formatted()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_methods() -> Vec<ContactMethod> {
        vec![
            ContactMethod::PostalMail(Address::new("1 Loop Rd", "Springfield", "49007")),
            ContactMethod::Email("billing@acme.example".to_string()),
            ContactMethod::VoiceMail(PhoneNumber::new("1", "555-0100")),
            ContactMethod::Sms(PhoneNumber::new("44", "7700-900123")),
        ]
    }

    #[test]
    fn test_dispatch_label_per_variant() {
        let labels: Vec<String> = sample_methods()
            .iter()
            .map(ContactMethod::dispatch_label)
            .collect();

        assert_eq!(labels[0], "post -> 1 Loop Rd, Springfield 49007");
        assert_eq!(labels[1], "email -> billing@acme.example");
        assert_eq!(labels[2], "voice -> +1 555-0100");
        assert_eq!(labels[3], "sms -> +44 7700-900123");
    }

    #[test]
    fn test_codes_are_distinct() {
        let methods = sample_methods();
        let codes: Vec<&str> = methods.iter().map(|m| m.code()).collect();
        assert_eq!(codes, ["post", "email", "voice", "sms"]);
    }
}
