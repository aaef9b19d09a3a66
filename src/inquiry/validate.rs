//! Inquiry form validation
//!
//! Pure and side-effect free: safe to run on every keystroke.

use crate::types::{InquiryCandidate, InquiryRequest};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Minimum digits in a phone number
const MIN_PHONE_DIGITS: usize = 10;

/// Minimum ZIP code length
const MIN_ZIP_LEN: usize = 5;

/// Field name → message
pub type FieldErrors = BTreeMap<String, String>;

/// Inquiry form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Customer name
    Name,
    /// Customer email
    Email,
    /// Customer phone
    Phone,
    /// ZIP code
    ZipCode,
    /// Model year
    Year,
    /// Manufacturer
    Manufacturer,
    /// Model
    Model,
    /// Part category
    PartCategory,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Self; 8] = [
        Self::Year,
        Self::Manufacturer,
        Self::Model,
        Self::PartCategory,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::ZipCode,
    ];

    /// Form field name, used as the key in [`FieldErrors`]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ZipCode => "zipCode",
            Self::Year => "year",
            Self::Manufacturer => "manufacturerId",
            Self::Model => "modelId",
            Self::PartCategory => "partCategoryId",
        }
    }

    /// Map an inquiry endpoint field name back to a form field
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "zipcode" => Some(Self::ZipCode),
            "year" => Some(Self::Year),
            "manufacturer" => Some(Self::Manufacturer),
            "model" => Some(Self::Model),
            "part_category" => Some(Self::PartCategory),
            _ => None,
        }
    }

    /// Message shown when the field fails validation
    pub const fn message(self) -> &'static str {
        match self {
            Self::Name => "Name is required",
            Self::Email => "Enter a valid email address",
            Self::Phone => "Enter a valid phone number",
            Self::ZipCode => "Enter a valid ZIP code",
            Self::Year => "Select a year",
            Self::Manufacturer => "Select a manufacturer",
            Self::Model => "Select a model",
            Self::PartCategory => "Select a part category",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Every field passed; the request is ready to send
    Valid(InquiryRequest),
    /// At least one field failed
    Invalid(FieldErrors),
}

impl Validation {
    /// Whether the candidate passed
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@\S+\.\S+$").expect("hardcoded email pattern is valid")
    })
}

/// Basic `local@domain.tld` shape check
///
/// Everything after the first `@` is the domain, which needs a `.` with
/// something on both sides.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// At least ten digits once formatting is stripped
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// At least five characters
pub fn is_valid_zip(zip: &str) -> bool {
    zip.trim().chars().count() >= MIN_ZIP_LEN
}

/// Validate every field of a candidate
///
/// All fields are checked; `Invalid` carries one message per failing field.
pub fn validate(candidate: &InquiryCandidate) -> Validation {
    let mut errors = FieldErrors::new();
    let mut fail = |field: Field| {
        errors.insert(field.as_str().to_string(), field.message().to_string());
    };

    if candidate.year.is_none() {
        fail(Field::Year);
    }
    if candidate.manufacturer_id.is_none() {
        fail(Field::Manufacturer);
    }
    if candidate.model_id.is_none() {
        fail(Field::Model);
    }
    if candidate.part_category_id.is_none() {
        fail(Field::PartCategory);
    }
    if candidate.name.trim().is_empty() {
        fail(Field::Name);
    }
    if !is_valid_email(&candidate.email) {
        fail(Field::Email);
    }
    if !is_valid_phone(&candidate.phone) {
        fail(Field::Phone);
    }
    if !is_valid_zip(&candidate.zip_code) {
        fail(Field::ZipCode);
    }

    match (
        candidate.year,
        candidate.manufacturer_id,
        candidate.model_id,
        candidate.part_category_id,
    ) {
        (Some(year), Some(manufacturer_id), Some(model_id), Some(part_category_id))
            if errors.is_empty() =>
        {
            Validation::Valid(InquiryRequest {
                year,
                manufacturer_id,
                model_id,
                part_category_id,
                name: candidate.name.trim().to_string(),
                email: candidate.email.trim().to_string(),
                phone: candidate.phone.trim().to_string(),
                zip_code: candidate.zip_code.trim().to_string(),
                notes: candidate.notes.trim().to_string(),
            })
        }
        _ => Validation::Invalid(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_candidate() -> InquiryCandidate {
        InquiryCandidate {
            year: Some(2015),
            manufacturer_id: Some(3),
            model_id: Some(12),
            part_category_id: Some(7),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            zip_code: "90210".to_string(),
            notes: String::new(),
        }
    }

    fn errors_of(candidate: &InquiryCandidate) -> FieldErrors {
        match validate(candidate) {
            Validation::Invalid(errors) => errors,
            Validation::Valid(_) => panic!("expected Invalid"),
        }
    }

    #[test]
    fn test_valid_candidate_builds_trimmed_request() {
        let candidate = InquiryCandidate {
            name: "  Jane Doe ".to_string(),
            notes: " left side \n".to_string(),
            ..valid_candidate()
        };
        let Validation::Valid(request) = validate(&candidate) else {
            panic!("expected Valid");
        };
        assert_eq!(request.name, "Jane Doe");
        assert_eq!(request.notes, "left side");
        assert_eq!(request.year, 2015);
        assert_eq!(request.manufacturer_id, 3);
        assert_eq!(request.model_id, 12);
        assert_eq!(request.part_category_id, 7);
    }

    #[test]
    fn test_empty_candidate_reports_every_field() {
        let errors = errors_of(&InquiryCandidate::default());
        assert_eq!(errors.len(), 8);
        for field in Field::ALL {
            assert_eq!(errors.get(field.as_str()).map(String::as_str), Some(field.message()));
        }
    }

    #[test]
    fn test_email_rejection_only_flags_email() {
        let candidate = InquiryCandidate {
            email: "not-an-email".to_string(),
            ..valid_candidate()
        };
        let errors = errors_of(&candidate);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], "Enter a valid email address");
    }

    #[test]
    fn test_short_zip() {
        let candidate = InquiryCandidate {
            zip_code: "123".to_string(),
            ..valid_candidate()
        };
        let errors = errors_of(&candidate);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["zipCode"], "Enter a valid ZIP code");
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let candidate = InquiryCandidate {
            name: "   ".to_string(),
            ..valid_candidate()
        };
        assert_eq!(errors_of(&candidate)["name"], "Name is required");
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email(" jane.doe+parts@mail.example.co.uk "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane@."));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@example."));
        assert!(is_valid_email("jane@office@example.com"));
    }

    #[test]
    fn test_phone_counts_digits_only() {
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+1 555 123 4567"));
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("phone: ----------"));
    }

    #[test]
    fn test_field_wire_names_round_back() {
        assert_eq!(Field::from_wire("zipcode"), Some(Field::ZipCode));
        assert_eq!(Field::from_wire("part_category"), Some(Field::PartCategory));
        assert_eq!(Field::from_wire("non_field_errors"), None);
    }
}
