//! Validation utilities for the Courier Pricing Platform
//!
//! Free-text booking fields are checked against a policy table of
//! [`FieldRule`]s. Payment reference formats follow the e-wallet providers
//! accepted in the Philippines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::PaymentMethod;

/// Message shared by every spam rejection
pub const SPAM_MESSAGE: &str = "Input looks like spam";

/// The only postal code inside the delivery area (Calapan City)
pub const SERVICE_ZIP_CODE: &str = "5200";

/// Largest amount accepted on a booking form
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

// ============================================================================
// Policy Table
// ============================================================================

/// Characters a field may contain
#[derive(Debug, Clone, Copy)]
pub struct CharClass {
    pub letters: bool,
    pub digits: bool,
    pub whitespace: bool,
    /// Extra punctuation allowed verbatim
    pub symbols: &'static str,
}

impl CharClass {
    fn allows(&self, c: char) -> bool {
        (self.letters && c.is_ascii_alphabetic())
            || (self.digits && c.is_ascii_digit())
            || (self.whitespace && c.is_whitespace())
            || self.symbols.contains(c)
    }

    pub fn matches(&self, value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| self.allows(c))
    }
}

/// Heuristics that flag keyboard-mashing and filler input.
///
/// Each rule applies to the whole raw value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpamRules {
    /// Reject an all-uppercase value at least this long
    pub all_caps_min: Option<usize>,
    /// Reject an all-lowercase value at least this long
    pub all_lower_min: Option<usize>,
    /// Reject one character repeated at least this many times
    pub repeated_char_min: Option<usize>,
    /// Reject a value made only of digits
    pub digits_only: bool,
}

impl SpamRules {
    pub fn is_spam(&self, value: &str) -> bool {
        let len = value.chars().count();
        if len == 0 {
            return false;
        }

        let all = |pred: fn(&char) -> bool| value.chars().all(|c| pred(&c));

        if let Some(min) = self.all_caps_min {
            if len >= min && all(char::is_ascii_uppercase) {
                return true;
            }
        }
        if let Some(min) = self.all_lower_min {
            if len >= min && all(char::is_ascii_lowercase) {
                return true;
            }
        }
        if let Some(min) = self.repeated_char_min {
            let mut chars = value.chars();
            if let Some(first) = chars.next() {
                if len >= min && first != '\n' && chars.all(|c| c == first) {
                    return true;
                }
            }
        }
        self.digits_only && all(char::is_ascii_digit)
    }
}

/// Validation policy for one free-text field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub chars: CharClass,
    /// Inclusive bounds on the trimmed length
    pub min_len: usize,
    pub max_len: usize,
    pub spam: SpamRules,
    pub message: &'static str,
}

impl FieldRule {
    pub fn check(&self, value: &str) -> Result<(), &'static str> {
        if self.spam.is_spam(value) {
            return Err(SPAM_MESSAGE);
        }
        let trimmed_len = value.trim().chars().count();
        if !self.chars.matches(value) || trimmed_len < self.min_len || trimmed_len > self.max_len {
            return Err(self.message);
        }
        Ok(())
    }
}

const LIGHT_SPAM: SpamRules = SpamRules {
    all_caps_min: Some(5),
    all_lower_min: Some(20),
    repeated_char_min: Some(5),
    digits_only: false,
};

const LONG_TEXT_SPAM: SpamRules = SpamRules {
    all_caps_min: Some(10),
    all_lower_min: Some(30),
    repeated_char_min: Some(6),
    digits_only: false,
};

const LIST_CHARS: CharClass = CharClass {
    letters: true,
    digits: true,
    whitespace: true,
    symbols: "-.,$&'",
};

const LIST_WITH_SLASH_CHARS: CharClass = CharClass {
    letters: true,
    digits: true,
    whitespace: true,
    symbols: "-.,$&'/",
};

pub const NAME_RULE: FieldRule = FieldRule {
    chars: CharClass {
        letters: true,
        digits: false,
        whitespace: true,
        symbols: "-.",
    },
    min_len: 2,
    max_len: 50,
    spam: LIGHT_SPAM,
    message: "Name must be 2-50 letters, spaces, hyphens or periods",
};

pub const ADDRESS_RULE: FieldRule = FieldRule {
    chars: CharClass {
        letters: true,
        digits: true,
        whitespace: true,
        symbols: "-.,#",
    },
    min_len: 10,
    max_len: 200,
    spam: SpamRules {
        digits_only: true,
        ..LIGHT_SPAM
    },
    message: "Address must be 10-200 characters of letters, numbers and - . , #",
};

pub const RESTAURANT_NAME_RULE: FieldRule = FieldRule {
    chars: CharClass {
        letters: true,
        digits: true,
        whitespace: true,
        symbols: "-.&'",
    },
    min_len: 2,
    max_len: 100,
    spam: SpamRules {
        all_caps_min: Some(5),
        all_lower_min: Some(15),
        repeated_char_min: Some(4),
        digits_only: false,
    },
    message: "Restaurant name must be 2-100 characters",
};

pub const FOOD_ITEMS_RULE: FieldRule = FieldRule {
    chars: LIST_CHARS,
    min_len: 5,
    max_len: 500,
    spam: LONG_TEXT_SPAM,
    message: "Food items must be 5-500 characters",
};

pub const ITEM_DESCRIPTION_RULE: FieldRule = FieldRule {
    chars: LIST_CHARS,
    min_len: 5,
    max_len: 300,
    spam: LONG_TEXT_SPAM,
    message: "Item description must be 5-300 characters",
};

pub const MEDICINE_LIST_RULE: FieldRule = FieldRule {
    chars: LIST_WITH_SLASH_CHARS,
    min_len: 3,
    max_len: 500,
    spam: LONG_TEXT_SPAM,
    message: "Medicine list must be 3-500 characters",
};

pub const SHOPPING_LIST_RULE: FieldRule = FieldRule {
    chars: LIST_WITH_SLASH_CHARS,
    min_len: 5,
    max_len: 1000,
    spam: LONG_TEXT_SPAM,
    message: "Shopping list must be 5-1000 characters",
};

pub const ACCOUNT_NUMBER_RULE: FieldRule = FieldRule {
    chars: CharClass {
        letters: true,
        digits: true,
        whitespace: false,
        symbols: "-",
    },
    min_len: 3,
    max_len: 50,
    spam: SpamRules {
        all_caps_min: None,
        all_lower_min: None,
        repeated_char_min: Some(5),
        digits_only: false,
    },
    message: "Account number must be 3-50 letters, numbers or hyphens",
};

pub const CONTACT_INFO_RULE: FieldRule = FieldRule {
    chars: CharClass {
        letters: true,
        digits: true,
        whitespace: true,
        symbols: "-.,$+",
    },
    min_len: 5,
    max_len: 100,
    spam: SpamRules {
        all_caps_min: Some(10),
        all_lower_min: Some(20),
        repeated_char_min: Some(5),
        digits_only: false,
    },
    message: "Contact info must be 5-100 characters",
};

// ============================================================================
// Account Validations
// ============================================================================

/// Validate email format: `local@domain.tld` without whitespace
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    const MSG: &str = "Invalid email format";
    if email.chars().any(char::is_whitespace) {
        return Err(MSG);
    }
    let (local, domain) = email.split_once('@').ok_or(MSG)?;
    if local.is_empty() || domain.contains('@') {
        return Err(MSG);
    }
    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if has_inner_dot {
        Ok(())
    } else {
        Err(MSG)
    }
}

/// Validate Philippine mobile number
/// Accepts: 9171234567, 09171234567, +639171234567 (spaces ignored)
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let is_ten_digits = |s: &str| s.len() == 10 && s.chars().all(|c| c.is_ascii_digit());

    let valid = is_ten_digits(&compact)
        || compact.strip_prefix("+63").is_some_and(is_ten_digits)
        || compact.strip_prefix('0').is_some_and(is_ten_digits);

    if valid {
        Ok(())
    } else {
        Err("Invalid phone number format")
    }
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

// ============================================================================
// Booking Field Validations
// ============================================================================

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    NAME_RULE.check(name)
}

pub fn validate_address(address: &str) -> Result<(), &'static str> {
    ADDRESS_RULE.check(address)
}

/// Only Calapan City addresses are served
pub fn validate_zip_code(zip_code: &str) -> Result<(), &'static str> {
    if zip_code == SERVICE_ZIP_CODE {
        Ok(())
    } else {
        Err("Delivery is only available in Calapan City (5200)")
    }
}

pub fn validate_restaurant_name(name: &str) -> Result<(), &'static str> {
    RESTAURANT_NAME_RULE.check(name)
}

pub fn validate_food_items(items: &str) -> Result<(), &'static str> {
    FOOD_ITEMS_RULE.check(items)
}

pub fn validate_item_description(description: &str) -> Result<(), &'static str> {
    ITEM_DESCRIPTION_RULE.check(description)
}

pub fn validate_medicine_list(medicines: &str) -> Result<(), &'static str> {
    MEDICINE_LIST_RULE.check(medicines)
}

pub fn validate_shopping_list(list: &str) -> Result<(), &'static str> {
    SHOPPING_LIST_RULE.check(list)
}

pub fn validate_account_number(account: &str) -> Result<(), &'static str> {
    ACCOUNT_NUMBER_RULE.check(account)
}

pub fn validate_contact_info(contact: &str) -> Result<(), &'static str> {
    CONTACT_INFO_RULE.check(contact)
}

/// Validate a peso amount entered as text (0 < amount <= 50,000)
pub fn validate_amount(amount: &str) -> Result<(), &'static str> {
    let value = Decimal::from_str(amount.trim()).map_err(|_| "Amount must be a number")?;
    if value <= Decimal::ZERO {
        return Err("Amount must be greater than zero");
    }
    if value > MAX_AMOUNT {
        return Err("Amount must not exceed 50,000");
    }
    Ok(())
}

/// Strip markup characters and surrounding whitespace
pub fn sanitize_input(input: &str) -> String {
    input.trim().chars().filter(|c| *c != '<' && *c != '>').collect()
}

/// Kinds of form fields checked by the validation endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Phone,
    Password,
    Name,
    Address,
    ZipCode,
    RestaurantName,
    FoodItems,
    ItemDescription,
    MedicineList,
    ShoppingList,
    AccountNumber,
    ContactInfo,
    Amount,
    ReferenceNumber,
}

impl FieldKind {
    pub fn validate(&self, value: &str) -> Result<(), &'static str> {
        match self {
            FieldKind::Email => validate_email(value),
            FieldKind::Phone => validate_phone(value),
            FieldKind::Password => validate_password(value),
            FieldKind::Name => validate_name(value),
            FieldKind::Address => validate_address(value),
            FieldKind::ZipCode => validate_zip_code(value),
            FieldKind::RestaurantName => validate_restaurant_name(value),
            FieldKind::FoodItems => validate_food_items(value),
            FieldKind::ItemDescription => validate_item_description(value),
            FieldKind::MedicineList => validate_medicine_list(value),
            FieldKind::ShoppingList => validate_shopping_list(value),
            FieldKind::AccountNumber => validate_account_number(value),
            FieldKind::ContactInfo => validate_contact_info(value),
            FieldKind::Amount => validate_amount(value),
            FieldKind::ReferenceNumber => validate_reference_number(value),
        }
    }
}

// ============================================================================
// Payment Reference Validations
// ============================================================================

/// Generic e-wallet reference number: 10-15 digits
pub fn validate_reference_number(reference: &str) -> Result<(), &'static str> {
    let len = reference.len();
    if (10..=15).contains(&len) && reference.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Reference number must be 10-15 digits")
    }
}

/// Remove all whitespace from a reference as typed from a receipt
pub fn normalize_reference(reference: &str) -> String {
    reference.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validate a QR payment reference against the provider's format
/// GCash: exactly 13 digits; PayMaya: 12-13 digits; GoTyme: 10-15 alphanumeric
pub fn validate_qr_reference(reference: &str, method: PaymentMethod) -> Result<(), &'static str> {
    let clean = normalize_reference(reference).to_ascii_uppercase();
    let len = clean.len();
    let all_digits = clean.chars().all(|c| c.is_ascii_digit());

    let valid = match method {
        PaymentMethod::GCash => len == 13 && all_digits,
        PaymentMethod::PayMaya => (12..=13).contains(&len) && all_digits,
        PaymentMethod::GoTyme => {
            (10..=15).contains(&len)
                && clean
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        }
    };

    if valid {
        Ok(())
    } else {
        Err("Invalid reference format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Account Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("juan.dela.cruz@mail.com.ph").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@.com").is_err());
        assert!(validate_email("a@b.").is_err());
        assert!(validate_email("a b@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("9171234567").is_ok());
        assert!(validate_phone("09171234567").is_ok());
        assert!(validate_phone("+639171234567").is_ok());
        assert!(validate_phone("0917 123 4567").is_ok());
        // Ten digits with a leading zero also pass
        assert!(validate_phone("0917123456").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+6391712345678").is_err());
        assert!(validate_phone("0917-123-4567").is_err());
        assert!(validate_phone("abcdefghij").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
    }

    // ========================================================================
    // Booking Field Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Juan Dela Cruz").is_ok());
        assert!(validate_name("Ma. Clara-Santos").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name("Juan3").is_err());
        assert_eq!(validate_name("ABCDE"), Err(SPAM_MESSAGE));
        assert_eq!(validate_name("aaaaa"), Err(SPAM_MESSAGE));
        assert_eq!(validate_name("abcdefghijklmnopqrst"), Err(SPAM_MESSAGE));
        // Short all-caps names are fine
        assert!(validate_name("JOE").is_ok());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("123 Rizal St., Brgy. Lalud").is_ok());
        assert!(validate_address("Unit #4, J.P. Rizal").is_ok());
        assert!(validate_address("Short").is_err());
        assert!(validate_address("123 Rizal St. <script>").is_err());
        assert_eq!(validate_address("1234567890"), Err(SPAM_MESSAGE));
        assert_eq!(validate_address("##########"), Err(SPAM_MESSAGE));
    }

    #[test]
    fn test_validate_zip_code() {
        assert!(validate_zip_code("5200").is_ok());
        assert!(validate_zip_code("5201").is_err());
        assert!(validate_zip_code(" 5200").is_err());
    }

    #[test]
    fn test_validate_restaurant_name() {
        assert!(validate_restaurant_name("Jollibee").is_ok());
        assert!(validate_restaurant_name("Mang Inasal & Co.").is_ok());
        assert_eq!(validate_restaurant_name("zzzz"), Err(SPAM_MESSAGE));
        assert_eq!(validate_restaurant_name("abcdefghijklmno"), Err(SPAM_MESSAGE));
    }

    #[test]
    fn test_validate_list_fields() {
        assert!(validate_food_items("2 pcs Chickenjoy, 1 Spaghetti").is_ok());
        assert!(validate_food_items("Rice").is_err());
        assert!(validate_medicine_list("Biogesic 500mg/tab").is_ok());
        assert!(validate_food_items("Biogesic 500mg/tab").is_err());
        assert!(validate_shopping_list("Eggs, rice, 1/2 kg pork").is_ok());
        assert!(validate_item_description("Blue box, fragile").is_ok());
        assert_eq!(validate_item_description("xxxxxx"), Err(SPAM_MESSAGE));
        assert!(validate_item_description("xxxxx").is_ok());
    }

    #[test]
    fn test_validate_account_number() {
        assert!(validate_account_number("ACC-12345").is_ok());
        assert!(validate_account_number("12").is_err());
        assert!(validate_account_number("ACC 123").is_err());
        assert_eq!(validate_account_number("11111"), Err(SPAM_MESSAGE));
    }

    #[test]
    fn test_validate_contact_info() {
        assert!(validate_contact_info("Maria +63 917 123 4567").is_ok());
        assert!(validate_contact_info("abc").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("150.50").is_ok());
        assert!(validate_amount("50000").is_ok());
        assert!(validate_amount("50000.01").is_err());
        assert!(validate_amount("0").is_err());
        assert!(validate_amount("-5").is_err());
        assert!(validate_amount("abc").is_err());
    }

    #[test]
    fn test_validate_amount_rejects_trailing_text() {
        assert!(validate_amount(" 150 ").is_ok());
        assert_eq!(validate_amount("150php"), Err("Amount must be a number"));
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  <b>Hello</b> "), "bHello/b");
        assert_eq!(sanitize_input("plain"), "plain");
    }

    #[test]
    fn test_field_kind_dispatch() {
        assert!(FieldKind::ZipCode.validate("5200").is_ok());
        assert!(FieldKind::Email.validate("nope").is_err());
        let kind: FieldKind = serde_json::from_str("\"medicine_list\"").unwrap();
        assert_eq!(kind, FieldKind::MedicineList);
    }

    // ========================================================================
    // Payment Reference Tests
    // ========================================================================

    #[test]
    fn test_validate_reference_number() {
        assert!(validate_reference_number("1234567890").is_ok());
        assert!(validate_reference_number("123456789012345").is_ok());
        assert!(validate_reference_number("123456789").is_err());
        assert!(validate_reference_number("12345abcde").is_err());
    }

    #[test]
    fn test_gcash_reference() {
        assert!(validate_qr_reference("1234567890123", PaymentMethod::GCash).is_ok());
        assert!(validate_qr_reference("1234 567 890 123", PaymentMethod::GCash).is_ok());
        assert!(validate_qr_reference("123456789012", PaymentMethod::GCash).is_err());
        assert!(validate_qr_reference("12345678901234", PaymentMethod::GCash).is_err());
    }

    #[test]
    fn test_paymaya_reference() {
        assert!(validate_qr_reference("123456789012", PaymentMethod::PayMaya).is_ok());
        assert!(validate_qr_reference("1234567890123", PaymentMethod::PayMaya).is_ok());
        assert!(validate_qr_reference("12345678901", PaymentMethod::PayMaya).is_err());
    }

    #[test]
    fn test_gotyme_reference() {
        assert!(validate_qr_reference("abc123def45", PaymentMethod::GoTyme).is_ok());
        assert!(validate_qr_reference("ABC123DEF456789", PaymentMethod::GoTyme).is_ok());
        assert!(validate_qr_reference("ABC-123-DEF", PaymentMethod::GoTyme).is_err());
        assert!(validate_qr_reference("ABC12", PaymentMethod::GoTyme).is_err());
    }

    #[test]
    fn test_normalize_reference() {
        assert_eq!(normalize_reference(" 1234 5678\t90 "), "1234567890");
    }
}
