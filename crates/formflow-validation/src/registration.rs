//! Rule catalogue of the user registration form

use crate::error::SchemaError;
use crate::messages::MessageCatalog;
use crate::rules::{FieldRule, Rules, RulesBuilder};
use crate::validators::*;

/// Field names of the registration form, in declaration order
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const PHONE: &str = "phone";
    pub const BIRTH_DATE: &str = "birthDate";
    pub const TERMS: &str = "terms";

    pub const ALL: [&str; 8] = [
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        PASSWORD,
        CONFIRM_PASSWORD,
        PHONE,
        BIRTH_DATE,
        TERMS,
    ];
}

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Optional leading `+`, then at least ten digits, spaces, hyphens or parentheses
pub const PHONE_PATTERN: &str = r"^\+?[0-9\s\-()]{10,}$";

/// Lowercase, uppercase and digit, each somewhere in the value
pub const PASSWORD_CLASSES: [&str; 3] = [r"[a-z]", r"[A-Z]", r"\d"];

fn name_rule(field: &str, required: &str, too_short: &str, too_long: &str) -> FieldRule {
    FieldRule::text(field)
        .check(RequiredValidator::with_message(required))
        .check(
            LengthValidator::new()
                .range(NAME_MIN_LENGTH, NAME_MAX_LENGTH)
                .too_short_message(too_short)
                .too_long_message(too_long),
        )
}

/// Build the registration form's rules with the given wording
pub fn registration_rules(messages: &MessageCatalog) -> Result<Rules, SchemaError> {
    RulesBuilder::new()
        .field(name_rule(
            fields::FIRST_NAME,
            &messages.first_name_required,
            &messages.first_name_too_short,
            &messages.first_name_too_long,
        ))
        .field(name_rule(
            fields::LAST_NAME,
            &messages.last_name_required,
            &messages.last_name_too_short,
            &messages.last_name_too_long,
        ))
        .field(
            FieldRule::text(fields::EMAIL)
                .check(RequiredValidator::with_message(&messages.email_required))
                .check(EmailValidator::new().message(&messages.email_invalid)),
        )
        .field(
            FieldRule::text(fields::PASSWORD)
                .check(RequiredValidator::with_message(&messages.password_required))
                .check(
                    LengthValidator::new()
                        .min(PASSWORD_MIN_LENGTH)
                        .too_short_message(&messages.password_too_short),
                )
                .check(
                    PatternValidator::contains_all(&PASSWORD_CLASSES)?
                        .message(&messages.password_complexity),
                ),
        )
        .field(
            FieldRule::text(fields::CONFIRM_PASSWORD)
                .check(RequiredValidator::with_message(
                    &messages.confirm_password_required,
                ))
                .check(
                    FieldMatchValidator::new(fields::PASSWORD)
                        .message(&messages.passwords_mismatch),
                ),
        )
        .field(
            FieldRule::text(fields::PHONE)
                .check(RequiredValidator::with_message(&messages.phone_required))
                .check(PatternValidator::new(PHONE_PATTERN)?.message(&messages.phone_invalid)),
        )
        .field(
            FieldRule::date(fields::BIRTH_DATE)
                .check(RequiredValidator::with_message(&messages.birth_date_required))
                .check(
                    DateValidator::not_in_future()
                        .future_message(&messages.birth_date_in_future)
                        .invalid_message(&messages.birth_date_invalid),
                ),
        )
        .field(
            FieldRule::boolean(fields::TERMS)
                .check(LiteralValidator::accepted().message(&messages.terms_required)),
        )
        .build()
}
