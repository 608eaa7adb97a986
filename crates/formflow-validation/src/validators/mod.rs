//! Built-in validators, one per check kind

pub mod custom;
pub mod date;
pub mod email;
pub mod field_match;
pub mod length;
pub mod literal;
pub mod pattern;
pub mod required;

pub use custom::CustomValidator;
pub use date::DateValidator;
pub use email::EmailValidator;
pub use field_match::FieldMatchValidator;
pub use length::LengthValidator;
pub use literal::LiteralValidator;
pub use pattern::PatternValidator;
pub use required::RequiredValidator;
