//! User-facing messages of the registration form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the form talks to the user in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Uk,
}

impl Locale {
    pub fn catalog(&self) -> MessageCatalog {
        match self {
            Locale::En => MessageCatalog::english(),
            Locale::Uk => MessageCatalog::ukrainian(),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "uk" | "ua" | "ukrainian" => Ok(Locale::Uk),
            other => Err(format!("unsupported locale '{}', expected en or uk", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Uk => write!(f, "uk"),
        }
    }
}

/// Every message the registration form can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    pub first_name_required: String,
    pub first_name_too_short: String,
    pub first_name_too_long: String,
    pub last_name_required: String,
    pub last_name_too_short: String,
    pub last_name_too_long: String,
    pub email_required: String,
    pub email_invalid: String,
    pub password_required: String,
    pub password_too_short: String,
    pub password_complexity: String,
    pub confirm_password_required: String,
    pub passwords_mismatch: String,
    pub phone_required: String,
    pub phone_invalid: String,
    pub birth_date_required: String,
    pub birth_date_invalid: String,
    pub birth_date_in_future: String,
    pub terms_required: String,
    pub success_title: String,
    /// Template with `{first_name}` and `{last_name}` placeholders
    pub success_detail: String,
}

impl MessageCatalog {
    pub fn english() -> Self {
        Self {
            first_name_required: "First name is required".into(),
            first_name_too_short: "First name must be at least 2 characters".into(),
            first_name_too_long: "First name cannot exceed 50 characters".into(),
            last_name_required: "Last name is required".into(),
            last_name_too_short: "Last name must be at least 2 characters".into(),
            last_name_too_long: "Last name cannot exceed 50 characters".into(),
            email_required: "Email is required".into(),
            email_invalid: "Invalid email format".into(),
            password_required: "Password is required".into(),
            password_too_short: "Password must be at least 8 characters".into(),
            password_complexity:
                "Password must contain at least one uppercase letter, one lowercase letter and one digit"
                    .into(),
            confirm_password_required: "Password confirmation is required".into(),
            passwords_mismatch: "Passwords do not match".into(),
            phone_required: "Phone number is required".into(),
            phone_invalid: "Invalid phone number format".into(),
            birth_date_required: "Birth date is required".into(),
            birth_date_invalid: "Birth date is not a valid date".into(),
            birth_date_in_future: "Birth date cannot be in the future".into(),
            terms_required: "You must accept the terms of use".into(),
            success_title: "Form submitted successfully!".into(),
            success_detail: "User data for {first_name} {last_name} saved".into(),
        }
    }

    pub fn ukrainian() -> Self {
        Self {
            first_name_required: "Ім'я є обов'язковим".into(),
            first_name_too_short: "Ім'я повинно містити щонайменше 2 символи".into(),
            first_name_too_long: "Ім'я не може перевищувати 50 символів".into(),
            last_name_required: "Прізвище є обов'язковим".into(),
            last_name_too_short: "Прізвище повинно містити щонайменше 2 символи".into(),
            last_name_too_long: "Прізвище не може перевищувати 50 символів".into(),
            email_required: "Електронна пошта є обов'язковою".into(),
            email_invalid: "Невірний формат електронної пошти".into(),
            password_required: "Пароль є обов'язковим".into(),
            password_too_short: "Пароль повинен містити щонайменше 8 символів".into(),
            password_complexity:
                "Пароль повинен містити принаймні одну велику літеру, одну малу літеру та одну цифру"
                    .into(),
            confirm_password_required: "Підтвердження паролю є обов'язковим".into(),
            passwords_mismatch: "Паролі не співпадають".into(),
            phone_required: "Номер телефону є обов'язковим".into(),
            phone_invalid: "Невірний формат номера телефону".into(),
            birth_date_required: "Дата народження є обов'язковою".into(),
            birth_date_invalid: "Невірний формат дати народження".into(),
            birth_date_in_future: "Дата народження не може бути в майбутньому".into(),
            terms_required: "Необхідно прийняти умови користування".into(),
            success_title: "Форму успішно відправлено!".into(),
            success_detail: "Дані користувача {first_name} {last_name} збережено".into(),
        }
    }

    /// Confirmation banner shown after a successful submission
    pub fn success_notice(&self, first_name: &str, last_name: &str) -> String {
        let detail = self
            .success_detail
            .replace("{first_name}", first_name)
            .replace("{last_name}", last_name);
        format!("{} {}", self.success_title, detail)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}
