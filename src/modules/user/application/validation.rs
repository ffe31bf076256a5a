// src/modules/user/application/validation.rs

use chrono::{NaiveDate, Utc};
use email_address::EmailAddress;

use crate::modules::user::application::domain::Gender;
use crate::modules::user::application::ports::incoming::use_cases::UpdateProfileInput;
use crate::modules::user::application::ports::outgoing::user_repository::PatchProfileData;
use crate::shared::patch::PatchField;
use crate::shared::validation::FieldErrors;

pub const NAME_MAX: usize = 255;
pub const EMAIL_MAX: usize = 255;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

pub const EMAIL_TAKEN: &str = "The email has already been taken.";

const PHONE_MAX: usize = 20;
const BIO_MAX: usize = 1000;
const WEBSITE_MAX: usize = 255;
const ADDRESS_MAX: usize = 255;
const CITY_MAX: usize = 100;
const STATE_MAX: usize = 100;
const POSTAL_CODE_MAX: usize = 20;
const TIMEZONE_MAX: usize = 64;
const LOCALE_MAX: usize = 10;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", label(field))
}

fn too_long_message(field: &str, max: usize) -> String {
    format!(
        "The {} may not be greater than {} characters.",
        label(field),
        max
    )
}

/// `profile.birth_date` -> `birth date`
fn label(field: &str) -> String {
    field.rsplit('.').next().unwrap_or(field).replace('_', " ")
}

//
// ──────────────────────────────────────────────────────────
// User fields
// ──────────────────────────────────────────────────────────
//

/// Returns the trimmed name when it passes.
pub fn check_name(errors: &mut FieldErrors, name: Option<&str>) -> Option<String> {
    let name = name.map(str::trim).unwrap_or_default();

    if name.is_empty() {
        errors.add("name", required_message("name"));
        return None;
    }
    if name.chars().count() > NAME_MAX {
        errors.add("name", too_long_message("name", NAME_MAX));
        return None;
    }

    Some(name.to_string())
}

/// Returns the normalized email when it passes. Uniqueness is checked by
/// the caller against storage.
pub fn check_email(errors: &mut FieldErrors, email: Option<&str>) -> Option<String> {
    let email = normalize_email(email.unwrap_or_default());

    if email.is_empty() {
        errors.add("email", required_message("email"));
        return None;
    }
    if email.chars().count() > EMAIL_MAX {
        errors.add("email", too_long_message("email", EMAIL_MAX));
        return None;
    }
    if !EmailAddress::is_valid(&email) {
        errors.add("email", "The email must be a valid email address.");
        return None;
    }

    Some(email)
}

pub fn check_password(
    errors: &mut FieldErrors,
    password: Option<&str>,
    confirmation: Option<&str>,
) -> Option<String> {
    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => {
            errors.add("password", required_message("password"));
            return None;
        }
    };

    let length = password.chars().count();
    let mut valid = true;

    if length < PASSWORD_MIN {
        errors.add(
            "password",
            format!("The password must be at least {} characters.", PASSWORD_MIN),
        );
        valid = false;
    } else if length > PASSWORD_MAX {
        errors.add("password", too_long_message("password", PASSWORD_MAX));
        valid = false;
    }

    if confirmation != Some(password) {
        errors.add("password", "The password confirmation does not match.");
        valid = false;
    }

    valid.then(|| password.to_string())
}

//
// ──────────────────────────────────────────────────────────
// Profile fields
// ──────────────────────────────────────────────────────────
//

fn bounded_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: PatchField<String>,
    max: usize,
) -> PatchField<String> {
    match value {
        PatchField::Value(v) => {
            let v = v.trim().to_string();
            if v.chars().count() > max {
                errors.add(field, too_long_message(field, max));
                PatchField::Unset
            } else if v.is_empty() {
                PatchField::Null
            } else {
                PatchField::Value(v)
            }
        }
        other => other,
    }
}

/// For columns that have a default and cannot be cleared.
fn not_null<T>(errors: &mut FieldErrors, field: &'static str, value: PatchField<T>) -> Option<T> {
    match value {
        PatchField::Unset => None,
        PatchField::Null => {
            errors.add(field, format!("The {} field cannot be null.", label(field)));
            None
        }
        PatchField::Value(v) => Some(v),
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Validates a nested profile payload. Error keys are prefixed with
/// `profile.`.
pub fn check_profile(errors: &mut FieldErrors, input: UpdateProfileInput) -> PatchProfileData {
    let phone = bounded_text(errors, "profile.phone", input.phone, PHONE_MAX);
    let bio = bounded_text(errors, "profile.bio", input.bio, BIO_MAX);
    let address_line1 = bounded_text(
        errors,
        "profile.address_line1",
        input.address_line1,
        ADDRESS_MAX,
    );
    let address_line2 = bounded_text(
        errors,
        "profile.address_line2",
        input.address_line2,
        ADDRESS_MAX,
    );
    let city = bounded_text(errors, "profile.city", input.city, CITY_MAX);
    let state = bounded_text(errors, "profile.state", input.state, STATE_MAX);
    let postal_code = bounded_text(
        errors,
        "profile.postal_code",
        input.postal_code,
        POSTAL_CODE_MAX,
    );

    let website = match bounded_text(errors, "profile.website", input.website, WEBSITE_MAX) {
        PatchField::Value(url) if !is_http_url(&url) => {
            errors.add("profile.website", "The website must be a valid URL.");
            PatchField::Unset
        }
        other => other,
    };

    let country_code = match bounded_text(errors, "profile.country_code", input.country_code, 2) {
        PatchField::Value(code) => {
            let code = code.to_ascii_uppercase();
            if code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase()) {
                PatchField::Value(code)
            } else {
                errors.add(
                    "profile.country_code",
                    "The country code must be a two-letter ISO 3166 code.",
                );
                PatchField::Unset
            }
        }
        other => other,
    };

    let gender = match input.gender.try_map(|g| g.trim().parse::<Gender>()) {
        Ok(gender) => gender,
        Err(_) => {
            errors.add("profile.gender", "The selected gender is invalid.");
            PatchField::Unset
        }
    };

    let today = Utc::now().date_naive();
    let birth_date = match input
        .birth_date
        .try_map(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d"))
    {
        Ok(PatchField::Value(date)) if date >= today => {
            errors.add(
                "profile.birth_date",
                "The birth date must be a date before today.",
            );
            PatchField::Unset
        }
        Ok(date) => date,
        Err(_) => {
            errors.add(
                "profile.birth_date",
                "The birth date must be a valid date (YYYY-MM-DD).",
            );
            PatchField::Unset
        }
    };

    let preferences = match not_null(errors, "profile.preferences", input.preferences) {
        Some(prefs) if !prefs.is_object() => {
            errors.add("profile.preferences", "The preferences must be an object.");
            None
        }
        other => other,
    };

    let is_public = not_null(errors, "profile.is_public", input.is_public);
    let marketing_consent = not_null(errors, "profile.marketing_consent", input.marketing_consent);

    let timezone = not_empty_bounded(errors, "profile.timezone", input.timezone, TIMEZONE_MAX);
    let locale = not_empty_bounded(errors, "profile.locale", input.locale, LOCALE_MAX);

    PatchProfileData {
        phone,
        birth_date,
        gender,
        bio,
        website,
        address_line1,
        address_line2,
        city,
        state,
        postal_code,
        country_code,
        preferences,
        is_public,
        marketing_consent,
        timezone,
        locale,
    }
}

fn not_empty_bounded(
    errors: &mut FieldErrors,
    field: &'static str,
    value: PatchField<String>,
    max: usize,
) -> Option<String> {
    let value = not_null(errors, field, value)?;
    let value = value.trim();

    if value.is_empty() {
        errors.add(field, required_message(field));
        None
    } else if value.chars().count() > max {
        errors.add(field, too_long_message(field, max));
        None
    } else {
        Some(value.to_string())
    }
}
