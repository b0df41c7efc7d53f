use crate::config::OrderDefaults;
use crate::domain::authorization::{AuthorizationRequest, BillingAddress};
use crate::error::ValidationError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Form body of `POST /order`. Everything except `token` falls back to the
/// configured [`OrderDefaults`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub token: Option<String>,
    pub merchant_order_id: Option<String>,
    pub currency: Option<String>,
    pub total: Option<String>,
    pub name: Option<String>,
    pub addr_line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

pub fn build_authorization_request(
    form: OrderForm,
    defaults: &OrderDefaults,
) -> Result<AuthorizationRequest, ValidationError> {
    let token = present(form.token).ok_or(ValidationError::MissingToken)?;

    let raw_total = present(form.total).unwrap_or_else(|| defaults.total.clone());
    let total = validate_total(&raw_total)?.to_string();

    let currency = present(form.currency)
        .unwrap_or_else(|| defaults.currency.clone())
        .to_ascii_uppercase();
    validate_currency(&currency)?;

    let merchant_order_id =
        present(form.merchant_order_id).unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let d = &defaults.billing_addr;
    let billing_addr = BillingAddress {
        name: present(form.name).unwrap_or_else(|| d.name.clone()),
        addr_line1: present(form.addr_line1).unwrap_or_else(|| d.addr_line1.clone()),
        city: present(form.city).unwrap_or_else(|| d.city.clone()),
        state: present(form.state).unwrap_or_else(|| d.state.clone()),
        zip_code: present(form.zip_code).unwrap_or_else(|| d.zip_code.clone()),
        country: present(form.country).unwrap_or_else(|| d.country.clone()),
        email: present(form.email).unwrap_or_else(|| d.email.clone()),
        phone_number: present(form.phone_number).unwrap_or_else(|| d.phone_number.clone()),
    };
    if billing_addr.name.trim().is_empty() {
        return Err(ValidationError::EmptyField("name"));
    }

    Ok(AuthorizationRequest {
        merchant_order_id,
        token,
        currency,
        total,
        billing_addr,
    })
}

/// Accepts plain `digits[.digits]` only; no sign, separators or exponent.
pub fn validate_total(total: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidTotal(total.to_string());
    let trimmed = total.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (trimmed, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.map_or(true, all_digits) {
        return Err(invalid());
    }

    Decimal::from_str(trimmed).map_err(|_| invalid())
}

fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCurrency(currency.to_string()))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
