//! Explicit input validation.
//!
//! Each inbound payload has one validation function returning the full list
//! of field-level violations. Handlers reject with
//! [`AppError::Validation`](crate::types::AppError::Validation) when the list
//! is non-empty.

use crate::types::{FieldViolation, RecipeDraft, SignInRequest, SignUpRequest};

const USERNAME_MAX: usize = 30;
const EMAIL_MAX: usize = 50;
const PASSWORD_MAX: usize = 100;
const SIGNIN_PASSWORD_MAX: usize = 30;
const SERVING_MIN: i64 = 1;
const SERVING_MAX: i64 = 100;
const QUANTITY_MIN: f64 = 0.01;
const QUANTITY_MAX: f64 = 1000.00;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Minimal syntactic email check: one `@` separating a non-empty local part
/// from a dotted, non-empty domain, with no whitespace anywhere.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|segment| !segment.is_empty())
}

/// True when the quantity carries at most two fractional digits.
fn has_at_most_two_decimals(quantity: f64) -> bool {
    let scaled = quantity * 100.0;
    (scaled - scaled.round()).abs() < 1e-6
}

fn violation(field: &str, message: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Checks a sign-up payload: username/email/password presence, length
/// bounds, and email syntax.
pub fn validate_signup(request: &SignUpRequest) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if is_blank(&request.username) {
        violations.push(violation("username", "User name can not be empty!"));
    } else if request.username.chars().count() > USERNAME_MAX {
        violations.push(violation(
            "username",
            "User name can not be more than 30 characters!",
        ));
    }

    if is_blank(&request.email) {
        violations.push(violation("email", "Email can not be empty!"));
    } else if request.email.chars().count() > EMAIL_MAX {
        violations.push(violation(
            "email",
            "Email can not be more than 50 characters!",
        ));
    } else if !is_valid_email(&request.email) {
        violations.push(violation("email", "It should be a valid email address!"));
    }

    if is_blank(&request.password) {
        violations.push(violation("password", "Password can not be empty!"));
    } else if request.password.chars().count() > PASSWORD_MAX {
        violations.push(violation(
            "password",
            "Password can not be more than 100 characters!",
        ));
    }

    violations
}

/// Checks a sign-in payload: username/password presence and length bounds.
pub fn validate_signin(request: &SignInRequest) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if is_blank(&request.username) {
        violations.push(violation("username", "User name can not be empty!"));
    } else if request.username.chars().count() > USERNAME_MAX {
        violations.push(violation(
            "username",
            "User name can not be more than 30 characters!",
        ));
    }

    if is_blank(&request.password) {
        violations.push(violation("password", "Password can not be empty!"));
    } else if request.password.chars().count() > SIGNIN_PASSWORD_MAX {
        violations.push(violation(
            "password",
            "Password can not be more than 30 characters!",
        ));
    }

    violations
}

/// Checks a recipe draft: name/instructions presence, serving capacity and
/// ingredient quantity ranges, and the non-empty ingredient list.
pub fn validate_recipe(draft: &RecipeDraft) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if is_blank(&draft.name) {
        violations.push(violation("name", "Recipe name can not be empty!"));
    }

    if draft.serving_capacity < SERVING_MIN {
        violations.push(violation(
            "servingCapacity",
            "Recipe can be at least for 1 person!",
        ));
    } else if draft.serving_capacity > SERVING_MAX {
        violations.push(violation(
            "servingCapacity",
            "Recipe can not be for more than 100 people!",
        ));
    }

    if draft.ingredients.is_empty() {
        violations.push(violation("ingredients", "Ingredients can not be empty!"));
    }

    for (index, ingredient) in draft.ingredients.iter().enumerate() {
        if is_blank(&ingredient.name) {
            violations.push(violation(
                &format!("ingredients[{}].name", index),
                "Ingredient name can not be empty!",
            ));
        }

        let field = format!("ingredients[{}].quantity", index);
        if ingredient.quantity < QUANTITY_MIN {
            violations.push(violation(
                &field,
                "Ingredient quantity can not be lower than 0.01!",
            ));
        } else if ingredient.quantity > QUANTITY_MAX {
            violations.push(violation(
                &field,
                "Ingredient quantity can not be greater than 1000!",
            ));
        } else if !has_at_most_two_decimals(ingredient.quantity) {
            violations.push(violation(
                &field,
                "Ingredient quantity must have 2 fractions!",
            ));
        }
    }

    if is_blank(&draft.cooking_instructions) {
        violations.push(violation(
            "cookingInstructions",
            "Cooking instructions can not be empty!",
        ));
    }

    violations
}
