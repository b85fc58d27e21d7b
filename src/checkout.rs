//! Checkout
//!
//! The checkout form model and order placement. Placement gates on cart
//! contents and login state, validates the form, derives fresh totals and
//! clears the cart. The cart engine itself stays unaware of
//! authentication; the gate lives here, where the page performed it.

use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::{cart::CartLine, pricing::OrderTotals, session::Session};

/// Length of a generated order confirmation id.
const CONFIRMATION_ID_LENGTH: usize = 9;

/// Errors surfaced by checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Checkout was attempted without a signed-in user.
    #[error("Please login to proceed with checkout")]
    LoginRequired,

    /// A required form field was blank (field label).
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is not plausibly an email.
    #[error("Email address is not valid")]
    InvalidEmail,

    /// The card number is not exactly 16 digits.
    #[error("Card number must be 16 digits")]
    InvalidCardNumber,

    /// The card expiry is not in MM/YY shape.
    #[error("Card expiry must be in MM/YY format")]
    InvalidCardExpiry,

    /// The card CVC is not exactly 3 digits.
    #[error("Card CVC must be 3 digits")]
    InvalidCardCvc,
}

/// Shipping destination country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Country {
    /// United States (the form default)
    #[default]
    Usa,

    /// Canada
    Canada,

    /// United Kingdom
    Uk,

    /// Australia
    Australia,
}

impl Country {
    /// Display label, matching the storefront's country selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::Canada => "Canada",
            Country::Uk => "UK",
            Country::Australia => "Australia",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping address fields.
#[derive(Debug, Clone, Default)]
pub struct ShippingAddress {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Contact email
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// Street address
    pub street: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// ZIP or postal code
    pub zip_code: String,

    /// Destination country
    pub country: Country,
}

/// How the order is paid.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    /// Credit or debit card
    Card {
        /// 16-digit card number
        number: String,

        /// Expiry in MM/YY shape
        expiry: String,

        /// 3-digit security code
        cvc: String,
    },

    /// PayPal (no further details collected)
    PayPal,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card {
            number: String::new(),
            expiry: String::new(),
            cvc: String::new(),
        }
    }
}

/// The complete checkout form.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    /// Shipping address section
    pub shipping: ShippingAddress,

    /// Payment method section
    pub payment: PaymentMethod,
}

impl CheckoutForm {
    /// Validate the form the way the storefront's inputs constrained it:
    /// every address field required, card number 16 digits, expiry MM/YY,
    /// CVC 3 digits. The expiry check is shape-only; month semantics were
    /// never enforced.
    ///
    /// # Errors
    ///
    /// Returns the first failing constraint as a [`CheckoutError`].
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let address = &self.shipping;

        let required = [
            (address.first_name.as_str(), "First name"),
            (address.last_name.as_str(), "Last name"),
            (address.email.as_str(), "Email address"),
            (address.phone.as_str(), "Phone number"),
            (address.street.as_str(), "Street address"),
            (address.city.as_str(), "City"),
            (address.state.as_str(), "State"),
            (address.zip_code.as_str(), "ZIP code"),
        ];

        for (value, label) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(label));
            }
        }

        if !address.email.contains('@') {
            return Err(CheckoutError::InvalidEmail);
        }

        if let PaymentMethod::Card {
            number,
            expiry,
            cvc,
        } = &self.payment
        {
            if !is_digits(number, 16) {
                return Err(CheckoutError::InvalidCardNumber);
            }

            if !is_expiry_shape(expiry) {
                return Err(CheckoutError::InvalidCardExpiry);
            }

            if !is_digits(cvc, 3) {
                return Err(CheckoutError::InvalidCardCvc);
            }
        }

        Ok(())
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.chars().count() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn is_expiry_shape(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();

    matches!(
        chars.as_slice(),
        [m1, m2, '/', y1, y2]
            if m1.is_ascii_digit()
                && m2.is_ascii_digit()
                && y1.is_ascii_digit()
                && y2.is_ascii_digit()
    )
}

/// A successfully placed order.
#[derive(Debug, Clone)]
pub struct PlacedOrder<'a> {
    /// Generated confirmation id, 9 uppercase alphanumerics
    pub id: String,

    /// Snapshot of the cart lines at placement time
    pub lines: Vec<CartLine<'a>>,

    /// Totals charged, derived fresh at placement time
    pub totals: OrderTotals<'a>,
}

impl PlacedOrder<'_> {
    /// Total units across the order.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity()))
    }
}

/// Place the order for the session's cart.
///
/// Gates in page order: an empty cart, then a missing login, then form
/// validation. On success the totals are computed from the live cart
/// state, the lines are snapshotted, and the cart is cleared. Failed
/// placement leaves the cart untouched.
///
/// # Errors
///
/// Returns a [`CheckoutError`] describing the first failed gate.
pub fn place_order<'a>(
    session: &mut Session<'a>,
    form: &CheckoutForm,
) -> Result<PlacedOrder<'a>, CheckoutError> {
    if session.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if !session.is_logged_in() {
        return Err(CheckoutError::LoginRequired);
    }

    form.validate()?;

    let totals = OrderTotals::for_cart(session.cart());
    let lines: Vec<CartLine<'a>> = session.cart().iter().cloned().collect();

    session.cart_mut().clear();

    Ok(PlacedOrder {
        id: confirmation_id(),
        lines,
        totals,
    })
}

/// Random order confirmation id in the storefront's shape: uppercase
/// letters and digits.
fn confirmation_id() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let mut rng = rand::thread_rng();

    (0..CONFIRMATION_ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());

            CHARSET.get(idx).copied().unwrap_or(b'0') as char
        })
        .collect()
}
