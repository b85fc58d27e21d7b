//! Session
//!
//! Explicitly owned per-session state: the cart, the signed-in user (if
//! any) and the wishlist. A session is created when a visit starts and
//! dropped when it ends; consumers receive it by reference instead of
//! reaching into ambient global state.

use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::Catalog,
    products::{Product, ProductKey},
};

/// Email accepted by the demo login stub.
pub const DEMO_EMAIL: &str = "demo@example.com";

/// Password accepted by the demo login stub.
pub const DEMO_PASSWORD: &str = "password123";

/// Display name for the demo account.
pub const DEMO_NAME: &str = "Demo User";

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors from the authentication stub.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The email/password pair is not the demo credential.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A required signup field was empty.
    #[error("All fields are required")]
    MissingField,

    /// The signup password is shorter than the minimum.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
}

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Display name
    pub name: String,

    /// Account email
    pub email: String,
}

/// Session
#[derive(Debug)]
pub struct Session<'a> {
    user: Option<User>,
    cart: Cart<'a>,
    wishlist: FxHashSet<ProductKey>,
}

impl<'a> Session<'a> {
    /// Start a new anonymous session with an empty cart in the given
    /// currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Session {
            user: None,
            cart: Cart::new(currency),
            wishlist: FxHashSet::default(),
        }
    }

    /// The session's cart.
    #[must_use]
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The session's cart, mutably.
    pub fn cart_mut(&mut self) -> &mut Cart<'a> {
        &mut self.cart
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Sign in with the demo credential.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for any pair other than
    /// the demo email and password.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }

        self.user = Some(User {
            name: DEMO_NAME.to_string(),
            email: DEMO_EMAIL.to_string(),
        });

        self.user.as_ref().ok_or(AuthError::InvalidCredentials)
    }

    /// Create an account and sign it in. Nothing is persisted; the account
    /// lives as long as the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] when any field is blank, or
    /// [`AuthError::PasswordTooShort`] below the minimum length.
    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<&User, AuthError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingField);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }

        self.user = Some(User {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        });

        self.user.as_ref().ok_or(AuthError::MissingField)
    }

    /// Sign out. The cart and wishlist are kept.
    pub fn logout(&mut self) {
        self.user = None;
    }

    /// Save a product to the wishlist.
    pub fn add_to_wishlist(&mut self, key: ProductKey) {
        self.wishlist.insert(key);
    }

    /// Remove a product from the wishlist. No-op when absent.
    pub fn remove_from_wishlist(&mut self, key: ProductKey) {
        self.wishlist.remove(&key);
    }

    /// Add the product if it is not wishlisted, remove it if it is.
    /// Returns whether the product is wishlisted afterwards.
    pub fn toggle_wishlist(&mut self, key: ProductKey) -> bool {
        if self.wishlist.remove(&key) {
            false
        } else {
            self.wishlist.insert(key);
            true
        }
    }

    /// Whether the product is on the wishlist.
    #[must_use]
    pub fn in_wishlist(&self, key: ProductKey) -> bool {
        self.wishlist.contains(&key)
    }

    /// Number of wishlisted products.
    #[must_use]
    pub fn wishlist_len(&self) -> usize {
        self.wishlist.len()
    }

    /// The wishlisted products in catalog order, as shown on the wishlist
    /// page.
    #[must_use]
    pub fn wishlist_products<'b>(
        &self,
        catalog: &'b Catalog<'a>,
    ) -> Vec<(ProductKey, &'b Product<'a>)> {
        catalog
            .iter()
            .filter(|(key, _)| self.wishlist.contains(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use slotmap::SlotMap;
    use testresult::TestResult;

    use super::*;

    fn keys(n: usize) -> Vec<ProductKey> {
        let mut map: SlotMap<ProductKey, ()> = SlotMap::with_key();

        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn new_session_is_anonymous_with_empty_cart() {
        let session = Session::new(USD);

        assert!(!session.is_logged_in());
        assert!(session.user().is_none());
        assert!(session.cart().is_empty());
        assert_eq!(session.wishlist_len(), 0);
    }

    #[test]
    fn login_accepts_only_the_demo_credential() -> TestResult {
        let mut session = Session::new(USD);

        let user = session.login(DEMO_EMAIL, DEMO_PASSWORD)?;

        assert_eq!(user.name, DEMO_NAME);
        assert!(session.is_logged_in());

        Ok(())
    }

    #[test]
    fn login_rejects_wrong_password() {
        let mut session = Session::new(USD);

        let result = session.login(DEMO_EMAIL, "letmein");

        assert_eq!(result.err(), Some(AuthError::InvalidCredentials));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn login_rejects_unknown_email() {
        let mut session = Session::new(USD);

        let result = session.login("someone@example.com", DEMO_PASSWORD);

        assert_eq!(result.err(), Some(AuthError::InvalidCredentials));
    }

    #[test]
    fn signup_signs_the_new_user_in() -> TestResult {
        let mut session = Session::new(USD);

        let user = session.signup("Ada Lovelace", "ada@example.com", "engine1843")?;

        assert_eq!(user.email, "ada@example.com");
        assert!(session.is_logged_in());

        Ok(())
    }

    #[test]
    fn signup_rejects_blank_fields() {
        let mut session = Session::new(USD);

        let result = session.signup("  ", "ada@example.com", "engine1843");

        assert_eq!(result.err(), Some(AuthError::MissingField));
    }

    #[test]
    fn signup_rejects_short_passwords() {
        let mut session = Session::new(USD);

        let result = session.signup("Ada", "ada@example.com", "short");

        assert_eq!(result.err(), Some(AuthError::PasswordTooShort));
    }

    #[test]
    fn logout_keeps_the_cart() -> TestResult {
        let ids = keys(1);
        let id = ids.first().copied().ok_or("missing key")?;
        let mut session = Session::new(USD);

        session.login(DEMO_EMAIL, DEMO_PASSWORD)?;

        let product = Product {
            name: "Desk Lamp".to_string(),
            brand: "BrightCo".to_string(),
            category: "Home".to_string(),
            price: rusty_money::Money::from_minor(24_99, USD),
            original_price: None,
            in_stock: true,
            rating: rust_decimal::Decimal::new(42, 1),
            reviews: 55,
            description: String::new(),
            images: smallvec::smallvec![],
            specifications: rustc_hash::FxHashMap::default(),
        };

        session.cart_mut().add_item(id, &product, 2)?;

        session.logout();

        assert!(!session.is_logged_in());
        assert_eq!(session.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn wishlist_toggle_roundtrips() {
        let ids = keys(1);
        let id = ids.first().copied().unwrap_or_default();
        let mut session = Session::new(USD);

        assert!(!session.in_wishlist(id));
        assert!(session.toggle_wishlist(id));
        assert!(session.in_wishlist(id));
        assert!(!session.toggle_wishlist(id));
        assert!(!session.in_wishlist(id));
    }

    #[test]
    fn wishlist_remove_is_a_no_op_when_absent() {
        let ids = keys(1);
        let id = ids.first().copied().unwrap_or_default();
        let mut session = Session::new(USD);

        session.remove_from_wishlist(id);

        assert_eq!(session.wishlist_len(), 0);
    }
}
