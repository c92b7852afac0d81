//! Application state management for the terminal storefront.
//!
//! This module wires the three screens to the domain client: it owns the
//! product list cache, the session mirror, and the form state, and applies
//! the workflow rules (gating, validation, refresh-after-write).

use crate::domain::{
    DeliveryMethod, District, DomainClient, NewAccount, NewProduct, Product, Role, Session,
    validate_product_input,
};
use std::collections::HashMap;

/// Which of the three screens is visible. Exactly one at a time;
/// switching screens never touches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Seller,
    Buyer,
}

/// How user input is interpreted on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation mode: list selection and screen shortcuts.
    Browse,
    /// A form has focus and keystrokes go into its fields.
    Form,
    /// CSV export dialog is open.
    ExportCsv,
}

/// Add-product form (seller, signed in).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub price: String,
    pub district_index: usize,
}

/// Seller account sign-up form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SellerSignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub district_index: usize,
}

/// Buyer sign-up/sign-in form. The same email/password fields serve both
/// actions, as on the original buyer screen.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BuyerForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Main application state.
///
/// Holds no authoritative business state: `products` is a cache of the last
/// fetch and `session` mirrors the provider's idea of who is signed in.
///
/// # Examples
///
/// ```
/// use pay265::application::{App, AppMode, Screen};
///
/// let app = App::default();
/// assert_eq!(app.screen, Screen::Home);
/// assert_eq!(app.mode, AppMode::Browse);
/// assert!(app.products.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Visible screen
    pub screen: Screen,
    /// Current input mode
    pub mode: AppMode,
    /// Last fetched product list, newest first
    pub products: Vec<Product>,
    /// Mirror of the provider session, refreshed after every auth call
    pub session: Option<Session>,
    /// Selected row on the home listing (zero-based)
    pub selected: usize,
    /// Chosen fulfillment method per product id
    pub methods: HashMap<u64, DeliveryMethod>,
    /// Add-product form state
    pub product_form: ProductForm,
    /// Seller sign-up form state
    pub seller_form: SellerSignupForm,
    /// Buyer sign-up/sign-in form state
    pub buyer_form: BuyerForm,
    /// Focused field index on the visible form
    pub focused_field: usize,
    /// Blocking notification; swallows the next key press
    pub notice: Option<String>,
    /// Transient status line message
    pub status_message: Option<String>,
    /// Filename buffer for the CSV export dialog
    pub filename_input: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            mode: AppMode::Browse,
            products: Vec::new(),
            session: None,
            selected: 0,
            methods: HashMap::new(),
            product_form: ProductForm::default(),
            seller_form: SellerSignupForm::default(),
            buyer_form: BuyerForm::default(),
            focused_field: 0,
            notice: None,
            status_message: None,
            filename_input: String::new(),
        }
    }
}

impl App {
    /// Startup sequence: restore a previous session if the backend has one,
    /// then perform the single mount-time product fetch. Called exactly once.
    pub fn init(&mut self, client: &mut dyn DomainClient) {
        self.session = client.session();
        self.refresh_products(client);
        self.mode = self.mode_for_screen();
    }

    /// Replaces the product cache with one fresh listing.
    ///
    /// On read failure the visible list resets to empty and the error is
    /// surfaced as a blocking notice; nothing is retried.
    pub fn refresh_products(&mut self, client: &mut dyn DomainClient) {
        match client.list_products() {
            Ok(products) => {
                self.products = products;
                if self.selected >= self.products.len() {
                    self.selected = self.products.len().saturating_sub(1);
                }
            }
            Err(error) => {
                self.products.clear();
                self.selected = 0;
                self.notice = Some(error.to_string());
            }
        }
    }

    /// Switches screens. Pure routing: no network call, form focus resets.
    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
        self.focused_field = 0;
        self.mode = self.mode_for_screen();
        self.status_message = None;
    }

    fn mode_for_screen(&self) -> AppMode {
        match self.screen {
            Screen::Home => AppMode::Browse,
            Screen::Seller => AppMode::Form,
            Screen::Buyer => {
                if self.session.is_some() {
                    AppMode::Browse
                } else {
                    AppMode::Form
                }
            }
        }
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.products.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Chosen fulfillment method for a product, defaulting to meeting in
    /// person. Owned here per product id rather than read back from the
    /// rendered control.
    pub fn method_for(&self, product_id: u64) -> DeliveryMethod {
        self.methods.get(&product_id).copied().unwrap_or_default()
    }

    /// Cycles the selected product's fulfillment method.
    pub fn cycle_method(&mut self) {
        if let Some(product) = self.selected_product() {
            let id = product.id;
            let next = self.method_for(id).next();
            self.methods.insert(id, next);
        }
    }

    /// Posts the product form.
    ///
    /// Gated client-side: with no active session the backend is never
    /// called. Validation also runs before the call. On success the form
    /// resets and the listing is refreshed wholesale.
    pub fn submit_product(&mut self, client: &mut dyn DomainClient) {
        let Some(session) = self.session.clone() else {
            self.notice = Some("Login as seller to add product".to_string());
            return;
        };
        let (title, price_mwk) =
            match validate_product_input(&self.product_form.title, &self.product_form.price) {
                Ok(cleaned) => cleaned,
                Err(error) => {
                    self.notice = Some(error.to_string());
                    return;
                }
            };
        let product = NewProduct {
            title,
            price_mwk,
            seller_name: session.user.display_name().to_string(),
            district: District::ALL[self.product_form.district_index],
        };
        match client.create_product(product) {
            Ok(_) => {
                self.product_form = ProductForm::default();
                self.focused_field = 0;
                self.status_message = Some("Product posted".to_string());
                self.refresh_products(client);
            }
            Err(error) => {
                self.notice = Some(error.to_string());
            }
        }
    }

    /// Places an order for the selected product with its chosen method.
    ///
    /// Same gating rule as posting: no session, no backend call. Duplicate
    /// submissions are not debounced; each produces an independent order.
    pub fn place_order(&mut self, client: &mut dyn DomainClient) {
        let Some(session) = self.session.clone() else {
            self.notice = Some("Please login as buyer to place order".to_string());
            return;
        };
        let Some(product) = self.selected_product().cloned() else {
            return;
        };
        let method = self.method_for(product.id);
        match client.create_order(product.id, session.user.display_name(), method) {
            Ok(_) => {
                self.notice = Some(
                    "Order placed. Please contact the seller to complete the transaction."
                        .to_string(),
                );
                self.refresh_products(client);
            }
            Err(error) => {
                self.notice = Some(error.to_string());
            }
        }
    }

    /// Registers a seller account from the seller form. Acknowledgment
    /// only: no session is established until the user verifies and logs in.
    pub fn submit_seller_signup(&mut self, client: &mut dyn DomainClient) {
        let account = NewAccount {
            name: self.seller_form.name.clone(),
            email: self.seller_form.email.clone(),
            password: self.seller_form.password.clone(),
            role: Role::Seller,
            district: Some(District::ALL[self.seller_form.district_index]),
        };
        self.submit_signup(client, account);
    }

    /// Registers a buyer account from the buyer form.
    pub fn submit_buyer_signup(&mut self, client: &mut dyn DomainClient) {
        let account = NewAccount {
            name: self.buyer_form.name.clone(),
            email: self.buyer_form.email.clone(),
            password: self.buyer_form.password.clone(),
            role: Role::Buyer,
            district: None,
        };
        self.submit_signup(client, account);
    }

    fn submit_signup(&mut self, client: &mut dyn DomainClient, account: NewAccount) {
        match client.sign_up(account) {
            Ok(()) => {
                self.notice =
                    Some("Signup email sent (verify). After verification, login.".to_string());
            }
            Err(error) => {
                self.notice = Some(error.to_string());
            }
        }
        self.session = client.session();
    }

    /// Signs in with the buyer form's email and password and refreshes the
    /// session mirror.
    pub fn submit_sign_in(&mut self, client: &mut dyn DomainClient) {
        match client.sign_in(&self.buyer_form.email, &self.buyer_form.password) {
            Ok(session) => {
                self.session = client.session();
                self.buyer_form = BuyerForm::default();
                self.focused_field = 0;
                self.mode = self.mode_for_screen();
                self.status_message = Some(format!("Signed in as {}", session.user.email));
            }
            Err(error) => {
                self.notice = Some(error.to_string());
            }
        }
    }

    /// Signs out and refreshes the session mirror.
    pub fn sign_out(&mut self, client: &mut dyn DomainClient) {
        match client.sign_out() {
            Ok(()) => {
                self.session = client.session();
                self.mode = self.mode_for_screen();
                self.status_message = Some("Signed out".to_string());
            }
            Err(error) => {
                self.notice = Some(error.to_string());
            }
        }
    }

    /// Clears the blocking notice. The key press that triggered this is
    /// swallowed.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Opens the CSV export dialog for the current listing.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "products.csv".to_string();
        self.status_message = None;
    }

    pub fn cancel_csv_export(&mut self) {
        self.mode = self.mode_for_screen();
        self.filename_input.clear();
    }

    /// Filename for CSV export, defaulting when the input is empty.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "products.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a CSV export and closes the dialog.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.mode = self.mode_for_screen();
        self.filename_input.clear();
    }

    /// Number of focusable fields on the visible form.
    pub fn field_count(&self) -> usize {
        match (self.screen, self.session.is_some()) {
            (Screen::Seller, false) => 4,
            (Screen::Seller, true) => 3,
            (Screen::Buyer, false) => 3,
            _ => 0,
        }
    }

    /// Index of the district picker on the visible form, if it has one.
    pub fn district_field(&self) -> Option<usize> {
        match (self.screen, self.session.is_some()) {
            (Screen::Seller, false) => Some(3),
            (Screen::Seller, true) => Some(2),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focused_field = (self.focused_field + count - 1) % count;
        }
    }

    /// The focused text field's buffer, if the focused field is free text.
    pub fn focused_text_field_mut(&mut self) -> Option<&mut String> {
        if self.district_field() == Some(self.focused_field) {
            return None;
        }
        match (self.screen, self.session.is_some(), self.focused_field) {
            (Screen::Seller, false, 0) => Some(&mut self.seller_form.name),
            (Screen::Seller, false, 1) => Some(&mut self.seller_form.email),
            (Screen::Seller, false, 2) => Some(&mut self.seller_form.password),
            (Screen::Seller, true, 0) => Some(&mut self.product_form.title),
            (Screen::Seller, true, 1) => Some(&mut self.product_form.price),
            (Screen::Buyer, false, 0) => Some(&mut self.buyer_form.name),
            (Screen::Buyer, false, 1) => Some(&mut self.buyer_form.email),
            (Screen::Buyer, false, 2) => Some(&mut self.buyer_form.password),
            _ => None,
        }
    }

    /// Steps the focused district picker forward or backward, wrapping.
    pub fn cycle_district(&mut self, forward: bool) {
        if self.district_field() != Some(self.focused_field) {
            return;
        }
        let index = if self.session.is_some() {
            &mut self.product_form.district_index
        } else {
            &mut self.seller_form.district_index
        };
        let len = District::ALL.len();
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }
}
