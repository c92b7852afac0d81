use crate::domain::{
    DeliveryMethod, DomainClient, DomainError, DomainResult, NewAccount, NewProduct, Order,
    OrderStatus, Product, Session, UserProfile,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    // Demo store: the password is kept in the clear.
    password: String,
    profile: UserProfile,
}

/// Reference backend holding everything in memory.
///
/// Stands in for the hosted provider in tests and local demos. Writes
/// require a session, emulating the provider's row security; reads come
/// back newest first like the real store. Sign-up is auto-verified since
/// no out-of-band email channel exists locally.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoryBackend {
    products: Vec<Product>,
    orders: Vec<Order>,
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    next_product_id: u64,
    next_order_id: u64,
    #[serde(skip)]
    unavailable: bool,
    #[serde(skip)]
    list_calls: Cell<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a transport failure: while set, reads fail with
    /// `BackendUnavailable`.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// All orders recorded so far, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of `list_products` calls issued against this backend.
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }
}

impl DomainClient for MemoryBackend {
    fn list_products(&self) -> DomainResult<Vec<Product>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.unavailable {
            return Err(DomainError::BackendUnavailable("store offline".to_string()));
        }
        let mut products = self.products.clone();
        products.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(products)
    }

    fn create_product(&mut self, product: NewProduct) -> DomainResult<Product> {
        if self.session.is_none() {
            return Err(DomainError::BackendRejected("no active session".to_string()));
        }
        self.next_product_id += 1;
        let row = Product {
            id: self.next_product_id,
            title: product.title,
            price_mwk: Some(product.price_mwk),
            seller_name: product.seller_name,
            district: product.district,
            status: None,
        };
        self.products.push(row.clone());
        Ok(row)
    }

    fn create_order(
        &mut self,
        product_id: u64,
        buyer_name: &str,
        method: DeliveryMethod,
    ) -> DomainResult<Order> {
        if self.session.is_none() {
            return Err(DomainError::BackendRejected("no active session".to_string()));
        }
        self.next_order_id += 1;
        let row = Order {
            id: self.next_order_id,
            product_id,
            buyer_name: buyer_name.to_string(),
            method,
            status: OrderStatus::Pending,
        };
        self.orders.push(row.clone());
        Ok(row)
    }

    fn sign_up(&mut self, account: NewAccount) -> DomainResult<()> {
        if self.accounts.contains_key(&account.email) {
            return Err(DomainError::Auth("user already registered".to_string()));
        }
        let profile = UserProfile {
            email: account.email.clone(),
            name: account.name,
            role: account.role,
            district: account.district,
        };
        self.accounts.insert(
            account.email,
            Account {
                password: account.password,
                profile,
            },
        );
        Ok(())
    }

    fn sign_in(&mut self, email: &str, password: &str) -> DomainResult<Session> {
        let account = self
            .accounts
            .get(email)
            .filter(|a| a.password == password)
            .ok_or_else(|| DomainError::Auth("invalid login credentials".to_string()))?;
        let session = Session {
            user: account.profile.clone(),
        };
        self.session = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&mut self) -> DomainResult<()> {
        self.session = None;
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        self.session.clone()
    }
}
