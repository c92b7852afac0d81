use super::errors::DomainResult;
use super::models::{DeliveryMethod, NewAccount, NewProduct, Order, Product, Session};

/// Capability interface over the storefront's backend.
///
/// Everything vendor-specific (persistence, auth, session lifecycle) lives
/// behind this trait. The application layer receives a `&mut dyn DomainClient`
/// so the in-memory backend can stand in for the real provider in tests.
pub trait DomainClient {
    /// Current listing, newest first (descending id).
    ///
    /// Fails with `BackendUnavailable` on transport failure; the caller is
    /// expected to show the error and reset the visible list to empty.
    fn list_products(&self) -> DomainResult<Vec<Product>>;

    /// Inserts a product for the signed-in seller. The caller validates
    /// title and price before constructing the `NewProduct`.
    fn create_product(&mut self, product: NewProduct) -> DomainResult<Product>;

    /// Inserts an order with status `pending`.
    fn create_order(
        &mut self,
        product_id: u64,
        buyer_name: &str,
        method: DeliveryMethod,
    ) -> DomainResult<Order>;

    /// Registers an account. No session is established; the provider's
    /// verification message goes out-of-band.
    fn sign_up(&mut self, account: NewAccount) -> DomainResult<()>;

    fn sign_in(&mut self, email: &str, password: &str) -> DomainResult<Session>;

    /// Invalidates the local session reference.
    fn sign_out(&mut self) -> DomainResult<()>;

    /// The current session, if any. Consulted at startup to restore a
    /// previously authenticated state and after every auth operation to
    /// keep the local mirror in sync.
    fn session(&self) -> Option<Session>;
}
