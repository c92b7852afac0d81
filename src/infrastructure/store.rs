use super::memory::MemoryBackend;
use crate::domain::{
    DeliveryMethod, DomainClient, DomainError, DomainResult, NewAccount, NewProduct, Order,
    Product, Session,
};
use std::fs;

/// JSON-file backend: `MemoryBackend` semantics persisted after every
/// mutation. The session is persisted too, so startup session restore
/// works across runs.
pub struct FileBackend {
    inner: MemoryBackend,
    path: String,
}

impl FileBackend {
    /// Opens an existing store file or starts an empty one. The file is
    /// created on the first mutation.
    pub fn open(path: &str) -> Result<FileBackend, String> {
        let inner = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str::<MemoryBackend>(&content)
                .map_err(|e| format!("Invalid store file - {}", e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryBackend::new(),
            Err(e) => return Err(e.to_string()),
        };
        Ok(FileBackend {
            inner,
            path: path.to_string(),
        })
    }

    fn persist(&self) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(&self.inner)
            .map_err(|e| DomainError::BackendRejected(format!("serialization failed: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| DomainError::BackendRejected(e.to_string()))
    }
}

impl DomainClient for FileBackend {
    fn list_products(&self) -> DomainResult<Vec<Product>> {
        self.inner.list_products()
    }

    fn create_product(&mut self, product: NewProduct) -> DomainResult<Product> {
        let row = self.inner.create_product(product)?;
        self.persist()?;
        Ok(row)
    }

    fn create_order(
        &mut self,
        product_id: u64,
        buyer_name: &str,
        method: DeliveryMethod,
    ) -> DomainResult<Order> {
        let row = self.inner.create_order(product_id, buyer_name, method)?;
        self.persist()?;
        Ok(row)
    }

    fn sign_up(&mut self, account: NewAccount) -> DomainResult<()> {
        self.inner.sign_up(account)?;
        self.persist()
    }

    fn sign_in(&mut self, email: &str, password: &str) -> DomainResult<Session> {
        let session = self.inner.sign_in(email, password)?;
        self.persist()?;
        Ok(session)
    }

    fn sign_out(&mut self) -> DomainResult<()> {
        self.inner.sign_out()?;
        self.persist()
    }

    fn session(&self) -> Option<Session> {
        self.inner.session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{District, Role};

    fn thoko() -> NewAccount {
        NewAccount {
            name: "Thoko".to_string(),
            email: "thoko@example.mw".to_string(),
            password: "secret".to_string(),
            role: Role::Buyer,
            district: None,
        }
    }

    #[test]
    fn test_store_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let path = path.to_str().unwrap();

        {
            let mut backend = FileBackend::open(path).unwrap();
            backend.sign_up(thoko()).unwrap();
            backend.sign_in("thoko@example.mw", "secret").unwrap();
            backend
                .create_product(NewProduct {
                    title: "Maize bag".to_string(),
                    price_mwk: 15000,
                    seller_name: "Thoko".to_string(),
                    district: District::Zomba,
                })
                .unwrap();
            backend
                .create_order(1, "Thoko", DeliveryMethod::Transfer)
                .unwrap();
        }

        let backend = FileBackend::open(path).unwrap();
        let products = backend.list_products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Maize bag");
        assert_eq!(products[0].price_mwk, Some(15000));

        // Session restore across runs.
        let session = backend.session().unwrap();
        assert_eq!(session.user.email, "thoko@example.mw");
    }

    #[test]
    fn test_sign_out_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let path = path.to_str().unwrap();

        {
            let mut backend = FileBackend::open(path).unwrap();
            backend.sign_up(thoko()).unwrap();
            backend.sign_in("thoko@example.mw", "secret").unwrap();
            backend.sign_out().unwrap();
        }

        let backend = FileBackend::open(path).unwrap();
        assert!(backend.session().is_none());
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.json");
        let backend = FileBackend::open(path.to_str().unwrap()).unwrap();
        assert!(backend.list_products().unwrap().is_empty());
        assert!(backend.session().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();
        let result = FileBackend::open(path.to_str().unwrap());
        assert!(result.is_err());
    }
}
