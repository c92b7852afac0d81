use crate::domain::{
    DeliveryMethod, District, DomainClient, DomainError, DomainResult, NewAccount, NewProduct,
    Order, OrderStatus, Product, Role, Session, UserProfile,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: RemoteUser,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    email: String,
    #[serde(default)]
    user_metadata: RemoteMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RemoteMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    district: Option<District>,
}

fn profile_from_user(user: RemoteUser) -> UserProfile {
    UserProfile {
        email: user.email,
        name: user.user_metadata.name,
        role: user.user_metadata.role.unwrap_or(Role::Buyer),
        district: user.user_metadata.district,
    }
}

/// Backend speaking the hosted provider's REST contract: `/rest/v1` for the
/// two collections, `/auth/v1` for accounts and sessions. All calls are
/// blocking on the caller's thread.
pub struct RemoteBackend {
    http: reqwest::blocking::Client,
    url: String,
    api_key: String,
    access_token: Option<String>,
    session: Option<Session>,
}

impl RemoteBackend {
    pub fn new(url: &str, api_key: &str) -> Result<RemoteBackend, String> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| e.to_string())?;
        Ok(RemoteBackend {
            http,
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: None,
            session: None,
        })
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }

    fn insert_row<T: serde::de::DeserializeOwned>(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> DomainResult<T> {
        let response = self
            .http
            .post(format!("{}/rest/v1/{}", self.url, collection))
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
            .header("Prefer", "return=representation")
            .json(&json!([body]))
            .send()
            .map_err(|e| DomainError::BackendRejected(e.to_string()))?;
        if !response.status().is_success() {
            let message = response.text().unwrap_or_default();
            return Err(DomainError::BackendRejected(message));
        }
        let mut rows: Vec<T> = response
            .json()
            .map_err(|e| DomainError::BackendRejected(e.to_string()))?;
        if rows.is_empty() {
            return Err(DomainError::BackendRejected(
                "insert returned no row".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }
}

impl DomainClient for RemoteBackend {
    fn list_products(&self) -> DomainResult<Vec<Product>> {
        let response = self
            .http
            .get(format!(
                "{}/rest/v1/products?select=*&order=id.desc",
                self.url
            ))
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
            .send()
            .map_err(|e| DomainError::BackendUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            let message = response.text().unwrap_or_default();
            return Err(DomainError::BackendUnavailable(message));
        }
        response
            .json()
            .map_err(|e| DomainError::BackendUnavailable(e.to_string()))
    }

    fn create_product(&mut self, product: NewProduct) -> DomainResult<Product> {
        self.insert_row(
            "products",
            json!({
                "title": product.title,
                "price_mwk": product.price_mwk,
                "seller_name": product.seller_name,
                "district": product.district.label(),
            }),
        )
    }

    fn create_order(
        &mut self,
        product_id: u64,
        buyer_name: &str,
        method: DeliveryMethod,
    ) -> DomainResult<Order> {
        self.insert_row(
            "orders",
            json!({
                "product_id": product_id,
                "buyer_name": buyer_name,
                "method": method,
                "status": OrderStatus::Pending,
            }),
        )
    }

    fn sign_up(&mut self, account: NewAccount) -> DomainResult<()> {
        let mut metadata = json!({
            "name": account.name,
            "role": account.role,
        });
        if let Some(district) = account.district {
            metadata["district"] = json!(district.label());
        }
        let response = self
            .http
            .post(format!("{}/auth/v1/signup", self.url))
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": account.email,
                "password": account.password,
                "data": metadata,
            }))
            .send()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        if !response.status().is_success() {
            let message = response.text().unwrap_or_default();
            return Err(DomainError::Auth(message));
        }
        // No session: the provider's verification message goes out-of-band.
        Ok(())
    }

    fn sign_in(&mut self, email: &str, password: &str) -> DomainResult<Session> {
        let response = self
            .http
            .post(format!("{}/auth/v1/token?grant_type=password", self.url))
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        if !response.status().is_success() {
            let message = response.text().unwrap_or_default();
            return Err(DomainError::Auth(message));
        }
        let token: TokenResponse = response
            .json()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        let session = Session {
            user: profile_from_user(token.user),
        };
        self.access_token = Some(token.access_token);
        self.session = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&mut self) -> DomainResult<()> {
        if let Some(token) = self.access_token.take() {
            // Best effort: the local session is invalidated regardless.
            let _ = self
                .http
                .post(format!("{}/auth/v1/logout", self.url))
                .header("apikey", &self.api_key)
                .bearer_auth(token)
                .send();
        }
        self.session = None;
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        self.session.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_maps_to_profile() {
        let json = r#"{
            "access_token": "abc123",
            "user": {
                "email": "grace@example.mw",
                "user_metadata": {"name": "Grace", "role": "seller", "district": "Zomba"}
            }
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        let profile = profile_from_user(token.user);
        assert_eq!(profile.name, "Grace");
        assert_eq!(profile.role, Role::Seller);
        assert_eq!(profile.district, Some(District::Zomba));
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let json = r#"{"access_token": "abc123", "user": {"email": "x@example.mw"}}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        let profile = profile_from_user(token.user);
        assert_eq!(profile.email, "x@example.mw");
        assert_eq!(profile.name, "");
        assert_eq!(profile.role, Role::Buyer);
        assert_eq!(profile.district, None);
        assert_eq!(profile.display_name(), "x@example.mw");
    }

    #[test]
    fn test_url_trailing_slash_trimmed() {
        let backend = RemoteBackend::new("https://demo.example.co/", "anon").unwrap();
        assert_eq!(backend.url, "https://demo.example.co");
    }
}
