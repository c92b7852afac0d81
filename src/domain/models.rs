use serde::{Deserialize, Serialize};

/// The 28 administrative districts of Malawi.
///
/// Sellers and products always carry one of these; the selection controls
/// can only produce members of this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum District {
    Balaka,
    Blantyre,
    Chikwawa,
    Chiradzulu,
    Chitipa,
    Dedza,
    Dowa,
    Karonga,
    Kasungu,
    Likoma,
    Lilongwe,
    Machinga,
    Mangochi,
    Mchinji,
    Mulanje,
    Mwanza,
    Mzimba,
    Neno,
    #[serde(rename = "Nkhata Bay")]
    NkhataBay,
    Nkhotakota,
    Nsanje,
    Ntcheu,
    Ntchisi,
    Phalombe,
    Rumphi,
    Salima,
    Thyolo,
    Zomba,
}

impl District {
    pub const ALL: [District; 28] = [
        District::Balaka,
        District::Blantyre,
        District::Chikwawa,
        District::Chiradzulu,
        District::Chitipa,
        District::Dedza,
        District::Dowa,
        District::Karonga,
        District::Kasungu,
        District::Likoma,
        District::Lilongwe,
        District::Machinga,
        District::Mangochi,
        District::Mchinji,
        District::Mulanje,
        District::Mwanza,
        District::Mzimba,
        District::Neno,
        District::NkhataBay,
        District::Nkhotakota,
        District::Nsanje,
        District::Ntcheu,
        District::Ntchisi,
        District::Phalombe,
        District::Rumphi,
        District::Salima,
        District::Thyolo,
        District::Zomba,
    ];

    pub fn label(self) -> &'static str {
        match self {
            District::Balaka => "Balaka",
            District::Blantyre => "Blantyre",
            District::Chikwawa => "Chikwawa",
            District::Chiradzulu => "Chiradzulu",
            District::Chitipa => "Chitipa",
            District::Dedza => "Dedza",
            District::Dowa => "Dowa",
            District::Karonga => "Karonga",
            District::Kasungu => "Kasungu",
            District::Likoma => "Likoma",
            District::Lilongwe => "Lilongwe",
            District::Machinga => "Machinga",
            District::Mangochi => "Mangochi",
            District::Mchinji => "Mchinji",
            District::Mulanje => "Mulanje",
            District::Mwanza => "Mwanza",
            District::Mzimba => "Mzimba",
            District::Neno => "Neno",
            District::NkhataBay => "Nkhata Bay",
            District::Nkhotakota => "Nkhotakota",
            District::Nsanje => "Nsanje",
            District::Ntcheu => "Ntcheu",
            District::Ntchisi => "Ntchisi",
            District::Phalombe => "Phalombe",
            District::Rumphi => "Rumphi",
            District::Salima => "Salima",
            District::Thyolo => "Thyolo",
            District::Zomba => "Zomba",
        }
    }

    pub fn from_label(label: &str) -> Option<District> {
        District::ALL.iter().copied().find(|d| d.label() == label)
    }

    /// Index into `ALL`, used by the district picker controls.
    pub fn index(self) -> usize {
        District::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Declared account role. Advisory only: the client never checks that the
/// acting role matches the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seller,
    Buyer,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Seller => "seller",
            Role::Buyer => "buyer",
        }
    }
}

/// How the buyer wants to receive the goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Meet,
    Transfer,
    Delivery,
}

impl DeliveryMethod {
    pub fn label(self) -> &'static str {
        match self {
            DeliveryMethod::Meet => "Meet in person",
            DeliveryMethod::Transfer => "Via transaction",
            DeliveryMethod::Delivery => "Seller sends",
        }
    }

    /// Next method in display order, wrapping around.
    pub fn next(self) -> DeliveryMethod {
        match self {
            DeliveryMethod::Meet => DeliveryMethod::Transfer,
            DeliveryMethod::Transfer => DeliveryMethod::Delivery,
            DeliveryMethod::Delivery => DeliveryMethod::Meet,
        }
    }
}

impl Default for DeliveryMethod {
    fn default() -> Self {
        DeliveryMethod::Meet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Available,
}

impl ProductStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProductStatus::Available => "available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
}

/// A listed product as the store reports it.
///
/// `price_mwk` and `status` may be absent in stored rows; display treats a
/// missing price as zero and a missing status as available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub price_mwk: Option<u64>,
    pub seller_name: String,
    pub district: District,
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

impl Product {
    pub fn status(&self) -> ProductStatus {
        self.status.unwrap_or(ProductStatus::Available)
    }
}

/// A placed order. Immutable once created; status never leaves `pending`
/// in this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub product_id: u64,
    pub buyer_name: String,
    pub method: DeliveryMethod,
    pub status: OrderStatus,
}

/// Profile metadata carried by the auth provider's user object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub district: Option<District>,
}

impl UserProfile {
    /// Display name shown on products and orders; falls back to the email
    /// when the profile name is empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// The live authenticated identity, mirrored locally from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
}

/// Validated input for posting a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price_mwk: u64,
    pub seller_name: String,
    pub district: District,
}

/// Input for creating an account. The password goes to the auth provider
/// and is never mirrored locally.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub district: Option<District>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_district_set_is_exhaustive() {
        assert_eq!(District::ALL.len(), 28);
        for (i, d) in District::ALL.iter().enumerate() {
            assert_eq!(District::from_label(d.label()), Some(*d));
            assert_eq!(d.index(), i);
        }
        assert_eq!(District::from_label("Harare"), None);
    }

    #[test]
    fn test_district_serde_uses_labels() {
        let json = serde_json::to_string(&District::NkhataBay).unwrap();
        assert_eq!(json, "\"Nkhata Bay\"");
        let back: District = serde_json::from_str(&json).unwrap();
        assert_eq!(back, District::NkhataBay);
    }

    #[test]
    fn test_delivery_method_cycle_wraps() {
        let m = DeliveryMethod::Meet;
        assert_eq!(m.next(), DeliveryMethod::Transfer);
        assert_eq!(m.next().next(), DeliveryMethod::Delivery);
        assert_eq!(m.next().next().next(), DeliveryMethod::Meet);
    }

    #[test]
    fn test_product_row_with_missing_price_and_status() {
        let json = r#"{"id":7,"title":"Basket","seller_name":"Chisomo","district":"Dedza"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.price_mwk, None);
        assert_eq!(p.status(), ProductStatus::Available);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserProfile {
            email: "grace@example.mw".to_string(),
            name: String::new(),
            role: Role::Seller,
            district: Some(District::Zomba),
        };
        assert_eq!(user.display_name(), "grace@example.mw");
    }

    #[test]
    fn test_order_wire_format() {
        let order = Order {
            id: 1,
            product_id: 3,
            buyer_name: "Thoko".to_string(),
            method: DeliveryMethod::Transfer,
            status: OrderStatus::Pending,
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"method\":\"transfer\""));
        assert!(json.contains("\"status\":\"pending\""));
    }
}
