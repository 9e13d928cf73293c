//! Sample fixture manifests for E2E tests
//!
//! A small shop: users, groups that reference users, and products plus
//! orders that need both.

/// `accounts.0001_users`
pub const USERS: &str = r#"
description = "Staff accounts"

[[records]]
collection = "users"
key = "username"
data = { username = "alice", staff = true }

[[records]]
collection = "users"
key = "username"
data = { username = "bob", staff = false }
"#;

/// `accounts.0002_groups`
pub const GROUPS: &str = r#"
description = "Permission groups"
dependencies = ["accounts.0001_users"]

[[records]]
collection = "groups"
key = "name"
data = { name = "staff", members = ["alice"] }
"#;

/// `shop.0001_products`
pub const PRODUCTS: &str = r#"
description = "Catalogue"

[[records]]
collection = "products"
key = "sku"
data = { sku = "A-1", price = 12.5 }

[[records]]
collection = "products"
key = "sku"
data = { sku = "B-2", price = 4.0 }
"#;

/// `shop.0002_orders`
pub const ORDERS: &str = r#"
dependencies = ["shop.0001_products", "accounts.0001_users"]

[[records]]
collection = "orders"
key = "number"
data = { number = 1, customer = "bob", items = ["A-1"] }
"#;

/// Every sample as `(namespace, name, manifest)`
pub const SHOP: [(&str, &str, &str); 4] = [
    ("accounts", "0001_users", USERS),
    ("accounts", "0002_groups", GROUPS),
    ("shop", "0001_products", PRODUCTS),
    ("shop", "0002_orders", ORDERS),
];

/// Manifest that does not parse
pub const BROKEN_TOML: &str = "dependencies = [";
