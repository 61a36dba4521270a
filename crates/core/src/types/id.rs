//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are strings: seed records use short numeric strings (`"1"`), records
//! created at runtime get a UUID v4, and orders use a sequential number.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `generate()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use foodexpress_core::define_id;
/// define_id!(DishId);
/// define_id!(TableId);
///
/// let dish_id = DishId::new("1");
/// let table_id = TableId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: DishId = table_id;
/// assert_eq!(dish_id.as_str(), table_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from any string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create a fresh random ID (UUID v4).
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::random_id())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Random id string backing `generate()`.
#[doc(hidden)]
#[must_use]
pub fn random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Define standard entity IDs
define_id!(CategoryId);
define_id!(ProductId);
define_id!(ComplementId);
define_id!(DeliveryFeeId);
define_id!(OrderId);
define_id!(AdminUserId);

/// First order number handed out on an empty order book.
pub const FIRST_ORDER_NUMBER: usize = 1001;

impl OrderId {
    /// Sequential order id for the order that follows `existing_orders`.
    ///
    /// Ids stay distinct only while orders are never deleted.
    #[must_use]
    pub fn sequential(existing_orders: usize) -> Self {
        Self((FIRST_ORDER_NUMBER + existing_orders).to_string())
    }
}
