//! Newtype IDs for type-safe record references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different record collections.

/// Macro to define a type-safe, string-backed record ID.
///
/// Record IDs are opaque strings: seeded records use short literals
/// (`"1"`, `"t1"`) while records created at runtime use a millisecond
/// timestamp. The generated type has:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `from_millis()`, `as_str()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use pathway_core::define_id;
/// define_id!(InvoiceId);
/// define_id!(PayoutId);
///
/// let invoice = InvoiceId::new("42");
/// let payout = PayoutId::from_millis(1_716_286_530_123);
///
/// assert_eq!(invoice.as_str(), "42");
/// assert_eq!(payout.to_string(), "1716286530123");
///
/// // These are different types, so this won't compile:
/// // let _: InvoiceId = payout;
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
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create an ID from a millisecond timestamp.
            #[must_use]
            pub fn from_millis(millis: i64) -> Self {
                Self(millis.to_string())
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

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define record IDs for every managed collection
define_id!(UserId);
define_id!(JourneyId);
define_id!(TicketId);
define_id!(MessageId);
define_id!(ContentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis() {
        assert_eq!(TicketId::from_millis(1_700_000_000_000).as_str(), "1700000000000");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(UserId::new("10") < UserId::new("9"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new("7");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"7\""));
    }
}
