//! Shared identifier newtypes and async aliases for workspace crates.
//!
//! ```rust
//! use rcommon::{ChatId, ModelId};
//!
//! let chat = ChatId::new(42);
//! let model = ModelId::from("7");
//!
//! assert_eq!(chat.value(), 42);
//! assert_eq!(model.as_str(), "7");
//! assert_eq!(model.to_string(), "7");
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use rcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod ids {
    //! Cross-crate identifier newtypes.
    //!
    //! A `ChatId` keys everything per-conversation; chat transports hand out
    //! signed 64-bit conversation ids. A `ModelId` is the backend's key for a
    //! trained model — decimal text in commands, compared as a string against
    //! the keys of the backend's model catalog.

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChatId(i64);

    impl ChatId {
        pub fn new(value: i64) -> Self {
            Self(value)
        }

        pub fn value(self) -> i64 {
            self.0
        }
    }

    impl Display for ChatId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl From<i64> for ChatId {
        fn from(value: i64) -> Self {
            Self(value)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct ModelId(String);

    impl ModelId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for ModelId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for ModelId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for ModelId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub use future::BoxFuture;
pub use ids::{ChatId, ModelId};

#[cfg(test)]
mod tests {
    use super::{ChatId, ModelId};

    #[test]
    fn id_newtypes_round_trip_values() {
        let chat = ChatId::from(1001);
        let model = ModelId::from("17");

        assert_eq!(chat.value(), 1001);
        assert_eq!(chat.to_string(), "1001");
        assert_eq!(model.as_str(), "17");
        assert_eq!(model.to_string(), "17");
    }

    #[test]
    fn chat_ids_hash_and_compare_by_value() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(ChatId::new(5), "five");

        assert_eq!(map.get(&ChatId::new(5)), Some(&"five"));
        assert_ne!(ChatId::new(5), ChatId::new(6));
    }
}
