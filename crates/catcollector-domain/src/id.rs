//! Newtype wrappers for domain identifiers.
//!
//! All rows use database-generated integer keys.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! int_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

int_id!(
    /// Identifies a user account.
    UserId
);

int_id!(
    /// Identifies a cat.
    CatId
);

int_id!(
    /// Identifies a cat toy.
    CatToyId
);
