//! Surrogate identifiers assigned by the store

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw database value
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a review form
    ReviewFormId
);
id_type!(
    /// Identifies a question within any form
    QuestionId
);
id_type!(
    /// Identifies a submitted review
    ReviewId
);
id_type!(
    /// Identifies one question/answer pairing inside a review
    QuestionAnswerId
);
id_type!(
    /// Identifies an answer value
    AnswerId
);
