//! Status enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table. On the wire the
//! variants travel as their PascalCase names.

use serde::{Deserialize, Serialize};

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up the variant for a database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Variant name as it appears on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        NotStarted = 1,
        Active = 2,
        Completed = 3,
    }
}

define_status_enum! {
    /// Task progress status.
    TaskStatus {
        ToDo = 1,
        InProgress = 2,
        Done = 3,
    }
}
