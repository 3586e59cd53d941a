use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

id_type!(
    /// A player (human or AI) that can own stacks, cities and items.
    PlayerId
);
id_type!(
    /// A stack of armies moving as one.
    StackId
);
id_type!(ItemId);
id_type!(
    /// Opaque tile-style reference, resolved by the tileset.
    StyleId
);
