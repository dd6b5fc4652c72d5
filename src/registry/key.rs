//! Nominal type identity for states and events.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a state or event type, paired with its name for
/// diagnostics.
///
/// Two keys compare equal iff they denote the same Rust type; the name
/// plays no part in equality.
///
/// # Example
///
/// ```rust
/// use shunt::registry::TypeKey;
///
/// struct Coin;
/// struct Push;
///
/// assert_eq!(TypeKey::of::<Coin>(), TypeKey::of::<Coin>());
/// assert_ne!(TypeKey::of::<Coin>(), TypeKey::of::<Push>());
/// assert_eq!(TypeKey::of::<Coin>().short_name(), "Coin");
/// ```
#[derive(Clone, Copy, Debug, Eq)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of the type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Unqualified type name, used in error messages and logs.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
