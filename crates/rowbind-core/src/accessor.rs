//! The accessor map: which [`Row`] method reads which Rust type.
//!
//! The table is shared by the derive macro, which uses [`Accessor::method_name`]
//! to emit extraction code, and by the runtime fallback path, which calls
//! [`Accessor::read`].

use crate::{Result, Row, Value};

use std::fmt;

macro_rules! define_accessors {
    ( $( ($sem:ident, $nullable:ident, $ty:ty, $variant:ident, $get:ident, $get_nullable:ident) ),* $(,)? ) => {
        /// A storage-independent scalar type a row column can be read as.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SemanticType {
            $( $sem, )*
        }

        impl SemanticType {
            pub const ALL: &'static [SemanticType] = &[ $( SemanticType::$sem, )* ];
        }

        /// One row accessor operation. Each semantic type has a plain and a
        /// nullable accessor.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Accessor {
            $( $sem, $nullable, )*
        }

        impl Accessor {
            pub const ALL: &'static [Accessor] = &[ $( Accessor::$sem, Accessor::$nullable, )* ];

            /// Name of the [`Row`] method implementing this accessor.
            pub const fn method_name(self) -> &'static str {
                match self {
                    $(
                        Accessor::$sem => stringify!($get),
                        Accessor::$nullable => stringify!($get_nullable),
                    )*
                }
            }

            pub const fn type_tag(self) -> TypeTag {
                match self {
                    $(
                        Accessor::$sem => TypeTag::required(SemanticType::$sem),
                        Accessor::$nullable => TypeTag::nullable(SemanticType::$sem),
                    )*
                }
            }

            /// Reads `column` through this accessor, returning the untyped value.
            ///
            /// A NULL read through a nullable accessor yields [`Value::Null`].
            pub fn read<R: Row + ?Sized>(self, row: &R, column: &str) -> Result<Value> {
                match self {
                    $(
                        Accessor::$sem => row.$get(column).map(Value::$variant),
                        Accessor::$nullable => Ok(row
                            .$get_nullable(column)?
                            .map(Value::$variant)
                            .unwrap_or_default()),
                    )*
                }
            }
        }
    };
}

for_each_accessor!(define_accessors);

impl SemanticType {
    /// Rust spellings that resolve to this type. The first is canonical.
    pub const fn rust_names(self) -> &'static [&'static str] {
        match self {
            SemanticType::Byte => &["u8"],
            SemanticType::Int16 => &["i16"],
            SemanticType::Int32 => &["i32"],
            SemanticType::Int64 => &["i64"],
            SemanticType::Float => &["f32"],
            SemanticType::Double => &["f64"],
            SemanticType::Decimal => &["Decimal", "rust_decimal::Decimal"],
            SemanticType::String => &["String", "std::string::String", "alloc::string::String"],
            SemanticType::Bool => &["bool"],
            SemanticType::Guid => &["Uuid", "uuid::Uuid"],
            SemanticType::Char => &["char"],
            SemanticType::DateTime => &["NaiveDateTime", "chrono::NaiveDateTime"],
        }
    }

    /// Resolves a whitespace-free Rust type path.
    pub fn from_rust_name(name: &str) -> Option<SemanticType> {
        let name = name.strip_prefix("::").unwrap_or(name);
        SemanticType::ALL
            .iter()
            .copied()
            .find(|ty| ty.rust_names().contains(&name))
    }
}

/// A semantic type plus nullability, the key of the accessor map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    pub ty: SemanticType,
    pub nullable: bool,
}

const OPTION_PREFIXES: [&str; 3] = ["Option<", "std::option::Option<", "core::option::Option<"];

impl TypeTag {
    pub const fn new(ty: SemanticType, nullable: bool) -> TypeTag {
        TypeTag { ty, nullable }
    }

    pub const fn required(ty: SemanticType) -> TypeTag {
        TypeTag::new(ty, false)
    }

    pub const fn nullable(ty: SemanticType) -> TypeTag {
        TypeTag::new(ty, true)
    }

    /// Parses a Rust type as written in source, e.g. `Option<chrono::NaiveDateTime>`.
    ///
    /// Whitespace is ignored. Nested options and unknown types return `None`.
    pub fn parse(spelling: &str) -> Option<TypeTag> {
        let compact: String = spelling.chars().filter(|c| !c.is_whitespace()).collect();
        let compact = compact.strip_prefix("::").unwrap_or(&compact);

        for prefix in OPTION_PREFIXES {
            if let Some(inner) = compact
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix('>'))
            {
                return SemanticType::from_rust_name(inner).map(TypeTag::nullable);
            }
        }

        SemanticType::from_rust_name(compact).map(TypeTag::required)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.ty.rust_names()[0];
        if self.nullable {
            write!(f, "Option<{name}>")
        } else {
            f.write_str(name)
        }
    }
}

/// Process-wide, read-only table from [`TypeTag`] to [`Accessor`].
#[derive(Debug)]
pub struct AccessorMap {
    entries: &'static [Accessor],
}

static GLOBAL: AccessorMap = AccessorMap {
    entries: Accessor::ALL,
};

impl AccessorMap {
    pub fn global() -> &'static AccessorMap {
        &GLOBAL
    }

    pub fn get(&self, tag: TypeTag) -> Option<Accessor> {
        self.entries
            .iter()
            .copied()
            .find(|accessor| accessor.type_tag() == tag)
    }

    /// Looks up the accessor for a Rust type spelling, see [`TypeTag::parse`].
    pub fn lookup_type_name(&self, name: &str) -> Option<Accessor> {
        TypeTag::parse(name).and_then(|tag| self.get(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = Accessor> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn map_has_two_entries_per_type() {
        let map = AccessorMap::global();
        assert_eq!(map.len(), 24);
        assert_eq!(SemanticType::ALL.len() * 2, map.len());

        for ty in SemanticType::ALL {
            assert!(map.get(TypeTag::required(*ty)).is_some());
            assert!(map.get(TypeTag::nullable(*ty)).is_some());
        }
    }

    #[test]
    fn method_names_are_unique() {
        let names: HashSet<_> = AccessorMap::global().iter().map(Accessor::method_name).collect();
        assert_eq!(names.len(), 24);
    }

    #[test]
    fn parse_plain_and_qualified() {
        assert_eq!(TypeTag::parse("i32"), Some(TypeTag::required(SemanticType::Int32)));
        assert_eq!(
            TypeTag::parse("::uuid::Uuid"),
            Some(TypeTag::required(SemanticType::Guid))
        );
        assert_eq!(
            TypeTag::parse("std :: string :: String"),
            Some(TypeTag::required(SemanticType::String))
        );
    }

    #[test]
    fn parse_option() {
        assert_eq!(
            TypeTag::parse("Option < chrono::NaiveDateTime >"),
            Some(TypeTag::nullable(SemanticType::DateTime))
        );
        assert_eq!(
            TypeTag::parse("::core::option::Option<u8>"),
            Some(TypeTag::nullable(SemanticType::Byte))
        );
        assert_eq!(TypeTag::parse("Option<Option<u8>>"), None);
    }

    #[test]
    fn parse_rejects_unknown() {
        for name in ["u16", "Vec<u8>", "&str", "Option<>", "Box<String>"] {
            assert_eq!(TypeTag::parse(name), None, "{name}");
        }
    }

    #[test]
    fn lookup_by_type_name() {
        let map = AccessorMap::global();
        assert_eq!(map.lookup_type_name("Decimal"), Some(Accessor::Decimal));
        assert_eq!(
            map.lookup_type_name("Option<char>"),
            Some(Accessor::NullableChar)
        );
        assert_eq!(
            map.lookup_type_name("Option<char>").map(Accessor::method_name),
            Some("get_nullable_char")
        );
    }

    #[test]
    fn type_tag_display() {
        assert_eq!(TypeTag::nullable(SemanticType::Guid).to_string(), "Option<Uuid>");
        assert_eq!(TypeTag::required(SemanticType::Double).to_string(), "f64");
    }
}
