//! Macros for defining kind enums.

/// Macro for defining a kind enum with a fixed set of string representations.
///
/// Every variant is rendered (via [`Display`], [`FromStr`] and `serde`) in the
/// provided `case`, which is any case name understood by both `strum` and
/// `serde` (`"PascalCase"`, `"lowercase"`, `"SCREAMING_SNAKE_CASE"`, ...).
/// A variant marked with `#[rename = "..."]` is rendered with the given
/// literal instead.
///
/// Requires the `serde` feature of this crate.
///
/// # Example
///
/// ```ignore
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Shape kind."]
///     #[case = "lowercase"]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::Cube.to_string(), "cube");
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        #[case = $case:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $(#[rename = $rename:literal])?
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumIter,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[serde(rename_all = $case)]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = $case)]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $(
                     #[serde(rename = $rename)]
                     #[strum(to_string = $rename)]
                 )?
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Returns all the variants of this kind, in declaration order.
            pub fn all() -> impl Iterator<Item = Self> {
                <Self as $crate::private::strum::IntoEnumIterator>::iter()
            }
        }
    };
}

#[cfg(all(test, feature = "serde"))]
mod spec {
    use std::str::FromStr as _;

    define_kind! {
        #[doc = "Test kind."]
        #[case = "SCREAMING_SNAKE_CASE"]
        enum Document {
            #[doc = "National ID."]
            Dni = 1,

            #[doc = "ID card."]
            IdCard = 2,

            #[doc = "Passport."]
            #[rename = "Pasaporte"]
            Passport = 3,
        }
    }

    #[test]
    fn renders_in_case() {
        assert_eq!(Document::Dni.to_string(), "DNI");
        assert_eq!(Document::IdCard.to_string(), "ID_CARD");
        assert_eq!(
            serde_json::to_string(&Document::IdCard).unwrap(),
            "\"ID_CARD\"",
        );
    }

    #[test]
    fn parses_only_declared_names() {
        assert_eq!(Document::from_str("ID_CARD").unwrap(), Document::IdCard);
        assert!(Document::from_str("IdCard").is_err());
        assert!(Document::from_str("").is_err());
    }

    #[test]
    fn renders_renamed_variants_verbatim() {
        assert_eq!(Document::Passport.to_string(), "Pasaporte");
        assert_eq!(
            Document::from_str("Pasaporte").unwrap(),
            Document::Passport,
        );
        assert!(Document::from_str("PASSPORT").is_err());
        assert_eq!(
            serde_json::from_str::<Document>("\"Pasaporte\"").unwrap(),
            Document::Passport,
        );
    }

    #[test]
    fn lists_all_variants() {
        assert_eq!(
            Document::all().collect::<Vec<_>>(),
            [Document::Dni, Document::IdCard, Document::Passport],
        );
    }
}
