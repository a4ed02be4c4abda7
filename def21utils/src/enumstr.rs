//!
//! # Keyword-Enum Module
//!
//! DEF is a keyword-heavy format: placement statuses, pin directions, net uses,
//! wire shapes and the like all arrive and depart as one of a fixed set of upper-case strings.
//! This module defines the [enumstr] macro and paired [EnumStr] trait
//! which tie each such set to a fieldless `enum`.
//!
//! The [EnumStr] trait defines:
//! * `to_str(&self) -> &'static str` converts the enum to its keyword.
//! * `from_str(&str) -> Option<Self>` does the opposite.
//! * `parse(&str) -> Result<Self, UnknownKeyword>`, a fallible variant which reports the allowed set.
//! * `KEYWORDS`, the full list of allowed keywords, in declaration order.
//!
//! Example:
//!
//! ```rs
//! use def21utils::enumstr;
//!
//! enumstr!(
//! /// # Region Types
//! RegionType {
//!     Fence: "FENCE",
//!     Guide: "GUIDE",
//!  }
//! );
//! ```
//!

///
/// # Keyword-Enumeration Trait
///
/// While [EnumStr] can be implemented by hand, its primary intent is
/// for implementation by the [enumstr] macro.
///
pub trait EnumStr: std::marker::Sized + 'static {
    /// All keywords, in declaration order
    const KEYWORDS: &'static [&'static str];
    fn to_str(&self) -> &'static str;
    fn from_str(txt: &str) -> Option<Self>;
    /// Parse `txt`, failing with an [UnknownKeyword] naming the allowed set.
    fn parse(txt: &str) -> Result<Self, UnknownKeyword> {
        Self::from_str(txt).ok_or_else(|| UnknownKeyword {
            txt: txt.to_string(),
            allowed: Self::KEYWORDS,
        })
    }
}

/// Failure to match a keyword to one of an [EnumStr]'s variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyword {
    /// Offending text
    pub txt: String,
    /// Allowed keywords
    pub allowed: &'static [&'static str],
}
impl std::fmt::Display for UnknownKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unknown keyword \"{}\", expected one of {}",
            self.txt,
            self.allowed.join(", ")
        )
    }
}
impl std::error::Error for UnknownKeyword {}

///
/// # Keyword-Enum Pairing Macro
///
/// For creating an `enum` which:
/// * (a) Has paired keyword-values, as DEF writes them.
/// * (b) Automatically implements the [EnumStr] trait for conversions to and from these keywords.
/// * (c) Automatically implements [std::fmt::Display] writing the keyword.
///
/// All variants are fieldless, and include derived implementations of common traits,
/// notably `serde::{Serialize,Deserialize}` and `schemars::JsonSchema`.
/// Invoking modules must have each of these derive-macros in scope.
///
#[macro_export]
macro_rules! enumstr {
    (   $(#[$meta: meta])*
        $enum_name: ident {
        $( $variant: ident : $strval: literal ),* $(,)?
    }) => {
        $(#[$meta])*
        #[allow(dead_code)]
        #[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $( #[doc=$strval]
                $variant ),*
        }
        impl EnumStr for $enum_name {
            const KEYWORDS: &'static [&'static str] = &[$( $strval ),*];
            /// Convert a [$enum_name] variant to its keyword.
            fn to_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $strval),*,
                }
            }
            /// Create a [$enum_name] from one of its keywords.
            /// Matching is case *sensitive*, as DEF keywords are.
            fn from_str(txt: &str) -> Option<Self> {
                match txt {
                    $( $strval => Some(Self::$variant)),*,
                    _ => None,
                }
            }
        }
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.to_str())
            }
        }
    }
}
