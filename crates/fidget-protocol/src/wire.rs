//! The `wire_enum!` macro: closed enums with pinned wire codes.
//!
//! Every vocabulary type (and the command opcode table) is a fieldless
//! enum whose variants travel as small integers. Getting one of those
//! integers wrong silently sends a different building, mount, or command
//! to the server, so the macro insists on an explicit `= code` for
//! **every** variant. There is no default numbering to fall back on.
//!
//! For an enum declared as
//!
//! ```ignore
//! wire_enum! {
//!     pub enum MountType: u8 {
//!         Cow = 1,
//!         Horse = 2,
//!     }
//! }
//! ```
//!
//! the macro generates:
//!
//! - the enum itself with `#[repr(u8)]` and the usual derives
//! - `ALL`, `wire_code()` and `name()`
//! - `TryFrom<u8>` (unknown codes → [`ProtocolError::UnknownWireCode`])
//! - `From<MountType> for u8`
//! - `Display` (the variant name)
//! - `Serialize`/`Deserialize` as the bare wire code
//!
//! [`ProtocolError::UnknownWireCode`]: crate::ProtocolError::UnknownWireCode

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $repr:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $code,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the code this variant is transmitted as.
            pub const fn wire_code(self) -> $repr {
                self as $repr
            }

            /// Returns the variant name (used in logs and `Display`).
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = $crate::ProtocolError;

            fn try_from(code: $repr) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    _ => Err($crate::ProtocolError::UnknownWireCode {
                        kind: stringify!($name),
                        code: u16::from(code),
                    }),
                }
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> $repr {
                value.wire_code()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.wire_code(), serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let code = <$repr as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(code).map_err(::serde::de::Error::custom)
            }
        }
    };
}
