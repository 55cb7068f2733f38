//! Internal macros for fixed-size byte buffer types.

/// Generates the foundational API for a fixed-size byte buffer type.
///
/// Provides constructors (`new`, `zero`), accessors (`as_slice`, `as_bytes`,
/// `is_zero`), the `LEN` constant and standard conversion traits.
macro_rules! impl_buf_core {
    ($name:ident, $len:expr) => {
        impl $name {
            pub const LEN: usize = $len;

            pub const fn new(data: [u8; $len]) -> Self {
                Self(data)
            }

            pub const fn as_slice(&self) -> &[u8] {
                &self.0
            }

            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub const fn zero() -> Self {
                Self::new([0; $len])
            }

            pub const fn is_zero(&self) -> bool {
                let mut i = 0;
                while i < $len {
                    if self.0[i] != 0 {
                        return false;
                    }
                    i += 1;
                }
                true
            }
        }

        impl ::std::convert::AsRef<[u8; $len]> for $name {
            fn as_ref(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl ::std::convert::From<[u8; $len]> for $name {
            fn from(data: [u8; $len]) -> Self {
                Self(data)
            }
        }

        impl ::std::convert::From<$name> for [u8; $len] {
            fn from(buf: $name) -> Self {
                buf.0
            }
        }

        impl<'a> ::std::convert::TryFrom<&'a [u8]> for $name {
            type Error = &'a [u8];

            fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
                if value.len() == $len {
                    let mut arr = [0; $len];
                    arr.copy_from_slice(value);
                    Ok(Self(arr))
                } else {
                    Err(value)
                }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self([0; $len])
            }
        }
    };
}

/// Generates `Debug` (full hex) and `Display` (truncated hex) formatting.
macro_rules! impl_buf_fmt {
    ($name:ident, $len:expr) => {
        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                // twice as large, required by hex::encode_to_slice.
                let mut buf = [0; $len * 2];
                ::hex::encode_to_slice(self.0, &mut buf).expect("buf: enc hex");
                f.write_str(::core::str::from_utf8(&buf).expect("buf: hex is ascii"))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                // fmt only first and last bits of data.
                let mut buf = [0; 6];
                ::hex::encode_to_slice(&self.0[..3], &mut buf).expect("buf: enc hex");
                f.write_str(::core::str::from_utf8(&buf).expect("buf: hex is ascii"))?;
                f.write_str("..")?;
                ::hex::encode_to_slice(&self.0[$len - 3..], &mut buf).expect("buf: enc hex");
                f.write_str(::core::str::from_utf8(&buf).expect("buf: hex is ascii"))?;
                Ok(())
            }
        }
    };
}

/// Generates `BorshSerialize`/`BorshDeserialize` impls as raw fixed bytes.
macro_rules! impl_buf_borsh {
    ($name:ident, $len:expr) => {
        impl ::borsh::BorshSerialize for $name {
            fn serialize<W: ::std::io::Write>(&self, writer: &mut W) -> ::std::io::Result<()> {
                writer.write_all(&self.0)
            }
        }

        impl ::borsh::BorshDeserialize for $name {
            fn deserialize_reader<R: ::std::io::Read>(reader: &mut R) -> ::std::io::Result<Self> {
                let mut array = [0u8; $len];
                reader.read_exact(&mut array)?;
                Ok(array.into())
            }
        }
    };
}

/// Generates an `Arbitrary` impl for property-based testing.
macro_rules! impl_buf_arbitrary {
    ($name:ident, $len:expr) => {
        impl<'a> ::arbitrary::Arbitrary<'a> for $name {
            fn arbitrary(u: &mut ::arbitrary::Unstructured<'a>) -> ::arbitrary::Result<Self> {
                let mut array = [0u8; $len];
                u.fill_buffer(&mut array)?;
                Ok(array.into())
            }
        }
    };
}

/// Generates serde impls encoding the buffer as a hex string.
macro_rules! impl_buf_serde {
    ($name:ident, $len:expr) => {
        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(&::hex::encode(self.0))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                struct BufVisitor;

                impl<'de> ::serde::de::Visitor<'de> for BufVisitor {
                    type Value = $name;

                    fn expecting(
                        &self,
                        formatter: &mut ::std::fmt::Formatter<'_>,
                    ) -> ::std::fmt::Result {
                        write!(
                            formatter,
                            "a hex string with an optional 0x prefix representing {} bytes",
                            $len
                        )
                    }

                    fn visit_str<E>(self, v: &str) -> Result<$name, E>
                    where
                        E: ::serde::de::Error,
                    {
                        let hex_str = v.strip_prefix("0x").or(v.strip_prefix("0X")).unwrap_or(v);
                        let bytes = ::hex::decode(hex_str).map_err(E::custom)?;
                        let array: [u8; $len] = bytes.as_slice().try_into().map_err(|_| {
                            E::custom(format!("expected {} bytes, got {}", $len, bytes.len()))
                        })?;
                        Ok($name(array))
                    }
                }

                deserializer.deserialize_str(BufVisitor)
            }
        }
    };
}
