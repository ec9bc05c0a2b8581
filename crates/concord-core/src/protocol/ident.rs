//! Fixed-size opaque identifiers and binary blobs.
//!
//! Public keys and signatures come from the identity subsystem; the codec
//! moves their bytes and never validates them.

use std::fmt;

use bytes::BytesMut;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::protocol::wire::{get_prefixed, put_prefixed, Decode, Encode};

macro_rules! fixed_ident {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Encoded width in bytes.
            pub const LEN: usize = $len;

            pub fn from_bytes(data: [u8; $len]) -> Self {
                Self(data)
            }

            pub fn to_bytes(&self) -> [u8; $len] {
                self.0
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(data: [u8; $len]) -> Self {
                Self(data)
            }
        }

        impl Encode for $name {
            fn encode(&self, out: &mut BytesMut) -> Result<()> {
                self.0.encode(out)
            }
        }

        impl Decode for $name {
            fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
                let (data, next) = <[u8; $len]>::decode(buf, offset)?;
                Ok((Self(data), next))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&hex::encode(self.0))
            }
        }
    };
}

fixed_ident!(
    /// Ed25519 public key (32 bytes).
    Pubkey,
    32
);

fixed_ident!(
    /// Ed25519 signature (64 bytes).
    Signature,
    64
);

fixed_ident!(
    /// Server identifier (8 bytes).
    ServerId,
    8
);

impl From<u64> for ServerId {
    fn from(id: u64) -> Self {
        Self(id.to_be_bytes())
    }
}

/// Length-prefixed binary blob (server icon, user avatar).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Image(pub Vec<u8>);

impl Image {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Image {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl From<&[u8]> for Image {
    fn from(data: &[u8]) -> Self {
        Self(data.to_vec())
    }
}

impl Encode for Image {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        put_prefixed(out, &self.0)
    }
}

impl Decode for Image {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (data, next) = get_prefixed(buf, offset)?;
        Ok((Self(data.to_vec()), next))
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Image({} bytes)", self.0.len())
    }
}

impl Serialize for Image {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}
