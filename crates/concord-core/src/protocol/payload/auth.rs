//! Authentication handshake.
//!
//! On connect the service pushes a [`Challenge`]. The client answers with an
//! [`AuthRequest`] carrying either the startup token or a signature over the
//! challenge made with its key; the service replies with [`AuthResponse`].

use serde::Serialize;

use crate::protocol::ident::{Pubkey, Signature};
use crate::protocol::wire::wire_struct;

/// Client credentials; any subset may be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRequest {
    pub signature: Option<Signature>,
    pub token: Option<u128>,
    pub pubkey: Option<Pubkey>,
}

wire_struct!(AuthRequest {
    signature,
    token,
    pubkey,
});

impl AuthRequest {
    /// Authenticate with the token issued at service startup.
    pub fn with_token(token: u128) -> Self {
        Self {
            signature: None,
            token: Some(token),
            pubkey: None,
        }
    }

    /// Authenticate with a signature over the challenge.
    pub fn with_signature(pubkey: Pubkey, signature: Signature) -> Self {
        Self {
            signature: Some(signature),
            token: None,
            pubkey: Some(pubkey),
        }
    }
}

/// Server-issued nonce to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Challenge {
    pub challenge: u128,
}

wire_struct!(Challenge { challenge });

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    /// Where to continue after a successful login.
    pub redirect: Option<String>,
}

wire_struct!(AuthResponse { success, redirect });

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::protocol::wire::{from_bytes, to_bytes};

    #[test]
    fn token_auth_layout() {
        let req = AuthRequest::with_token(0x2a);
        let bytes = to_bytes(&req).unwrap();
        // absent signature, present token (tag + 16), absent pubkey
        assert_eq!(bytes.len(), 1 + 17 + 1);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1], 1);
        assert_eq!(bytes[17], 0x2a);
        assert_eq!(bytes[18], 0);
        assert_eq!(from_bytes::<AuthRequest>(&bytes).unwrap(), (req, 19));
    }

    #[test]
    fn signature_auth_roundtrip() {
        let req = AuthRequest::with_signature(Pubkey([5; 32]), Signature([6; 64]));
        let bytes = to_bytes(&req).unwrap();
        assert_eq!(bytes.len(), 65 + 1 + 33);
        assert_eq!(from_bytes::<AuthRequest>(&bytes).unwrap(), (req, 99));
    }

    #[test]
    fn auth_response_with_redirect() {
        let resp = AuthResponse {
            success: true,
            redirect: Some("/servers".into()),
        };
        let bytes = to_bytes(&resp).unwrap();
        assert_eq!(bytes.len(), 1 + 1 + 8 + 8);
        assert_eq!(from_bytes::<AuthResponse>(&bytes).unwrap(), (resp, 18));
    }
}
