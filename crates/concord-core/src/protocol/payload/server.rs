//! Server lifecycle: list, create, modify, delete.

use serde::Serialize;

use crate::protocol::domain::ServerInfo;
use crate::protocol::ident::{Image, Pubkey, ServerId};
use crate::protocol::wire::wire_struct;

/// Ask for the servers the user belongs to. Carries no data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetServersRequest {}

wire_struct!(GetServersRequest {});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetServersResponse {
    pub servers: Vec<ServerInfo>,
}

wire_struct!(GetServersResponse { servers });

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateServerRequest {
    pub name: String,
    pub icon: Image,
}

wire_struct!(CreateServerRequest { name, icon });

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteServerRequest {
    pub server_pubkey: Pubkey,
    pub server_id: ServerId,
}

wire_struct!(DeleteServerRequest {
    server_pubkey,
    server_id,
});

/// Rename and/or re-icon a server; absent fields stay unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifyServerRequest {
    pub name: Option<String>,
    pub icon: Option<Image>,
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
}

wire_struct!(ModifyServerRequest {
    name,
    icon,
    server_id,
    server_pubkey,
});

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::ErrorCode;
    use crate::protocol::wire::{from_bytes, to_bytes};

    #[test]
    fn get_servers_is_empty() {
        assert!(to_bytes(&GetServersRequest {}).unwrap().is_empty());
        assert_eq!(
            from_bytes::<GetServersRequest>(&[]).unwrap(),
            (GetServersRequest {}, 0)
        );
    }

    #[test]
    fn create_server_layout() {
        let req = CreateServerRequest {
            name: "general".into(),
            icon: Image::from(vec![1, 2, 3]),
        };
        let bytes = to_bytes(&req).unwrap();

        let mut expected = vec![0, 0, 0, 0, 0, 0, 0, 7];
        expected.extend_from_slice(b"general");
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 3, 1, 2, 3]);
        assert_eq!(bytes.as_ref(), expected.as_slice());

        assert_eq!(from_bytes::<CreateServerRequest>(&bytes).unwrap(), (req, 26));
    }

    #[test]
    fn delete_server_is_fixed_width() {
        let req = DeleteServerRequest {
            server_pubkey: Pubkey([1; 32]),
            server_id: ServerId::from(9),
        };
        let bytes = to_bytes(&req).unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(bytes[39], 9);
    }

    #[test]
    fn list_of_servers_keeps_order() {
        let server = |n: u64| ServerInfo {
            name: format!("s{n}"),
            description: String::new(),
            server_id: ServerId::from(n),
            server_pubkey: Pubkey([n as u8; 32]),
            icon: (n % 2 == 0).then(|| Image::from(vec![n as u8; 4])),
            seqno: n,
        };
        let resp = GetServersResponse {
            servers: (0..5).map(server).collect(),
        };
        let bytes = to_bytes(&resp).unwrap();
        let each: usize = resp
            .servers
            .iter()
            .map(|s| to_bytes(s).unwrap().len())
            .sum();
        assert_eq!(bytes.len(), 8 + each);

        let (back, used) = from_bytes::<GetServersResponse>(&bytes).unwrap();
        assert_eq!(back, resp);
        assert_eq!(used, bytes.len());

        let err = from_bytes::<GetServersResponse>(&bytes[..bytes.len() - 3]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfBounds);
    }
}
