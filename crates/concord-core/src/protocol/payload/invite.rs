//! Invites: create, list, modify, delete, preview, accept, join.

use serde::Serialize;

use crate::protocol::domain::{Invite, InviteResponseInfo};
use crate::protocol::ident::{Image, Pubkey, ServerId};
use crate::protocol::payload::ack_response;
use crate::protocol::wire::wire_struct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateInviteRequest {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    /// Maximum number of uses.
    pub count: u64,
    /// Expiration, ms since epoch.
    pub expiration: u128,
}

wire_struct!(CreateInviteRequest {
    server_id,
    server_pubkey,
    count,
    expiration,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateInviteResponse {
    pub success: bool,
    pub invite_id: u128,
}

wire_struct!(CreateInviteResponse { success, invite_id });

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListInvitesRequest {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
}

wire_struct!(ListInvitesRequest {
    server_id,
    server_pubkey,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListInvitesResponse {
    pub invites: Vec<Invite>,
}

wire_struct!(ListInvitesResponse { invites });

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifyInviteRequest {
    pub invite_id: u128,
    pub max: u64,
    pub expiration: u128,
}

wire_struct!(ModifyInviteRequest {
    invite_id,
    max,
    expiration,
});

ack_response!(ModifyInviteResponse);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteInviteRequest {
    pub invite_id: u128,
}

wire_struct!(DeleteInviteRequest { invite_id });

ack_response!(DeleteInviteResponse);

/// Preview an invite link before accepting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewInviteRequest {
    pub invite_url: String,
}

wire_struct!(ViewInviteRequest { invite_url });

/// `info` is absent when the invite is unknown or expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewInviteResponse {
    pub info: Option<InviteResponseInfo>,
}

wire_struct!(ViewInviteResponse { info });

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptInviteRequest {
    pub invite_id: u128,
    pub user_pubkey: Pubkey,
    pub server_pubkey: Pubkey,
    pub user_name: String,
    pub user_bio: String,
    pub avatar: Image,
}

wire_struct!(AcceptInviteRequest {
    invite_id,
    user_pubkey,
    server_pubkey,
    user_name,
    user_bio,
    avatar,
});

ack_response!(AcceptInviteResponse);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinServerRequest {
    pub invite_url: String,
}

wire_struct!(JoinServerRequest { invite_url });

ack_response!(JoinServerResponse);
