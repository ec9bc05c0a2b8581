//! Member listing, fetched in batches.

use serde::Serialize;

use crate::protocol::domain::Member;
use crate::protocol::ident::{Pubkey, ServerId};
use crate::protocol::wire::wire_struct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetMembersRequest {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    pub batch_num: u64,
}

wire_struct!(GetMembersRequest {
    server_id,
    server_pubkey,
    batch_num,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetMembersResponse {
    pub members: Vec<Member>,
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    pub batch_num: u64,
}

wire_struct!(GetMembersResponse {
    members,
    server_id,
    server_pubkey,
    batch_num,
});
