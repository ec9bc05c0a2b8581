//! Channel CRUD inside a server.

use serde::Serialize;

use crate::protocol::domain::Channel;
use crate::protocol::ident::{Pubkey, ServerId};
use crate::protocol::payload::ack_response;
use crate::protocol::wire::wire_struct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetChannelsRequest {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
}

wire_struct!(GetChannelsRequest {
    server_id,
    server_pubkey,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetChannelsResponse {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    pub channels: Vec<Channel>,
}

wire_struct!(GetChannelsResponse {
    server_id,
    server_pubkey,
    channels,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddChannelRequest {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    pub name: String,
    pub description: String,
}

wire_struct!(AddChannelRequest {
    server_id,
    server_pubkey,
    name,
    description,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddChannelResponse {
    pub success: bool,
    /// Id assigned to the new channel.
    pub channel_id: u64,
}

wire_struct!(AddChannelResponse {
    success,
    channel_id,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifyChannelRequest {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    pub channel_id: u64,
    pub name: String,
    pub description: String,
}

wire_struct!(ModifyChannelRequest {
    server_id,
    server_pubkey,
    channel_id,
    name,
    description,
});

ack_response!(ModifyChannelResponse);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteChannelRequest {
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    pub channel_id: u64,
}

wire_struct!(DeleteChannelRequest {
    server_id,
    server_pubkey,
    channel_id,
});

ack_response!(DeleteChannelResponse);
