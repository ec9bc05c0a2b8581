//! Domain records shared by several payloads.
//!
//! Each record encodes as the concatenation of its fields in declaration
//! order; decoding threads the offset through every field, including nested
//! ones, and returns the offset just past the record.

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use crate::error::{ConcordError, Result};
use crate::protocol::ident::{Image, Pubkey, ServerId};
use crate::protocol::wire::{wire_struct, Decode, Encode};

/// Server descriptor as listed by `GetServersResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub description: String,
    pub server_id: ServerId,
    pub server_pubkey: Pubkey,
    pub icon: Option<Image>,
    /// Bumped by the service whenever the descriptor changes.
    pub seqno: u64,
}

wire_struct!(ServerInfo {
    name,
    description,
    server_id,
    server_pubkey,
    icon,
    seqno,
});

/// A channel inside a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub channel_id: u64,
    pub name: String,
    pub description: String,
}

wire_struct!(Channel {
    channel_id,
    name,
    description,
});

/// Presence flag of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum OnlineStatus {
    Offline = 0,
    Online = 1,
}

impl TryFrom<u8> for OnlineStatus {
    type Error = ConcordError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(OnlineStatus::Offline),
            1 => Ok(OnlineStatus::Online),
            _ => Err(ConcordError::InvalidTag {
                field: "online_status",
                tag,
            }),
        }
    }
}

impl Encode for OnlineStatus {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        out.put_u8(*self as u8);
        Ok(())
    }
}

impl Decode for OnlineStatus {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (tag, next) = u8::decode(buf, offset)?;
        Ok((OnlineStatus::try_from(tag)?, next))
    }
}

/// A server member with profile summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub user_pubkey: Pubkey,
    pub user_name: String,
    pub user_bio: String,
    /// Role bitset.
    pub roles: u128,
    pub profile_seqno: u64,
    pub online_status: OnlineStatus,
}

wire_struct!(Member {
    user_pubkey,
    user_name,
    user_bio,
    roles,
    profile_seqno,
    online_status,
});

/// An invite to a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invite {
    pub server_id: ServerId,
    pub inviter: Pubkey,
    /// Expiration, ms since epoch.
    pub expiry: u128,
    /// Uses so far.
    pub cur: u64,
    /// Maximum uses.
    pub max: u64,
    pub id: u128,
}

wire_struct!(Invite {
    server_id,
    inviter,
    expiry,
    cur,
    max,
    id,
});

/// User-editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub user_name: String,
    pub user_bio: String,
}

wire_struct!(ProfileData {
    user_name,
    user_bio,
});

/// Invite preview returned by `ViewInviteResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteResponseInfo {
    pub inviter_name: String,
    pub inviter_icon: Image,
    pub server_icon: Image,
    pub current_members: u64,
    pub online_members: u64,
    pub server_name: String,
}

wire_struct!(InviteResponseInfo {
    inviter_name,
    inviter_icon,
    server_icon,
    current_members,
    online_members,
    server_name,
});

/// What the service should do with avatars in a profile lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum ProfileImageRequestType {
    ReturnAvatars = 0,
    SaveAvatars = 1,
    NoAvatars = 2,
}

impl TryFrom<u8> for ProfileImageRequestType {
    type Error = ConcordError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(ProfileImageRequestType::ReturnAvatars),
            1 => Ok(ProfileImageRequestType::SaveAvatars),
            2 => Ok(ProfileImageRequestType::NoAvatars),
            _ => Err(ConcordError::InvalidTag {
                field: "image_request_type",
                tag,
            }),
        }
    }
}

impl Encode for ProfileImageRequestType {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        out.put_u8(*self as u8);
        Ok(())
    }
}

impl Decode for ProfileImageRequestType {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (tag, next) = u8::decode(buf, offset)?;
        Ok((ProfileImageRequestType::try_from(tag)?, next))
    }
}
