//! Per-server user profiles and avatars.

use serde::Serialize;

use crate::protocol::domain::{ProfileData, ProfileImageRequestType};
use crate::protocol::ident::{Image, Pubkey, ServerId};
use crate::protocol::payload::ack_response;
use crate::protocol::wire::wire_struct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProfileRequest {
    pub user_pubkeys: Vec<Pubkey>,
    pub server_pubkey: Pubkey,
    pub server_id: ServerId,
    pub image_request_type: ProfileImageRequestType,
    pub include_profile_data: bool,
}

wire_struct!(GetProfileRequest {
    user_pubkeys,
    server_pubkey,
    server_id,
    image_request_type,
    include_profile_data,
});

/// One `(avatar, profile)` entry per requested key, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProfileResponse {
    pub entries: Vec<(Option<Image>, Option<ProfileData>)>,
}

wire_struct!(GetProfileResponse { entries });

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetProfileRequest {
    pub server_pubkey: Pubkey,
    pub server_id: ServerId,
    pub avatar: Option<Image>,
    pub profile_data: Option<ProfileData>,
}

wire_struct!(SetProfileRequest {
    server_pubkey,
    server_id,
    avatar,
    profile_data,
});

ack_response!(SetProfileResponse);
