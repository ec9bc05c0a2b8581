//! Request and response payloads, one type per event kind.
//!
//! Layouts follow the service: fixed-size identifiers lead where the format
//! allows, variable-length fields follow, and every variable field carries
//! its own length prefix so decoders only ever move forward.

pub mod auth;
pub mod channel;
pub mod invite;
pub mod member;
pub mod profile;
pub mod server;

pub use auth::{AuthRequest, AuthResponse, Challenge};
pub use channel::{
    AddChannelRequest, AddChannelResponse, DeleteChannelRequest, DeleteChannelResponse,
    GetChannelsRequest, GetChannelsResponse, ModifyChannelRequest, ModifyChannelResponse,
};
pub use invite::{
    AcceptInviteRequest, AcceptInviteResponse, CreateInviteRequest, CreateInviteResponse,
    DeleteInviteRequest, DeleteInviteResponse, JoinServerRequest, JoinServerResponse,
    ListInvitesRequest, ListInvitesResponse, ModifyInviteRequest, ModifyInviteResponse,
    ViewInviteRequest, ViewInviteResponse,
};
pub use member::{GetMembersRequest, GetMembersResponse};
pub use profile::{GetProfileRequest, GetProfileResponse, SetProfileRequest, SetProfileResponse};
pub use server::{
    CreateServerRequest, DeleteServerRequest, GetServersRequest, GetServersResponse,
    ModifyServerRequest,
};

/// Declare a response that only reports success.
macro_rules! ack_response {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
        pub struct $name {
            pub success: bool,
        }

        $crate::protocol::wire::wire_struct!($name { success });
    };
}

pub(crate) use ack_response;
