//! Discriminant registry.
//!
//! A static, read-only table maps each discriminant to its event kind,
//! its direction, and its payload decoder. The table is append-only: a
//! shipped discriminant is never renumbered or reused.

use bytes::BytesMut;
use serde::Serialize;

use crate::error::{ConcordError, Result};
use crate::protocol::payload::*;
use crate::protocol::wire::{Decode, Encode};

/// Which side of the connection produces a payload kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Client encodes, service decodes.
    ClientToServer,
    /// Service encodes, client decodes.
    ServerToClient,
}

/// Payload decoder stored in the registry.
pub type DecodeFn = fn(&[u8], usize) -> Result<(Payload, usize)>;

/// One registry row.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: EventKind,
    pub direction: Direction,
    pub decode: DecodeFn,
}

fn decode_as<T>(buf: &[u8], offset: usize) -> Result<(Payload, usize)>
where
    T: Decode + Into<Payload>,
{
    let (value, next) = T::decode(buf, offset)?;
    Ok((value.into(), next))
}

macro_rules! define_events {
    (@reply) => { None };
    (@reply $reply:ident) => { Some(EventKind::$reply) };
    (@dir Out) => { Direction::ClientToServer };
    (@dir In) => { Direction::ServerToClient };

    ($( $name:ident = $disc:literal, $dir:ident $(-> $reply:ident)? ; )*) => {
        /// Event kind, i.e. the big-endian u16 discriminant of an envelope.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[repr(u16)]
        pub enum EventKind {
            $( $name = $disc, )*
        }

        impl EventKind {
            /// Every registered kind, in discriminant order.
            pub const ALL: &'static [EventKind] = &[ $( EventKind::$name, )* ];

            pub fn as_u16(self) -> u16 {
                self as u16
            }

            pub fn name(self) -> &'static str {
                match self {
                    $( EventKind::$name => stringify!($name), )*
                }
            }

            pub fn direction(self) -> Direction {
                match self {
                    $( EventKind::$name => define_events!(@dir $dir), )*
                }
            }

            /// The kind the service answers with, echoing the request id.
            pub fn response(self) -> Option<EventKind> {
                match self {
                    $( EventKind::$name => define_events!(@reply $($reply)?), )*
                }
            }
        }

        impl TryFrom<u16> for EventKind {
            type Error = ConcordError;

            fn try_from(disc: u16) -> Result<Self> {
                match disc {
                    $( $disc => Ok(EventKind::$name), )*
                    other => Err(ConcordError::UnknownEventType(other)),
                }
            }
        }

        /// A decoded or to-be-encoded payload of any kind.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(tag = "kind", content = "body")]
        pub enum Payload {
            $( $name($name), )*
        }

        impl Payload {
            pub fn kind(&self) -> EventKind {
                match self {
                    $( Payload::$name(_) => EventKind::$name, )*
                }
            }

            /// Append the payload bytes (no header).
            pub fn encode_body(&self, out: &mut BytesMut) -> Result<()> {
                match self {
                    $( Payload::$name(body) => body.encode(out), )*
                }
            }
        }

        $(
            impl From<$name> for Payload {
                fn from(body: $name) -> Self {
                    Payload::$name(body)
                }
            }
        )*

        static REGISTRY: &[KindSpec] = &[
            $(
                KindSpec {
                    kind: EventKind::$name,
                    direction: define_events!(@dir $dir),
                    decode: decode_as::<$name>,
                },
            )*
        ];
    };
}

define_events! {
    AuthRequest = 0, Out -> AuthResponse;
    Challenge = 1, In;
    AuthResponse = 2, In;
    GetServersRequest = 3, Out -> GetServersResponse;
    GetServersResponse = 4, In;
    CreateServerRequest = 5, Out;
    DeleteServerRequest = 6, Out;
    ModifyServerRequest = 7, Out;
    GetChannelsRequest = 8, Out -> GetChannelsResponse;
    GetChannelsResponse = 9, In;
    DeleteChannelRequest = 10, Out -> DeleteChannelResponse;
    DeleteChannelResponse = 11, In;
    ModifyChannelRequest = 12, Out -> ModifyChannelResponse;
    ModifyChannelResponse = 13, In;
    AddChannelRequest = 14, Out -> AddChannelResponse;
    AddChannelResponse = 15, In;
    GetMembersRequest = 16, Out -> GetMembersResponse;
    GetMembersResponse = 17, In;
    CreateInviteRequest = 18, Out -> CreateInviteResponse;
    CreateInviteResponse = 19, In;
    ListInvitesRequest = 20, Out -> ListInvitesResponse;
    ListInvitesResponse = 21, In;
    ModifyInviteRequest = 22, Out -> ModifyInviteResponse;
    ModifyInviteResponse = 23, In;
    DeleteInviteRequest = 24, Out -> DeleteInviteResponse;
    DeleteInviteResponse = 25, In;
    ViewInviteRequest = 26, Out -> ViewInviteResponse;
    ViewInviteResponse = 27, In;
    AcceptInviteRequest = 28, Out -> AcceptInviteResponse;
    AcceptInviteResponse = 29, In;
    JoinServerRequest = 30, Out -> JoinServerResponse;
    JoinServerResponse = 31, In;
    GetProfileRequest = 32, Out -> GetProfileResponse;
    GetProfileResponse = 33, In;
    SetProfileRequest = 34, Out -> SetProfileResponse;
    SetProfileResponse = 35, In;
}

/// Look up the registry row for a discriminant.
pub fn lookup(disc: u16) -> Result<&'static KindSpec> {
    REGISTRY
        .iter()
        .find(|spec| spec.kind.as_u16() == disc)
        .ok_or(ConcordError::UnknownEventType(disc))
}

/// All registry rows, in discriminant order.
pub fn entries() -> &'static [KindSpec] {
    REGISTRY
}
