//! Call-result collection for the Steamworks flat API.
//!
//! Asynchronous native calls return a [`CallHandle`](steambridge_native::CallHandle);
//! the [`Poller`] pumps the native queue until the call completes, fetches
//! the raw result and hands it to the [`decode`] dispatcher.
//!
//! # Result layouts
//!
//! Several Workshop and networking results use non-default packing. Their
//! offsets live in [`layouts`] as named constants and are decoded by hand:
//!
//! ```text
//! CreateItemResult_t (3403, 16 bytes):
//!   [0..4   i32 m_eResult]
//!   [4..12  u64 m_nPublishedFileId]
//!   [12     bool m_bUserNeedsToAcceptWorkshopLegalAgreement]
//!   [13..16 padding]
//! ```
//!
//! All other results are decoded generically from their naturally aligned
//! shape.

pub mod buffer;
pub mod decode;
pub mod error;
pub mod ids;
pub mod layouts;
pub mod poller;
pub mod shape;
pub mod value;

pub use decode::{
    CallbackResult, ConnectionState, ConnectionStatusChanged, CreateItemResult,
    FavoriteItemsChanged, GetItemVoteResult, PublishedFileResult, SetItemVoteResult,
    SubmitItemUpdateResult, decode, decode_connection_status,
};
pub use error::DecodeError;
pub use layouts::shape_for;
pub use poller::{PollOptions, Poller};
pub use shape::{AlignedField, Layout, PackedField, Primitive, ResultShape};
pub use value::{FieldValue, GenericResult};
