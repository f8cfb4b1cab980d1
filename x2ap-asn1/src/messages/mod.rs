//! X2AP message codecs
//!
//! Each message is `SEQUENCE { protocolIEs ProtocolIE-Container, ... }`.
//! Mandatory IEs that are absent fail with `MissingIe`, repeated IEs with
//! `DuplicateIe`. IEs a message does not know are handled by
//! [`ProtocolIeContainerReader::finish`].

pub mod container;
pub mod handover;
pub mod management;
pub mod status_transfer;

pub use container::{ProtocolIeContainerReader, ProtocolIeContainerWriter};
pub use handover::{
    HandoverCancel, HandoverPreparationFailure, HandoverRequest, HandoverRequestAcknowledge,
    TargetEnbToSourceEnbTransparentContainer,
};
pub use management::{ErrorIndication, ResetRequest, ResetResponse};
pub use status_transfer::{SnStatusTransfer, UeContextRelease};
