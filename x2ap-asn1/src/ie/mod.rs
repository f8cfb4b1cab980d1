//! X2AP information element codecs
//!
//! Every IE implements [`PerCodec`](crate::per::PerCodec). SEQUENCE types
//! write their extension bit and OPTIONAL presence bits first, then their
//! fields in declaration order. Only root values are modelled; any value
//! that would need an extension addition fails to encode, and a set
//! extension bit fails to decode.

pub mod cause;
pub mod common;
pub mod criticality_diagnostics;
pub mod erab;
pub mod history;
pub mod identity;
pub mod status_transfer;
pub mod ue_context;

pub use cause::{Cause, CauseMisc, CauseProtocol, CauseRadioNetwork, CauseTransport};
pub use common::{
    ContainerItem, Criticality, ProcedureCode, ProtocolExtensionContainer, ProtocolExtensionField,
    ProtocolIeId, TriggeringMessage, TypeOfError,
};
pub use criticality_diagnostics::{CriticalityDiagnostics, CriticalityDiagnosticsIeItem};
pub use erab::{
    AllocationAndRetentionPriority, DlForwarding, ERabId, ERabItem, ERabLevelQosParameters, ERabList,
    ERabsAdmittedItem, ERabsAdmittedList, ERabsToBeSetupItem, ERabsToBeSetupList, GbrQosInformation,
    GtpTunnelEndpoint, PreEmptionCapability, PreEmptionVulnerability, PriorityLevel, Qci,
};
pub use history::{
    CellSize, CellType, LastVisitedCell, LastVisitedEutranCellInformation, LastVisitedGeranCellInformation,
    TimeUeStayedInCell, UeHistoryInformation,
};
pub use identity::{Ecgi, EutranCellIdentifier, GuGroupId, Gummei, MmeCode, MmeGroupId, PlmnIdentity, UeX2apId};
pub use status_transfer::{CountValue, ERabsSubjectToStatusTransferItem, ERabsSubjectToStatusTransferList};
pub use ue_context::{
    AsSecurityInformation, BitRate, EventType, ForbiddenInterRats, ForbiddenLasItem, ForbiddenTasItem,
    HandoverRestrictionList, Lac, LocationReportingInformation, ReportArea, SubscriberProfileIdForRfp, Tac,
    UeAggregateMaximumBitRate, UeContextInformation, UeS1apId, UeSecurityCapabilities,
};
