//! X2AP capture validation tests
//!
//! Byte-exact aligned PER vectors for complete X2AP PDUs. Every vector is
//! decoded to its expected field values and re-encoded byte for byte.

#[cfg(test)]
mod tests {
    use crate::ie::{
        AllocationAndRetentionPriority, AsSecurityInformation, BitRate, Cause, CauseMisc, CauseRadioNetwork,
        CellSize, CellType, ERabId, ERabLevelQosParameters, ERabsToBeSetupItem, ERabsToBeSetupList, Ecgi,
        EutranCellIdentifier, GtpTunnelEndpoint, GuGroupId, Gummei, LastVisitedCell,
        LastVisitedEutranCellInformation, MmeCode, MmeGroupId, PlmnIdentity, PreEmptionCapability,
        PreEmptionVulnerability, PriorityLevel, Qci, TimeUeStayedInCell, UeAggregateMaximumBitRate,
        UeContextInformation, UeHistoryInformation, UeS1apId, UeSecurityCapabilities, UeX2apId,
    };
    use crate::messages::{HandoverRequest, ResetRequest, UeContextRelease};
    use crate::pdu::{InitiatingMessage, X2apPdu};
    use x2ap_core::{BitString, DecodeError, X2apError};

    // ========================================================================
    // Handover Request
    // ========================================================================

    /// HandoverRequest with only the mandatory IEs, one E-RAB and one
    /// visited cell. The message value is 130 octets, so the PDU open type
    /// uses the two-octet length determinant.
    const HANDOVER_REQUEST: [u8; 135] = [
        // initiatingMessage, handoverPreparation, reject, length 130
        0x00, 0x00, 0x00, 0x80, 0x82,
        // 6 protocol IEs
        0x00, 0x00, 0x06,
        // Old-eNB-UE-X2AP-ID = 7
        0x00, 0x0A, 0x00, 0x02, 0x00, 0x07,
        // Cause = radioNetwork handover-desirable-for-radio-reasons
        0x00, 0x05, 0x40, 0x02, 0x00, 0x00,
        // TargetCell-ID = 001/01, 0x0123456
        0x00, 0x0B, 0x00, 0x08, 0x00, 0x00, 0xF1, 0x10, 0x01, 0x23, 0x45, 0x60,
        // GUMMEI
        0x00, 0x17, 0x00, 0x07, 0x00, 0x00, 0xF1, 0x10, 0x80, 0x01, 0x02,
        // UE-ContextInformation, 72 octets
        0x00, 0x0E, 0x00, 0x48,
        0x00, 0x01, 0x1C, 0x00, 0x0C, 0x00, 0x00,
        0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11,
        0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11,
        0x43, 0x05, 0xF5, 0xE1, 0x00, 0x60, 0x02, 0xFA, 0xF0, 0x80,
        // E-RABs-ToBeSetup-List with one item
        0x00, 0x00, 0x04, 0x40, 0x0E,
        0x05, 0x00, 0x09, 0x3C, 0x03, 0xE0, 0x0A, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
        // RRC-Context
        0x03, 0x0A, 0x0B, 0x0C,
        // UE-HistoryInformation
        0x00, 0x0F, 0x40, 0x0C, 0x00, 0x00, 0x00, 0xF1, 0x10, 0x01, 0x23, 0x45, 0x60, 0x80, 0x00, 0x0A,
    ];

    fn test_plmn() -> PlmnIdentity {
        PlmnIdentity([0x00, 0xF1, 0x10])
    }

    fn test_cell() -> Ecgi {
        Ecgi::new(test_plmn(), EutranCellIdentifier::new(0x0123456).unwrap())
    }

    fn handover_request() -> HandoverRequest {
        HandoverRequest {
            old_enb_ue_x2ap_id: UeX2apId(7),
            cause: Cause::RadioNetwork(CauseRadioNetwork::HandoverDesirableForRadioReasons),
            target_cell_id: test_cell(),
            gummei: Gummei {
                gu_group_id: GuGroupId {
                    plmn_identity: test_plmn(),
                    mme_group_id: MmeGroupId([0x80, 0x01]),
                    ie_extensions: None,
                },
                mme_code: MmeCode(0x02),
                ie_extensions: None,
            },
            ue_context_information: UeContextInformation {
                mme_ue_s1ap_id: UeS1apId(1),
                ue_security_capabilities: UeSecurityCapabilities {
                    encryption_algorithms: BitString::new(vec![0xE0, 0x00], 16).unwrap(),
                    integrity_protection_algorithms: BitString::new(vec![0xC0, 0x00], 16).unwrap(),
                    ie_extensions: None,
                },
                as_security_information: AsSecurityInformation {
                    key_enodeb_star: [0x11; 32],
                    next_hop_chaining_count: 2,
                    ie_extensions: None,
                },
                ue_aggregate_maximum_bit_rate: UeAggregateMaximumBitRate {
                    downlink: BitRate(100_000_000),
                    uplink: BitRate(50_000_000),
                    ie_extensions: None,
                },
                subscriber_profile_id_for_rfp: None,
                e_rabs_to_be_setup_list: ERabsToBeSetupList(vec![ERabsToBeSetupItem {
                    e_rab_id: ERabId(5),
                    e_rab_level_qos_parameters: ERabLevelQosParameters {
                        qci: Qci(9),
                        allocation_and_retention_priority: AllocationAndRetentionPriority {
                            priority_level: PriorityLevel::NO_PRIORITY,
                            pre_emption_capability: PreEmptionCapability::ShallNotTriggerPreEmption,
                            pre_emption_vulnerability: PreEmptionVulnerability::NotPreEmptable,
                            ie_extensions: None,
                        },
                        gbr_qos_information: None,
                        ie_extensions: None,
                    },
                    dl_forwarding: None,
                    ul_gtp_tunnel_endpoint: GtpTunnelEndpoint::ipv4([10, 0, 0, 1], [0, 0, 0, 1]).unwrap(),
                    ie_extensions: None,
                }]),
                rrc_context: vec![0x0A, 0x0B, 0x0C],
                handover_restriction_list: None,
                location_reporting_information: None,
                ie_extensions: None,
            },
            ue_history_information: UeHistoryInformation(vec![LastVisitedCell::EUtran(
                LastVisitedEutranCellInformation {
                    global_cell_id: test_cell(),
                    cell_type: CellType {
                        cell_size: CellSize::Small,
                        ie_extensions: None,
                    },
                    time_ue_stayed_in_cell: TimeUeStayedInCell(10),
                    ie_extensions: None,
                },
            )]),
        }
    }

    #[test]
    fn test_handover_request_capture_decode() {
        let pdu = X2apPdu::decode(&HANDOVER_REQUEST).expect("Failed to decode");
        let request = match &pdu {
            X2apPdu::InitiatingMessage(InitiatingMessage::HandoverRequest(request)) => request,
            other => panic!("Expected HandoverRequest, got {:?}", other),
        };
        assert_eq!(request.old_enb_ue_x2ap_id, UeX2apId(7));
        assert_eq!(request.target_cell_id.plmn_identity.mcc_mnc(), ("001".to_string(), "01".to_string()));
        assert_eq!(request.target_cell_id.eutran_cell_identifier.macro_enb_id(), 0x01234);
        assert_eq!(request.gummei.mme_code, MmeCode(0x02));

        let context = &request.ue_context_information;
        assert_eq!(context.ue_aggregate_maximum_bit_rate.downlink, BitRate(100_000_000));
        assert_eq!(context.as_security_information.next_hop_chaining_count, 2);
        assert_eq!(context.e_rabs_to_be_setup_list.0.len(), 1);
        assert_eq!(context.e_rabs_to_be_setup_list.0[0].e_rab_id, ERabId(5));
        assert_eq!(context.rrc_context, vec![0x0A, 0x0B, 0x0C]);

        assert_eq!(pdu, X2apPdu::InitiatingMessage(InitiatingMessage::HandoverRequest(handover_request())));
    }

    #[test]
    fn test_handover_request_capture_encode() {
        let pdu = X2apPdu::InitiatingMessage(InitiatingMessage::HandoverRequest(handover_request()));
        let encoded = pdu.encode().expect("Failed to encode");
        assert_eq!(encoded.as_ref(), &HANDOVER_REQUEST[..]);
    }

    // ========================================================================
    // Malformed input
    // ========================================================================

    #[test]
    fn test_extension_bit_rejected_at_every_level() {
        // PDU CHOICE
        let mut bytes = HANDOVER_REQUEST;
        bytes[0] |= 0x80;
        assert_eq!(
            X2apPdu::decode(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "X2AP-PDU" })
        );

        // HandoverRequest SEQUENCE
        let mut bytes = HANDOVER_REQUEST;
        bytes[5] |= 0x80;
        assert_eq!(
            X2apPdu::decode(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "HandoverRequest" })
        );

        // Cause CHOICE inside the second IE
        let mut bytes = HANDOVER_REQUEST;
        bytes[18] |= 0x80;
        assert_eq!(
            X2apPdu::decode(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "Cause" })
        );
    }

    #[test]
    fn test_truncated_capture_rejected() {
        for len in [0, 1, 4, 5, 40, 134] {
            let err = X2apPdu::decode(&HANDOVER_REQUEST[..len]).unwrap_err();
            assert!(err.is_decode(), "length {}: {:?}", len, err);
        }
    }

    #[test]
    fn test_missing_mandatory_ie() {
        // UEContextRelease with only the Old-eNB-UE-X2AP-ID
        let bytes = [
            0x00, 0x05, 0x00, 0x09, //
            0x00, 0x00, 0x01, 0x00, 0x0A, 0x00, 0x02, 0x00, 0x01,
        ];
        assert_eq!(
            X2apPdu::decode(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::MissingIe { id: 9 })
        );
    }

    // ========================================================================
    // Cursor isolation
    // ========================================================================

    #[test]
    fn test_concurrent_codecs_are_isolated() {
        let reset = X2apPdu::InitiatingMessage(InitiatingMessage::ResetRequest(ResetRequest {
            cause: Cause::Misc(CauseMisc::OmIntervention),
        }));
        let release = X2apPdu::InitiatingMessage(InitiatingMessage::UeContextRelease(UeContextRelease {
            old_enb_ue_x2ap_id: UeX2apId(1),
            new_enb_ue_x2ap_id: UeX2apId(2),
        }));
        let expected_reset = reset.encode().unwrap();
        let expected_release = release.encode().unwrap();

        std::thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|i| {
                    let reset = &reset;
                    let release = &release;
                    scope.spawn(move || {
                        for _ in 0..100 {
                            let (pdu, other) = if i % 2 == 0 { (reset, release) } else { (release, reset) };
                            let bytes = pdu.encode().unwrap();
                            assert_eq!(&X2apPdu::decode(&bytes).unwrap(), pdu);
                            assert_ne!(&X2apPdu::decode(&bytes).unwrap(), other);
                        }
                        (reset.encode().unwrap(), release.encode().unwrap())
                    })
                })
                .collect();
            for worker in workers {
                let (reset_bytes, release_bytes) = worker.join().unwrap();
                assert_eq!(reset_bytes, expected_reset);
                assert_eq!(release_bytes, expected_release);
            }
        });

        // reset is procedure 7 with criticality reject
        assert_eq!(&expected_reset[..4], &[0x00, 0x07, 0x00, 0x08]);
        // UE context release is procedure 5 with criticality ignore
        assert_eq!(&expected_release[..4], &[0x00, 0x05, 0x40, 0x0F]);
    }
}
