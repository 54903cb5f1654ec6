use dg_pot_core::blockchain::class_group_element::ClassgroupElement;
use dg_pot_core::blockchain::sub_epoch_summary::SubEpochSummary;
use dg_pot_core::blockchain::subslot_bundle::EndOfSubSlotBundle;
use dg_pot_core::blockchain::vdf_proof::VdfProof;
use dg_pot_core::consensus::constants::MAINNET;
use dg_pot_core::errors::ConsensusErrorKind;
use dg_pot_serialize::Streamable;
use dg_pot_tests::{
    bytes32, end_of_sub_slot, full_block, vdf_info, vdf_proof, BlockParams, HashVdfVerifier,
};

#[test]
fn test_valid_bundles() {
    assert!(end_of_sub_slot(1, true, true, 0).validate(&MAINNET).is_ok());
    assert!(end_of_sub_slot(2, false, false, 16).validate(&MAINNET).is_ok());
    let bundle = end_of_sub_slot(3, true, false, 4);
    assert!(bundle.validate(&MAINNET).is_ok());
    assert_eq!(bundle.challenge_chain.infused_challenge_chain_sub_slot_hash, None);
    assert_eq!(EndOfSubSlotBundle::parse(&bundle.to_bytes()).unwrap(), bundle);
}

#[test]
fn test_challenge_chain_icc_hash_follows_deficit() {
    let full = end_of_sub_slot(4, true, true, MAINNET.min_blocks_per_challenge_block);
    assert!(full.validate(&MAINNET).is_ok());
    assert_eq!(
        full.challenge_chain.infused_challenge_chain_sub_slot_hash,
        full.infused_challenge_chain_hash()
    );

    // Dropping the hash at the full deficit is rejected.
    let mut missing = full.clone();
    missing.challenge_chain.infused_challenge_chain_sub_slot_hash = None;
    missing.reward_chain.challenge_chain_sub_slot_hash = missing.challenge_chain_hash();
    assert_eq!(
        missing.validate(&MAINNET).unwrap_err().kind(),
        ConsensusErrorKind::Validation
    );

    // Carrying it below the full deficit is rejected too.
    let mut stray = end_of_sub_slot(5, true, true, 4);
    stray.challenge_chain.infused_challenge_chain_sub_slot_hash =
        stray.infused_challenge_chain_hash();
    stray.reward_chain.challenge_chain_sub_slot_hash = stray.challenge_chain_hash();
    assert_eq!(
        stray.validate(&MAINNET).unwrap_err().kind(),
        ConsensusErrorKind::Validation
    );

    // Without an infused challenge chain there is nothing to commit to at any deficit.
    let mut no_icc = end_of_sub_slot(6, false, true, MAINNET.min_blocks_per_challenge_block);
    assert!(no_icc.validate(&MAINNET).is_ok());
    no_icc.challenge_chain.infused_challenge_chain_sub_slot_hash = Some(bytes32(6));
    no_icc.reward_chain.challenge_chain_sub_slot_hash = no_icc.challenge_chain_hash();
    assert!(no_icc.validate(&MAINNET).is_err());
}

#[test]
fn test_partial_icc_triple_rejected() {
    let mut missing_proof = end_of_sub_slot(1, true, true, 0);
    missing_proof.proofs.infused_challenge_chain_slot_proof = None;
    assert_eq!(
        missing_proof.validate(&MAINNET).unwrap_err().kind(),
        ConsensusErrorKind::Validation
    );

    let mut missing_sub_slot = end_of_sub_slot(1, true, true, 0);
    missing_sub_slot.infused_challenge_chain = None;
    assert!(missing_sub_slot.validate(&MAINNET).is_err());

    let mut stray_hash = end_of_sub_slot(1, false, true, 0);
    stray_hash.reward_chain.infused_challenge_chain_sub_slot_hash = Some(bytes32(1));
    assert!(stray_hash.validate(&MAINNET).is_err());
}

#[test]
fn test_icc_hash_must_match() {
    let mut bundle = end_of_sub_slot(1, true, true, 0);
    bundle.reward_chain.infused_challenge_chain_sub_slot_hash = Some(bytes32(99));
    assert!(bundle.validate(&MAINNET).is_err());
}

#[test]
fn test_reward_chain_commits_to_challenge_chain() {
    let mut bundle = end_of_sub_slot(1, false, true, 0);
    bundle.reward_chain.challenge_chain_sub_slot_hash = bytes32(42);
    assert_eq!(
        bundle.validate(&MAINNET).unwrap_err().kind(),
        ConsensusErrorKind::Validation
    );
}

#[test]
fn test_deficit_bound() {
    let bundle = end_of_sub_slot(1, false, true, 17);
    assert_eq!(
        bundle.validate(&MAINNET).unwrap_err().kind(),
        ConsensusErrorKind::Range
    );
}

#[test]
fn test_difficulty_change_needs_both_values() {
    let mut bundle = end_of_sub_slot(1, false, true, 0);
    bundle.challenge_chain.new_difficulty = Some(10);
    // Recommit so only the difficulty pairing is wrong.
    bundle.reward_chain.challenge_chain_sub_slot_hash = bundle.challenge_chain_hash();
    assert!(bundle.validate(&MAINNET).is_err());
    bundle.challenge_chain.new_sub_slot_iters = Some(MAINNET.sub_slot_iters_starting);
    bundle.reward_chain.challenge_chain_sub_slot_hash = bundle.challenge_chain_hash();
    assert!(bundle.validate(&MAINNET).is_ok());
}

#[test]
fn test_sub_epoch_summary_pairing() {
    let mut ses = SubEpochSummary {
        prev_subepoch_summary_hash: bytes32(1),
        reward_chain_hash: bytes32(2),
        num_blocks_overflow: 0,
        new_difficulty: None,
        new_sub_slot_iters: Some(1024),
    };
    assert!(ses.validate().is_err());
    ses.new_difficulty = Some(7);
    assert!(ses.validate().is_ok());
    assert!(ses.is_epoch_boundary());
}

#[test]
fn test_fully_compactified() {
    let block = full_block(BlockParams {
        finished_sub_slots: vec![end_of_sub_slot(1, true, true, 0)],
        ..Default::default()
    });
    assert!(block.is_fully_compactified());

    let mut no_sp_proof = block.clone();
    no_sp_proof.challenge_chain_sp_proof = None;
    assert!(no_sp_proof.is_fully_compactified());

    let mut bad_sp = block.clone();
    bad_sp.challenge_chain_sp_proof = Some(vdf_proof(false));
    assert!(!bad_sp.is_fully_compactified());

    let mut not_normalized = block.clone();
    not_normalized.challenge_chain_ip_proof.normalized_to_identity = false;
    assert!(!not_normalized.is_fully_compactified());

    let mut bad_witness = block.clone();
    bad_witness.challenge_chain_ip_proof.witness_type = 1;
    assert!(!bad_witness.is_fully_compactified());

    let mut bad_icc_slot = block.clone();
    bad_icc_slot.finished_sub_slots[0]
        .proofs
        .infused_challenge_chain_slot_proof = Some(vdf_proof(false));
    assert!(!bad_icc_slot.is_fully_compactified());

    let mut bad_cc_slot = block.clone();
    bad_cc_slot.finished_sub_slots[0]
        .proofs
        .challenge_chain_slot_proof
        .normalized_to_identity = false;
    assert!(!bad_cc_slot.is_fully_compactified());

    // Reward chain proofs are never compact and do not count.
    assert!(!block.reward_chain_ip_proof.is_compact());

    let uncompacted = full_block(BlockParams {
        compact: false,
        ..Default::default()
    });
    assert!(!uncompacted.is_fully_compactified());
}

#[test]
fn test_vdf_proof_validate() {
    let info = vdf_info(8, 4096);
    let input = ClassgroupElement::get_default_element();
    let good = VdfProof {
        witness_type: 0,
        witness: info.get_hash().to_vec(),
        normalized_to_identity: true,
    };
    assert!(good.validate(&MAINNET, &HashVdfVerifier, &input, &info).is_ok());

    let wrong_witness = VdfProof {
        witness: vec![0; 32],
        ..good.clone()
    };
    assert_eq!(
        wrong_witness
            .validate(&MAINNET, &HashVdfVerifier, &input, &info)
            .unwrap_err()
            .kind(),
        ConsensusErrorKind::Validation
    );

    let too_large = VdfProof {
        witness_type: MAINNET.max_vdf_witness_size,
        ..good
    };
    assert!(too_large
        .validate(&MAINNET, &HashVdfVerifier, &input, &info)
        .is_err());
}

#[test]
fn test_default_classgroup_element() {
    let el = ClassgroupElement::get_default_element();
    assert_eq!(el.data.as_ref()[0], 0x08);
    assert!(el.data.as_ref()[1..].iter().all(|b| *b == 0));
}
