use crate::{SP64_CONSTANTS, SP64_SUB_SLOT_ITERS, TEST_CONSTANTS};
use dg_pot_core::blockchain::sized_bytes::Bytes32;
use dg_pot_core::consensus::pot_iterations::{
    calculate_ip_iters, calculate_iterations_quality, calculate_sp_interval_iters,
    calculate_sp_iters, expected_plot_size, is_overflow_block,
};
use dg_pot_core::errors::ConsensusErrorKind;
use dg_pot_serialize::hash_256;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

#[tokio::test]
async fn test_pot_iterations() {
    assert!(!is_overflow_block(&TEST_CONSTANTS, 27).unwrap());
    assert!(!is_overflow_block(&TEST_CONSTANTS, 28).unwrap());
    assert!(is_overflow_block(&TEST_CONSTANTS, 29).unwrap());
    assert!(is_overflow_block(&TEST_CONSTANTS, 30).unwrap());
    assert!(is_overflow_block(&TEST_CONSTANTS, 31).unwrap());
    assert_eq!(
        is_overflow_block(&TEST_CONSTANTS, 32).unwrap_err().kind(),
        ConsensusErrorKind::Range
    );
}

#[tokio::test]
async fn test_overflow_threshold() {
    let threshold = SP64_CONSTANTS.num_sps_sub_slot as u8 - 3;
    for index in 0..SP64_CONSTANTS.num_sps_sub_slot as u8 {
        assert_eq!(
            is_overflow_block(&SP64_CONSTANTS, index).unwrap(),
            index >= threshold
        );
    }
    assert!(!is_overflow_block(&SP64_CONSTANTS, 31).unwrap());
    assert!(is_overflow_block(&SP64_CONSTANTS, 61).unwrap());
    assert!(!is_overflow_block(&SP64_CONSTANTS, 60).unwrap());
}

#[tokio::test]
async fn test_calculate_sp_iters() {
    let ssi: u64 = 100001 * 64 * 4;
    assert!(calculate_sp_iters(&TEST_CONSTANTS, ssi, 32).is_err());
    assert!(calculate_sp_iters(&TEST_CONSTANTS, ssi, 31).is_ok());
    let interval = calculate_sp_interval_iters(&TEST_CONSTANTS, ssi).unwrap();
    for index in 0..32u8 {
        assert_eq!(
            calculate_sp_iters(&TEST_CONSTANTS, ssi, index).unwrap(),
            interval * u64::from(index)
        );
    }
}

#[tokio::test]
async fn test_sp_interval_iters_requires_divisible_ssi() {
    let err = calculate_sp_interval_iters(&TEST_CONSTANTS, 100001 * 64 * 4 + 1).unwrap_err();
    assert_eq!(err.kind(), ConsensusErrorKind::Config);
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_calculate_ip_iters() {
    let ssi: u64 = 100001 * 64 * 4;
    let sp_interval_iters = ssi / TEST_CONSTANTS.num_sps_sub_slot as u64;
    //Invalid signage point index
    assert_eq!(
        calculate_ip_iters(&TEST_CONSTANTS, ssi, 123, 100000)
            .unwrap_err()
            .kind(),
        ConsensusErrorKind::Range
    );
    let mut sp_iters = sp_interval_iters * 13;
    //required_iters too high
    assert_eq!(
        calculate_ip_iters(&TEST_CONSTANTS, ssi, 13, sp_interval_iters)
            .unwrap_err()
            .kind(),
        ConsensusErrorKind::Validation
    );
    //required_iters too high
    assert!(calculate_ip_iters(&TEST_CONSTANTS, ssi, 13, sp_interval_iters * 12).is_err());
    //required_iters too low (0)
    assert_eq!(
        calculate_ip_iters(&TEST_CONSTANTS, ssi, 13, 0)
            .unwrap_err()
            .kind(),
        ConsensusErrorKind::Validation
    );

    let mut required_iters = sp_interval_iters - 1;
    let mut ip_iters = calculate_ip_iters(&TEST_CONSTANTS, ssi, 13, required_iters).unwrap();
    assert_eq!(
        ip_iters,
        sp_iters + TEST_CONSTANTS.num_sp_intervals_extra * sp_interval_iters + required_iters
    );

    required_iters = 1;
    ip_iters = calculate_ip_iters(&TEST_CONSTANTS, ssi, 13, required_iters).unwrap();
    assert_eq!(
        ip_iters,
        sp_iters + TEST_CONSTANTS.num_sp_intervals_extra * sp_interval_iters + required_iters
    );

    required_iters = ssi * 4 / 300;
    ip_iters = calculate_ip_iters(&TEST_CONSTANTS, ssi, 13, required_iters).unwrap();
    assert_eq!(
        ip_iters,
        sp_iters + TEST_CONSTANTS.num_sp_intervals_extra * sp_interval_iters + required_iters
    );
    assert!(sp_iters < ip_iters);

    //Overflow
    sp_iters = sp_interval_iters * (TEST_CONSTANTS.num_sps_sub_slot as u64 - 1);
    ip_iters = calculate_ip_iters(
        &TEST_CONSTANTS,
        ssi,
        TEST_CONSTANTS.num_sps_sub_slot as u8 - 1,
        required_iters,
    )
    .unwrap();
    assert_eq!(
        ip_iters,
        (sp_iters + TEST_CONSTANTS.num_sp_intervals_extra * sp_interval_iters + required_iters)
            % ssi
    );
    assert!(sp_iters > ip_iters);
}

#[tokio::test]
async fn test_infusion_point_scenarios() {
    let ssi = SP64_SUB_SLOT_ITERS;
    assert_eq!(ssi, 25_600_256);
    let interval = ssi / 64;
    let required_iters = interval - 1;

    let sp_iters = calculate_sp_iters(&SP64_CONSTANTS, ssi, 13).unwrap();
    let ip_iters = calculate_ip_iters(&SP64_CONSTANTS, ssi, 13, required_iters).unwrap();
    assert_eq!(ip_iters, 13 * interval + 3 * interval + required_iters);
    assert!(ip_iters > sp_iters);

    let sp_iters = calculate_sp_iters(&SP64_CONSTANTS, ssi, 63).unwrap();
    let ip_iters = calculate_ip_iters(&SP64_CONSTANTS, ssi, 63, required_iters).unwrap();
    assert_eq!(ip_iters, (63 * interval + 3 * interval + required_iters) % ssi);
    assert!(ip_iters < sp_iters);
}

#[tokio::test]
async fn test_ip_iters_does_not_overflow_u64() {
    let ssi = u64::MAX - (u64::MAX % 32);
    let interval = ssi / 32;
    let ip_iters = calculate_ip_iters(&TEST_CONSTANTS, ssi, 31, interval - 1).unwrap();
    let expected = (u128::from(interval) * 31
        + u128::from(TEST_CONSTANTS.num_sp_intervals_extra) * u128::from(interval)
        + u128::from(interval - 1))
        % u128::from(ssi);
    assert_eq!(u128::from(ip_iters), expected);
}

#[tokio::test]
async fn test_expected_plot_size() {
    assert_eq!(
        expected_plot_size(32),
        BigUint::from(65u32) * BigUint::from(2u64.pow(31))
    );
    for k in 1..60u8 {
        assert!(expected_plot_size(k) < expected_plot_size(k + 1));
    }
}

#[tokio::test]
async fn test_iterations_quality_lower_bound() {
    let zero = Bytes32::default();
    assert_eq!(
        calculate_iterations_quality(1 << 67, &zero, 32, 0, &zero).unwrap(),
        1
    );
    for seed in 0..64u8 {
        let quality: Bytes32 = hash_256([seed]).into();
        let iters = calculate_iterations_quality(1, &quality, 50, 1, &zero).unwrap();
        assert!(iters >= 1);
    }
    assert_eq!(
        calculate_iterations_quality(1 << 67, &zero, 0, 7, &zero)
            .unwrap_err()
            .kind(),
        ConsensusErrorKind::Range
    );
}

#[tokio::test]
async fn test_iterations_quality_saturates() {
    let quality = Bytes32::from([0xffu8; 32]);
    let sp = Bytes32::from([0x01u8; 32]);
    let iters = calculate_iterations_quality(u128::MAX, &quality, 1, u64::MAX, &sp).unwrap();
    assert_eq!(iters, u64::MAX);
}

fn reference_iterations(dcf: u128, quality: &Bytes32, k: u8, difficulty: u64, sp: &Bytes32) -> u64 {
    let mut to_hash = quality.as_ref().to_vec();
    to_hash.extend_from_slice(sp.as_ref());
    let q = BigUint::from_bytes_be(&hash_256(to_hash));
    let plot_size = BigUint::from(2 * u64::from(k) + 1) << (u32::from(k) - 1);
    let iters: BigUint = (BigUint::from(difficulty) * dcf * q * plot_size) >> 256u32;
    iters.to_u64().unwrap_or(u64::MAX).max(1)
}

#[tokio::test]
async fn test_iterations_quality_matches_formula() {
    let quality = Bytes32::from([0x11u8; 32]);
    let sp = Bytes32::from([0x22u8; 32]);
    assert_eq!(
        calculate_iterations_quality(1, &quality, 32, 1, &sp).unwrap(),
        44_459_479_907
    );
    for (k, difficulty, dcf) in [
        (32u8, 1u64, 1u128),
        (32, 1000, 1 << 67),
        (33, 7, 1 << 20),
        (36, 500_000_000_000, 1 << 25),
        (18, 3, 1 << 67),
        (50, 1, 1),
    ] {
        for seed in 0..8u8 {
            let quality: Bytes32 = hash_256([seed, k]).into();
            let sp: Bytes32 = hash_256([k, seed]).into();
            assert_eq!(
                calculate_iterations_quality(dcf, &quality, k, difficulty, &sp).unwrap(),
                reference_iterations(dcf, &quality, k, difficulty, &sp),
                "k={k} difficulty={difficulty} dcf={dcf} seed={seed}"
            );
        }
    }
}

#[tokio::test]
async fn test_iterations_quality_grows_with_plot_size() {
    let quality = Bytes32::from([0x33u8; 32]);
    let sp = Bytes32::from([0x44u8; 32]);
    let mut last = 0;
    for k in 32..=40u8 {
        let iters = calculate_iterations_quality(1, &quality, k, 1, &sp).unwrap();
        assert!(iters > last);
        last = iters;
    }
}
