use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use fletcher_rust::fletcher_common_rs::packet::core::checksum::{
    compute, verify, ChecksumWidth, FletcherAccumulator, FletcherChecksum,
};
use fletcher_rust::fletcher_common_rs::packet::core::bit_utils::BitSequence;
use fletcher_rust::fletcher_common_rs::packet::core::exceptions::{ChecksumWidthError, FletcherError};
use fletcher_rust::fletcher_common_rs::packet::core::message::Message;

fn bits(s: &str) -> BitSequence {
    s.parse().unwrap()
}

fn message(s: &str, width: ChecksumWidth) -> Message {
    Message::parse(s, width).unwrap()
}

fn random_bits(rng: &mut StdRng, len: usize) -> BitSequence {
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

#[test]
fn test_scenario_known_vector() {
    let word = compute(&bits("1010"), ChecksumWidth::default());
    assert_eq!(word.value(), 1538);
    assert_eq!(word.to_string(), "0000011000000010");
}

#[test]
fn test_empty_payload_is_all_zeros() {
    let word = compute(&BitSequence::new(), ChecksumWidth::default());
    assert_eq!(word.to_string(), "0000000000000000");
}

#[test]
fn test_short_message_is_width_error() {
    let short = ChecksumWidthError::MessageTooShort { width: 16, actual: 5 };
    assert_eq!(
        Message::parse("01011", ChecksumWidth::default()),
        Err(FletcherError::Width(short.clone()))
    );
    assert_eq!(FletcherChecksum::default().verify(bits("01011")), Err(short));
}

#[test]
fn test_valid_message_verifies() {
    let report = verify(&message("10100000011000000010", ChecksumWidth::default()));
    assert!(report.valid);
    assert_eq!(report.payload.to_string(), "1010");
}

#[test]
fn test_flipped_last_checksum_bit() {
    let report = verify(&message("10100000011000000011", ChecksumWidth::default()));
    assert!(!report.valid);
    assert_eq!(report.computed.to_string(), "0000011000000010");
    assert_ne!(report.claimed, report.computed);
}

#[test]
fn test_checksum_consistency() {
    let payload = bits("1101001110101");
    for width_bits in [2, 8, 16, 32, 64, 128, 130, 256] {
        let width = ChecksumWidth::new(width_bits).unwrap();
        let first = compute(&payload, width);
        let second = compute(&payload, width);
        assert_eq!(first, second);
    }
}

#[test]
fn test_output_is_exactly_width_binary_chars() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for width_bits in (2..=256).step_by(2) {
        let width = ChecksumWidth::new(width_bits).unwrap();
        let len = rng.gen_range(0..600);
        let payload = random_bits(&mut rng, len);
        let rendered = compute(&payload, width).to_string();
        assert_eq!(rendered.len(), width_bits as usize);
        assert!(rendered.chars().all(|c| c == '0' || c == '1'));
    }
}

#[test]
fn test_round_trip_random_payloads() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let width = ChecksumWidth::new(2 * rng.gen_range(1..=128)).unwrap();
        let len = rng.gen_range(0..1000);
        let payload = random_bits(&mut rng, len);
        let message = Message::encode(&payload, width);

        let report = verify(&message);
        assert!(report.valid, "round trip failed for width {}", width);
        assert_eq!(report.payload, payload);
    }
}

#[test]
fn test_single_bit_flip_in_payload_detected() {
    // 1ビットの反転は sum1 を ±1 変えるので、幅 16 では必ず検出される
    let payload = bits("1010");
    let original = compute(&payload, ChecksumWidth::default());
    for index in 0..payload.len() {
        let corrupted = payload.flipped(index).unwrap();
        assert_ne!(
            compute(&corrupted, ChecksumWidth::default()),
            original,
            "flip at {} not detected",
            index
        );
    }
}

#[test]
fn test_corrupted_message_is_discarded() {
    let message = Message::encode(&bits("111000101101"), ChecksumWidth::default());
    for index in 0..message.len() {
        let corrupted = message.bits().flipped(index).unwrap();
        let corrupted = Message::from_bits(corrupted, ChecksumWidth::default()).unwrap();
        let report = verify(&corrupted);
        assert!(!report.valid, "flip at {} not detected", index);
    }
}

#[test]
fn test_widths_beyond_128_bits() {
    // sum1 は下位半分、sum2 は上位半分の末尾に入り、残りは 0
    let payload = bits("1010");
    for width_bits in [130u32, 256] {
        let width = ChecksumWidth::new(width_bits).unwrap();
        let word = compute(&payload, width);
        let half = (width_bits / 2) as usize;
        let expected = format!("{:0half$b}{:0half$b}", 6, 2, half = half);
        assert_eq!(word.to_string(), expected);
        assert_eq!((word.high_half(), word.low_half()), (6, 2));

        let encoded = Message::encode(&payload, width);
        assert_eq!(encoded.len(), 4 + width_bits as usize);
        let report = verify(&message(&encoded.to_string(), width));
        assert!(report.valid);
        assert_eq!(report.payload, payload);

        let last = encoded.len() - 1;
        let corrupted = Message::from_bits(encoded.bits().flipped(last).unwrap(), width).unwrap();
        assert!(!verify(&corrupted).valid);
    }
}

#[test]
fn test_bit_order_dependency() {
    let width = ChecksumWidth::default();
    assert_ne!(compute(&bits("1100"), width), compute(&bits("0011"), width));
}

#[test]
fn test_chunked_accumulator_matches_one_shot() {
    let mut rng = StdRng::seed_from_u64(7);
    let payload = random_bits(&mut rng, 777);
    let text = payload.to_string();
    let width = ChecksumWidth::new(24).unwrap();

    let mut acc = FletcherAccumulator::new();
    for chunk in text.as_bytes().chunks(50) {
        let part: BitSequence = std::str::from_utf8(chunk).unwrap().parse().unwrap();
        acc.update_bits(&part);
    }
    assert_eq!(acc.finish(width), compute(&payload, width));

    acc.reset();
    assert_eq!(acc.sums(), (0, 0));
}

#[test]
fn test_engine_default_width() {
    let engine = FletcherChecksum::default();
    assert_eq!(engine.width().bits(), 16);
    assert_eq!(engine.compute(&bits("1010")).value(), 1538);
}
