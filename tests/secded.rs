//! End-to-end tests for the public SECDED API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use secded::cs::ecc::hamming::{decode_bytes, encode_bytes, syndrome};
use secded::cs::ecc::layout::parity_bits_for;
use secded::{decode, decode_detailed, encode, BitSequenceMut, DecodeStatus, Error, Layout};

fn random_data(rng: &mut StdRng, len: usize) -> Vec<bool> {
    (0..len).map(|_| rng.gen_bool(0.5)).collect()
}

fn to_vec(bits: &secded::Codeword) -> Vec<bool> {
    bits.iter().by_vals().collect()
}

mod scenarios {
    use super::*;

    fn six_bits() -> Vec<bool> {
        vec![true, false, true, false, true, false]
    }

    #[test]
    fn test_clean_roundtrip() {
        let codeword = encode(six_bits().as_slice());
        assert_eq!(codeword.len(), 6 + parity_bits_for(6) + 1);
        assert_eq!(to_vec(&decode(&codeword).unwrap()), six_bits());
        assert_eq!(encode(six_bits().as_slice()), codeword);
    }

    #[test]
    fn test_flip_index_three() {
        let mut codeword = encode(six_bits().as_slice());
        codeword.flip_bit(3);
        assert_eq!(to_vec(&decode(&codeword).unwrap()), six_bits());
    }

    #[test]
    fn test_empty_data() {
        let empty: Vec<bool> = Vec::new();
        let codeword = encode(&empty);
        assert_eq!(codeword.len(), 1);
        assert!(decode(&codeword).unwrap().is_empty());
    }

    #[test]
    fn test_short_codeword_claimed_long() {
        let codeword = vec![false; 5];
        let result = Layout::for_data_len(10).decode(&codeword);
        assert!(matches!(result, Err(Error::MalformedInput { length: 5, .. })));

        // The length alone is malformed too
        assert!(matches!(
            decode(&codeword),
            Err(Error::MalformedInput { length: 5, .. })
        ));
    }

    #[test]
    fn test_two_flips_uncorrectable() {
        let codeword = encode(six_bits().as_slice());
        for p in 0..codeword.len() {
            for q in (p + 1)..codeword.len() {
                let mut corrupted = codeword.clone();
                corrupted.flip_bit(p);
                corrupted.flip_bit(q);
                assert!(matches!(
                    decode(&corrupted),
                    Err(Error::Uncorrectable { .. })
                ));
            }
        }
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_roundtrip_all_lengths() {
        let mut rng = StdRng::seed_from_u64(1);
        for len in 0..=300 {
            let data = random_data(&mut rng, len);
            let codeword = encode(&data);
            let layout = Layout::for_data_len(len);

            assert_eq!(codeword.len(), layout.codeword_len());
            assert_eq!(to_vec(&decode(&codeword).unwrap()), data);
            assert_eq!(decode_detailed(&codeword).unwrap().status, DecodeStatus::Clean);
        }
    }

    #[test]
    fn test_parity_bits_satisfy_checks() {
        let mut rng = StdRng::seed_from_u64(2);
        for len in [1usize, 4, 11, 26, 57, 120, 247] {
            let data = random_data(&mut rng, len);
            let codeword = encode(&data);
            let layout = Layout::for_data_len(len);

            for position in layout.parity_positions() {
                let expected = layout
                    .data_positions()
                    .filter(|p| p & position != 0)
                    .fold(false, |acc, p| acc ^ codeword[p]);
                assert_eq!(codeword[position], expected, "len {} parity {}", len, position);
            }

            let rest = codeword[1..].count_ones() % 2 == 1;
            assert_eq!(codeword[0], rest);
            assert!(syndrome(&codeword).unwrap().is_clean());
        }
    }

    #[test]
    fn test_random_single_flips() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let len = rng.gen_range(0..2048);
            let data = random_data(&mut rng, len);
            let mut codeword = encode(&data);
            let position = rng.gen_range(0..codeword.len());
            codeword.flip_bit(position);

            let decoded = decode_detailed(&codeword).unwrap();
            assert_eq!(to_vec(&decoded.data), data);
            let expected = if position == 0 {
                DecodeStatus::GlobalParityCorrected
            } else {
                DecodeStatus::Corrected { position }
            };
            assert_eq!(decoded.status, expected);
        }
    }

    #[test]
    fn test_random_double_flips() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let len = rng.gen_range(1..2048);
            let data = random_data(&mut rng, len);
            let mut codeword = encode(&data);
            let p = rng.gen_range(0..codeword.len());
            let mut q = rng.gen_range(0..codeword.len());
            while q == p {
                q = rng.gen_range(0..codeword.len());
            }
            codeword.flip_bit(p);
            codeword.flip_bit(q);

            assert!(decode(&codeword).unwrap_err().is_uncorrectable());
        }
    }

    #[test]
    fn test_malformed_lengths_never_decode() {
        for len in 0..=4100usize {
            let codeword = vec![false; len];
            let valid = Layout::from_codeword_len(len).is_ok();
            // Exactly the lengths whose Hamming portion ends on a power of two are invalid
            let expected = len >= 1 && !(len - 1).is_power_of_two();
            assert_eq!(valid, expected, "length {}", len);
            assert_eq!(decode(&codeword).is_ok(), expected, "length {}", len);
        }
    }
}

mod bytes {
    use super::*;

    #[test]
    fn test_ascii_roundtrip_with_correction() {
        let message = b"dom.com";
        let mut codeword = encode_bytes(message);
        assert_eq!(codeword.len(), 63);

        codeword.flip_bit(62);
        assert_eq!(decode_bytes(&codeword).unwrap(), message.to_vec());
    }
}
