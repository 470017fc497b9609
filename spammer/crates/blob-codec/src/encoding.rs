use alloy::eips::eip4844::{Blob, BYTES_PER_BLOB};
use rand::RngCore;

/// Size of a BLS12-381 scalar as serialized in a blob.
pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
/// Payload bytes packed into one field element. The leading byte stays zero so the element is
/// always below the scalar modulus.
pub const USABLE_BYTES_PER_FIELD_ELEMENT: usize = 31;
pub const FIELD_ELEMENTS_PER_BLOB: usize = BYTES_PER_BLOB / BYTES_PER_FIELD_ELEMENT;

/// Packs arbitrary bytes into blobs, 31 bytes per field element.
///
/// Always returns at least one blob, even for an empty payload.
pub fn encode_blobs(data: &[u8]) -> Vec<Blob> {
    let mut blobs = vec![Blob::ZERO];
    for (i, chunk) in data.chunks(USABLE_BYTES_PER_FIELD_ELEMENT).enumerate() {
        let blob_index = i / FIELD_ELEMENTS_PER_BLOB;
        let field_index = i % FIELD_ELEMENTS_PER_BLOB;
        if blob_index == blobs.len() {
            blobs.push(Blob::ZERO);
        }
        let start = field_index * BYTES_PER_FIELD_ELEMENT + 1;
        blobs[blob_index][start..start + chunk.len()].copy_from_slice(chunk);
    }
    blobs
}

/// Reverses [`encode_blobs`] for a single blob.
///
/// Trailing zero bytes are stripped, so payloads that legitimately end in zeros do not
/// round-trip exactly.
pub fn decode_blob(blob: &Blob) -> Vec<u8> {
    let mut data = Vec::with_capacity(FIELD_ELEMENTS_PER_BLOB * USABLE_BYTES_PER_FIELD_ELEMENT);
    for element in blob.chunks(BYTES_PER_FIELD_ELEMENT) {
        data.extend_from_slice(&element[1..]);
    }
    let len = data.iter().rposition(|byte| *byte != 0).map_or(0, |pos| pos + 1);
    data.truncate(len);
    data
}

/// Random bytes made of valid field elements. `len` is rounded down to a multiple of 32.
pub fn random_field_data(len: usize) -> Vec<u8> {
    let len = len - len % BYTES_PER_FIELD_ELEMENT;
    let mut data = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut data);
    for element in data.chunks_mut(BYTES_PER_FIELD_ELEMENT) {
        // big-endian: clearing the top two bits keeps the value below the BLS12-381 modulus
        element[0] &= 0x3f;
    }
    data
}

/// `count` blobs whose first `fill_bytes` bytes are random field elements, the rest zero.
pub fn random_blobs(count: usize, fill_bytes: usize) -> Vec<Blob> {
    let fill_bytes = fill_bytes.min(BYTES_PER_BLOB);
    (0..count)
        .map(|_| {
            let mut blob = Blob::ZERO;
            let data = random_field_data(fill_bytes);
            blob[..data.len()].copy_from_slice(&data);
            blob
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty(0, 1)]
    #[case::one_element(31, 1)]
    #[case::exactly_one_blob(FIELD_ELEMENTS_PER_BLOB * USABLE_BYTES_PER_FIELD_ELEMENT, 1)]
    #[case::spills_into_second(FIELD_ELEMENTS_PER_BLOB * USABLE_BYTES_PER_FIELD_ELEMENT + 10, 2)]
    fn encode_blobs_count(#[case] len: usize, #[case] expected: usize) {
        assert_eq!(encode_blobs(&vec![0xAB; len]).len(), expected);
    }

    #[test]
    fn encode_blobs_keeps_leading_byte_zero() {
        let blobs = encode_blobs(&[0xFF; 4 * USABLE_BYTES_PER_FIELD_ELEMENT]);
        for element in blobs[0].chunks(BYTES_PER_FIELD_ELEMENT).take(4) {
            assert_eq!(element[0], 0);
            assert!(element[1..].iter().all(|b| *b == 0xFF));
        }
    }

    #[test]
    fn decode_reverses_encode_across_blobs() {
        let payload: Vec<u8> =
            (0..FIELD_ELEMENTS_PER_BLOB * USABLE_BYTES_PER_FIELD_ELEMENT + 10).map(|i| (i % 251) as u8 + 1).collect();
        let blobs = encode_blobs(&payload);
        let decoded: Vec<u8> = blobs.iter().flat_map(decode_blob).collect();
        assert_eq!(decoded, payload);
    }

    #[rstest]
    #[case(64, 64)]
    #[case(70, 64)]
    #[case(31, 0)]
    fn random_field_data_is_element_aligned(#[case] len: usize, #[case] expected: usize) {
        let data = random_field_data(len);
        assert_eq!(data.len(), expected);
        assert!(data.chunks(BYTES_PER_FIELD_ELEMENT).all(|element| element[0] < 0x40));
    }

    #[test]
    fn random_blobs_zero_pads_after_fill() {
        let blobs = random_blobs(2, 1024);
        assert_eq!(blobs.len(), 2);
        assert!(blobs.iter().all(|blob| blob[1024..].iter().all(|b| *b == 0)));
        assert_ne!(blobs[0], blobs[1]);
    }
}
