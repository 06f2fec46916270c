use graylzw::{compress, decompress, Error, PixelBuffer};

fn assert_roundtrips(image: &PixelBuffer) {
    let stream = compress(image).expect("compress");
    let restored = decompress(&stream).expect("decompress");
    assert_eq!(
        &restored,
        image,
        "{}x{} image did not survive the round trip",
        image.height(),
        image.width()
    );
}

fn xorshift(state: &mut u32) -> u32 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    *state
}

fn noise_image(height: u32, width: u32, mut seed: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(height, width).expect("extents");
    for row in 0..height {
        for col in 0..width {
            image
                .set(row, col, (xorshift(&mut seed) & 0xff) as u8)
                .expect("in bounds");
        }
    }
    image
}

#[test]
fn roundtrip_single_pixel() {
    for &value in &[0u8, 1, 200, 255] {
        let mut image = PixelBuffer::new(1, 1).expect("extents");
        image.fill(value);
        assert_roundtrips(&image);
    }
}

#[test]
fn roundtrip_all_identical() {
    for &(height, width) in &[(2, 2), (1, 9), (13, 1), (31, 17)] {
        let mut image = PixelBuffer::new(height, width).expect("extents");
        image.fill(42);
        assert_roundtrips(&image);
    }
}

#[test]
fn roundtrip_full_byte_range() {
    let mut image = PixelBuffer::new(16, 16).expect("extents");
    for row in 0..16 {
        for col in 0..16 {
            image.set(row, col, (row * 16 + col) as u8).expect("in bounds");
        }
    }
    assert_roundtrips(&image);
}

#[test]
fn roundtrip_gradients_and_ribbons() {
    let mut gradient = PixelBuffer::new(64, 48).expect("extents");
    for row in 0..64 {
        for col in 0..48 {
            gradient
                .set(row, col, ((row * 3 + col * 5) % 256) as u8)
                .expect("in bounds");
        }
    }
    assert_roundtrips(&gradient);

    let row_image = PixelBuffer::from_rows(&[vec![1, 2, 1, 2, 1, 2, 3]]).expect("rows");
    assert_roundtrips(&row_image);

    let column: Vec<Vec<u8>> = (0..40u32).map(|row| vec![(row % 7) as u8]).collect();
    assert_roundtrips(&PixelBuffer::from_rows(&column).expect("rows"));
}

#[test]
fn roundtrip_noise_past_the_dictionary_cap() {
    // Uniform noise keeps matches short, so a 600x600 input emits well
    // over 65536 codes; growth must stop at the cap without corrupting
    // either direction.
    assert_roundtrips(&noise_image(600, 600, 0x2545_f491));
}

#[test]
fn streams_are_deterministic() {
    let image = noise_image(32, 32, 7);
    let first = compress(&image).expect("compress");
    let second = compress(&image).expect("compress");
    assert_eq!(first, second);
}

#[test]
fn flat_two_by_two_scenario() {
    let mut image = PixelBuffer::new(2, 2).expect("extents");
    image.fill(5);
    let stream = compress(&image).expect("compress");

    // height = width = 2, a one-symbol start dictionary holding 5, and
    // a first code of 0.
    assert_eq!(&stream[0..2], &[0, 2]);
    assert_eq!(&stream[2..4], &[0, 2]);
    assert_eq!(&stream[4..6], &[0, 1]);
    assert_eq!(stream[6], 5);
    assert_eq!(&stream[11..13], &[0, 0]);

    assert_eq!(decompress(&stream).expect("decompress"), image);
}

#[test]
fn repeated_symbol_scenario() {
    let image = PixelBuffer::from_rows(&[vec![7, 7, 7, 7]]).expect("rows");
    let stream = compress(&image).expect("compress");

    // One seed (7) and a first code of 0; the run is short enough that
    // the second code names an entry the decoder has not materialized
    // yet.
    assert_eq!(&stream[4..6], &[0, 1]);
    assert_eq!(stream[6], 7);
    assert_eq!(&stream[11..13], &[0, 0]);

    assert_eq!(decompress(&stream).expect("decompress"), image);
}

#[test]
fn truncated_streams_rejected() {
    let mut image = PixelBuffer::new(2, 2).expect("extents");
    image.fill(5);
    let stream = compress(&image).expect("compress");
    for cut in 0..stream.len() {
        assert!(
            matches!(
                decompress(&stream[..cut]),
                Err(Error::DecompressionFailure { .. })
            ),
            "prefix of {} bytes was not rejected",
            cut
        );
    }
}

#[test]
fn trailing_garbage_rejected() {
    let mut image = PixelBuffer::new(2, 2).expect("extents");
    image.fill(5);
    let mut stream = compress(&image).expect("compress");
    stream.extend_from_slice(&[1, 2, 3]);
    assert!(matches!(
        decompress(&stream),
        Err(Error::DecompressionFailure { .. })
    ));
}

#[test]
fn start_dictionary_order_is_honored() {
    // A stream whose seeds arrive in descending order; the encoder never
    // produces this, but the decoder must reproduce exactly that symbol
    // assignment.
    let stream = vec![
        0, 1, // height
        0, 3, // width
        0, 2, // start-dictionary length
        9, 3, // seeds, descending
        0, 0, 0, 6, // code-block byte length
        0, 0, 0, 1, 0, 0, // codes 0, 1, 0
    ];
    let image = decompress(&stream).expect("decompress");
    assert_eq!(image.samples(), &[9, 3, 9]);
}

#[test]
fn oversized_extents_rejected() {
    let tall = PixelBuffer::new(1 << 16, 1).expect("extents");
    assert!(matches!(compress(&tall), Err(Error::TooLarge { .. })));
    let wide = PixelBuffer::new(1, 1 << 16).expect("extents");
    assert!(matches!(compress(&wide), Err(Error::TooLarge { .. })));
}
