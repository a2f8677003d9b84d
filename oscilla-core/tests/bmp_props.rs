//! Property tests for the BMP reader and blitter

mod common;

use oscilla_core::bmp::{blit, blit_with, parse_header, read16, read32, BlitOptions, BmpError};
use proptest::prelude::*;

use common::CountingSink;

fn bmp_bytes(width: i32, height: i32, planes: u16, compression: u32, payload: &[u8]) -> Vec<u8> {
    let offset: u32 = 54;
    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&(offset + payload.len() as u32).to_le_bytes());
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&offset.to_le_bytes());
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&planes.to_le_bytes());
    data.extend_from_slice(&24u16.to_le_bytes());
    data.extend_from_slice(&compression.to_le_bytes());
    data.resize(offset as usize, 0);
    data.extend_from_slice(payload);
    data
}

proptest! {
    #[test]
    fn read32_matches_native_le(bytes in any::<[u8; 4]>()) {
        let direct = u32::from_le_bytes(bytes);
        let composed = (u32::from(read16(&bytes, 2).unwrap()) << 16)
            | u32::from(read16(&bytes, 0).unwrap());
        prop_assert_eq!(read32(&bytes, 0).unwrap(), direct);
        prop_assert_eq!(composed, direct);
    }

    #[test]
    fn any_plane_count_but_one_rejected(planes in any::<u16>().prop_filter("not one", |p| *p != 1)) {
        let data = bmp_bytes(1, 1, planes, 0, &[0; 3]);
        prop_assert_eq!(parse_header(&data), Err(BmpError::InvalidFormat));
    }

    #[test]
    fn any_compression_but_zero_rejected(compression in 1u32..) {
        let data = bmp_bytes(1, 1, 1, compression, &[0; 3]);
        prop_assert_eq!(parse_header(&data), Err(BmpError::InvalidFormat));
    }

    #[test]
    fn blit_writes_every_pixel_once(
        width in 1i32..8,
        height in 1i32..8,
        origin_x in -20i32..20,
        origin_y in -20i32..20,
        seed in any::<u8>(),
    ) {
        let count = (width * height) as usize;
        let payload: Vec<u8> = (0..count * 3).map(|i| (i as u8).wrapping_mul(31) ^ seed).collect();
        let data = bmp_bytes(width, height, 1, 0, &payload);
        let header = parse_header(&data).unwrap();

        let mut sink = CountingSink::default();
        let written = blit(&data, &header, origin_x, origin_y, &mut sink).unwrap();
        prop_assert_eq!(written as usize, count);
        prop_assert_eq!(sink.pixels.len(), count);

        for (index, &(x, y, color)) in sink.pixels.iter().enumerate() {
            let row = index / width as usize;
            let column = index % width as usize;
            // origin_x is ignored by default
            prop_assert_eq!(x, column as i32);
            prop_assert_eq!(y, origin_y + height - row as i32);

            let sample = &payload[index * 3..index * 3 + 3];
            let expected = ((u16::from(sample[2]) >> 3) << 11)
                | ((u16::from(sample[1]) >> 2) << 5)
                | (u16::from(sample[0]) >> 3);
            prop_assert_eq!(color, expected);
        }
    }

    #[test]
    fn column_offset_shifts_only_x(
        width in 1i32..8,
        height in 1i32..8,
        origin_x in -20i32..20,
        origin_y in -20i32..20,
    ) {
        let count = (width * height) as usize;
        let data = bmp_bytes(width, height, 1, 0, &vec![0x77; count * 3]);
        let header = parse_header(&data).unwrap();
        let options = BlitOptions { offset_columns: true, ..BlitOptions::default() };

        let mut plain = CountingSink::default();
        let mut shifted = CountingSink::default();
        blit(&data, &header, origin_x, origin_y, &mut plain).unwrap();
        blit_with(&data, &header, origin_x, origin_y, options, &mut shifted).unwrap();

        prop_assert_eq!(plain.pixels.len(), shifted.pixels.len());
        for (a, b) in plain.pixels.iter().zip(&shifted.pixels) {
            prop_assert_eq!(b.0, a.0 + origin_x);
            prop_assert_eq!((b.1, b.2), (a.1, a.2));
        }
    }

    #[test]
    fn short_pixel_data_never_draws(width in 1i32..8, height in 1i32..8, missing in 1usize..4) {
        let count = (width * height) as usize;
        let payload = vec![0x5A; count * 3 - missing];
        let data = bmp_bytes(width, height, 1, 0, &payload);
        let header = parse_header(&data).unwrap();

        let mut sink = CountingSink::default();
        prop_assert_eq!(
            blit(&data, &header, 0, 0, &mut sink),
            Err(BmpError::TruncatedData)
        );
        prop_assert!(sink.pixels.is_empty());
    }

    #[test]
    fn truncated_header_never_panics(len in 0usize..34) {
        let data = bmp_bytes(2, 2, 1, 0, &[0; 12]);
        prop_assert!(parse_header(&data[..len]).is_err());
    }
}
