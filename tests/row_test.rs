use std::sync::Arc;

use bytes::BytesMut;

use rowcodec::codec::{CharsetService, ColumnCodec, Value};
use rowcodec::common::{CodecError, ColumnDescriptor, ColumnType};
use rowcodec::row::{Row, RowBuilder, RowLayout};
use rowcodec::temporal::TemporalValue;

fn create_codec() -> ColumnCodec {
    ColumnCodec::new(Arc::new(CharsetService::new()))
}

fn create_user_layout(codec: &ColumnCodec) -> Arc<RowLayout> {
    RowLayout::builder()
        .column("id", ColumnDescriptor::of(ColumnType::BigUnsigned))
        .column("name", ColumnDescriptor::new(ColumnType::VarChar.code(), 40, 45))
        .nullable_column("email", ColumnDescriptor::new(ColumnType::LongVarChar.code(), 300, 45))
        .column("score", ColumnDescriptor::of(ColumnType::Double))
        .nullable_column("joined", ColumnDescriptor::of(ColumnType::DateTime))
        .nullable_column("shift", ColumnDescriptor::of(ColumnType::Time))
        .column("flags", ColumnDescriptor::new(ColumnType::Binary.code(), 2, 0))
        .nullable_column("tag", ColumnDescriptor::new(ColumnType::Char.code(), 3, 8))
        .nullable_column("level", ColumnDescriptor::of(ColumnType::TinyInt))
        .build_arc(codec.registry())
        .unwrap()
}

#[test]
fn test_row_roundtrip_with_nulls() {
    let codec = create_codec();
    let layout = create_user_layout(&codec);
    assert_eq!(layout.null_bitmap_size(), 2);

    let row = RowBuilder::new(layout.clone())
        .value(1001u64)
        .value("Alice")
        .null()
        .value(98.5f64)
        .value(TemporalValue::datetime(2024, 1, 5, 8, 9, 10, 0))
        .null()
        .value(vec![0x01u8, 0x80])
        .value("abc")
        .null()
        .build();

    let bytes = row.to_bytes(&codec).unwrap();
    assert_eq!(bytes.len(), layout.row_size());
    assert_eq!(bytes[0], 0b0010_0100);
    assert_eq!(bytes[1], 0b0000_0001);

    let decoded = Row::from_bytes(layout, &codec, &bytes).unwrap();
    assert_eq!(decoded, row);
}

#[test]
fn test_rows_in_bytes_mut_buffer() {
    let codec = create_codec();
    let layout = create_user_layout(&codec);
    let mut buffer = BytesMut::zeroed(layout.row_size() * 3);

    let rows: Vec<Row> = (0..3u64)
        .map(|i| {
            RowBuilder::new(layout.clone())
                .set("id", i)
                .set("name", format!("user{}", i))
                .set("score", i as f64 * 0.5)
                .set("flags", vec![i as u8, 0])
                .set("shift", TemporalValue::time(i == 1, 8 + i as u32, 30, 0, 0))
                .build()
        })
        .collect();

    for (i, row) in rows.iter().enumerate() {
        let written = row.write_to(&codec, &mut buffer, i * layout.row_size()).unwrap();
        assert_eq!(written, layout.row_size());
    }

    for (i, row) in rows.iter().enumerate() {
        let read = Row::read_from(layout.clone(), &codec, &buffer, i * layout.row_size()).unwrap();
        assert_eq!(&read, row);
        assert_eq!(read.value_by_name("email"), Some(&Value::Null));
    }
}

#[test]
fn test_reencode_row_is_byte_identical() {
    let codec = create_codec();
    let layout = create_user_layout(&codec);

    let row = RowBuilder::new(layout.clone())
        .set("id", 7u64)
        .set("name", "Zoë")
        .set("email", "zoe@example.com")
        .set("score", -1.0f64)
        .set("joined", "2023-12-31 23:59:59")
        .set("shift", "-01:15:00")
        .set("flags", vec![0xffu8, 0xfe])
        .set("tag", "é")
        .set("level", -3i8)
        .build();

    let first = row.to_bytes(&codec).unwrap();
    let decoded = Row::from_bytes(layout, &codec, &first).unwrap();
    let second = decoded.to_bytes(&codec).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_row_errors() {
    let codec = create_codec();
    let layout = create_user_layout(&codec);

    let missing_name = RowBuilder::new(layout.clone())
        .set("id", 1u64)
        .set("score", 0.0f64)
        .set("flags", vec![0u8, 0])
        .build();
    assert_eq!(
        missing_name.to_bytes(&codec),
        Err(CodecError::NullNotAllowed("name".to_string()))
    );

    let row = RowBuilder::new(layout.clone())
        .set("id", 1u64)
        .set("name", "x")
        .set("score", 0.0f64)
        .set("flags", vec![0u8, 0])
        .build();
    let mut short = vec![0u8; layout.row_size() - 1];
    assert!(matches!(
        row.write_to(&codec, &mut short, 0),
        Err(CodecError::BufferOverflow { .. })
    ));

    let too_long = RowBuilder::new(layout)
        .set("id", 1u64)
        .set("name", "n".repeat(41))
        .set("score", 0.0f64)
        .set("flags", vec![0u8, 0])
        .build();
    assert_eq!(
        too_long.to_bytes(&codec),
        Err(CodecError::ValueTooLong { len: 41, max: 40 })
    );
}
