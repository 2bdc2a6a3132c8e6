use std::sync::Arc;

use rowcodec::codec::{CharsetService, ColumnCodec, Value};
use rowcodec::common::{ColumnDescriptor, ColumnType};
use rowcodec::row::{Row, RowBuilder, RowLayout};
use rowcodec::TemporalValue;

fn main() {
    println!("Rowcodec - typed column codec");
    println!("=============================\n");

    let charsets = Arc::new(CharsetService::new());
    let codec = ColumnCodec::new(charsets);

    let layout = RowLayout::builder()
        .column("id", ColumnDescriptor::of(ColumnType::Unsigned))
        .column("name", ColumnDescriptor::new(ColumnType::VarChar.code(), 32, 45))
        .column("code", ColumnDescriptor::new(ColumnType::Char.code(), 6, 8))
        .nullable_column("born", ColumnDescriptor::of(ColumnType::Date))
        .nullable_column("updated", ColumnDescriptor::of(ColumnType::DateTime))
        .build_arc(codec.registry())
        .expect("Failed to build layout");

    println!("Row layout ({} bytes):", layout.row_size());
    for col in layout.columns() {
        println!(
            "  - {:<8} {:<16} offset {:>3}, {} bytes",
            col.name(),
            col.descriptor().to_string(),
            col.offset(),
            col.size()
        );
    }

    let row = RowBuilder::new(layout.clone())
        .value(42u32)
        .value("Ada Lovelace")
        .value("AL")
        .value(TemporalValue::from_date_string("1815-12-10"))
        .value("2024-01-05 08:09:10")
        .build();

    let bytes = row.to_bytes(&codec).expect("Failed to encode row");
    println!("\nEncoded row:");
    for chunk in bytes.chunks(16) {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        println!("  {}", hex.join(" "));
    }

    let decoded = Row::from_bytes(layout.clone(), &codec, &bytes).expect("Failed to decode row");
    println!("\nDecoded row:");
    for (col, value) in layout.columns().zip(decoded.values()) {
        println!("  - {}: {}", col.name(), value);
    }

    let time = TemporalValue::from_time_string("-02:30:00.25");
    println!("\nParsed time: {} (valid: {})", time.to_time_string(), time.is_valid());
    if let Value::Temporal(born) = decoded.value_by_name("born").cloned().unwrap_or(Value::Null) {
        println!("Born (UTC): {:?}", born.to_native_utc());
    }
}
