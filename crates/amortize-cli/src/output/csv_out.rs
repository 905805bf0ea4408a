use rust_decimal::Decimal;
use serde_json::Value;
use std::io;
use std::str::FromStr;

/// Header row for the schedule export, matching the classic
/// amortization-table column names.
const SCHEDULE_HEADERS: [&str; 6] = [
    "Month",
    "Monthly Payment",
    "Principal",
    "Interest",
    "Yearly Extra Payment",
    "Remaining Balance",
];

/// Result fields backing each schedule column, in header order.
const SCHEDULE_FIELDS: [&str; 6] = [
    "month",
    "monthly_payment",
    "principal",
    "interest",
    "extra_payment",
    "remaining_balance",
];

/// Write output as CSV to stdout. Schedule results get one row per month
/// with monetary values rounded to 2 decimal places; anything else falls
/// back to a two-column field/value layout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(Value::Array(payments)) = result.get("payments") {
        write_schedule_csv(&mut wtr, payments);
    } else if let Value::Object(map) = result {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(result)]);
    }

    let _ = wtr.flush();
}

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, payments: &[Value]) {
    let _ = wtr.write_record(SCHEDULE_HEADERS);

    for item in payments {
        if let Value::Object(map) = item {
            let row: Vec<String> = SCHEDULE_FIELDS
                .iter()
                .map(|f| map.get(*f).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        // Decimal fields serialize as strings; round them for export.
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => format!("{:.2}", d),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
