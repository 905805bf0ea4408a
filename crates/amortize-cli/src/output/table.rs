use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

/// Format output as a human-readable summary plus schedule table.
pub fn print_table(symbol: &str, value: &Value) {
    let envelope = value.as_object();
    let result = envelope.and_then(|m| m.get("result")).unwrap_or(value);

    if let Some(Value::Array(payments)) = result.get("payments") {
        print_summary(symbol, result);
        print_schedule(symbol, payments);
    } else {
        print_flat_object(result);
    }

    if let Some(Value::Array(warnings)) = envelope.and_then(|m| m.get("warnings")) {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn print_summary(symbol: &str, result: &Value) {
    let total_interest = result
        .get("total_interest")
        .and_then(as_decimal)
        .unwrap_or_default();
    let months = result
        .get("months_to_repay")
        .and_then(Value::as_u64)
        .unwrap_or_default();
    let years_saved = result
        .get("years_saved")
        .and_then(as_decimal)
        .unwrap_or_default();

    println!("Loan Summary");
    println!("  Total Interest: {}{:.2}", symbol, total_interest);
    println!("  Time to Repay:  {} Years, {} Months", months / 12, months % 12);
    println!("  Time Saved:     {:.1} Years", years_saved);
    println!();
}

fn print_schedule(symbol: &str, payments: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record([
        "Month",
        "Monthly Payment",
        "Principal",
        "Interest",
        "Yearly Extra Payment",
        "Remaining Balance",
    ]);

    for item in payments {
        if let Value::Object(map) = item {
            let month = map
                .get("month")
                .and_then(Value::as_u64)
                .unwrap_or_default()
                .to_string();
            builder.push_record([
                month,
                money_cell(symbol, map.get("monthly_payment")),
                money_cell(symbol, map.get("principal")),
                money_cell(symbol, map.get("interest")),
                money_cell(symbol, map.get("extra_payment")),
                money_cell(symbol, map.get("remaining_balance")),
            ]);
        }
    }

    let table = Table::from(builder);
    println!("{}", table);
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        println!("{}", value);
    }
}

fn money_cell(symbol: &str, value: Option<&Value>) -> String {
    match value.and_then(as_decimal) {
        Some(d) => format!("{}{:.2}", symbol, d),
        None => String::new(),
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
