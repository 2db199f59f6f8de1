// Prints the events the binder consumes for a document

use picobind::{Event, ParseError, PullParser, SliceParser};

fn main() -> Result<(), ParseError> {
    let json = r#"{"name": "pico", "sizes": [1, 2.5, 123456789012345678901234567890], "ok": true, "none": null}"#;
    let mut parser = SliceParser::new(json);
    println!("Input: {}", json);

    let mut depth = 0usize;
    while let Some(event) = parser.next() {
        let event = event?;
        if matches!(event, Event::EndObject | Event::EndArray) {
            depth -= 1;
        }
        let indent = "  ".repeat(depth);
        match &event {
            Event::String(s) => println!("{indent}String: '{}'", s),
            Event::Integer(v) => println!("{indent}Integer: {}", v),
            Event::Decimal(v) => println!("{indent}Decimal: {}", v),
            Event::BigNumber(raw) => println!("{indent}BigNumber: {}", raw),
            other => println!("{indent}{:?}", other),
        }
        if matches!(event, Event::StartObject | Event::StartArray) {
            depth += 1;
        }
    }
    Ok(())
}
