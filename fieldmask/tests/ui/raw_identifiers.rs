//! Raw identifiers are recorded without the `r#` prefix.

use fieldmask::{Mask, Maskable};

#[derive(Clone, Mask)]
pub struct Event {
    #[mask("zero")]
    pub r#type: String,
    pub r#ref: u32,
}

fn main() {
    let event = Event {
        r#type: "login".to_string(),
        r#ref: 1,
    };
    let value = event.to_value();
    let record = value.as_record().unwrap();
    assert!(record.schema().field("type").is_some());
    assert!(record.schema().field("ref").is_some());

    let masked = fieldmask::mask(&event).unwrap();
    assert_eq!(masked.r#type, "");
    assert_eq!(masked.r#ref, 1);
}
