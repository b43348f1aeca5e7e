//! Tuple and unit structs derive `Maskable`.

use fieldmask::{mask, Mask};

#[derive(Clone, Debug, PartialEq, Mask)]
pub struct Token(#[mask("zero")] pub String, pub u8);

#[derive(Clone, Debug, PartialEq, Mask)]
pub struct Empty {}

#[derive(Clone, Debug, PartialEq, Mask)]
pub struct Unit;

fn main() {
    assert_eq!(
        mask(&Token("abc".to_string(), 3)).unwrap(),
        Token(String::new(), 3)
    );
    assert_eq!(mask(&Empty {}).unwrap(), Empty {});
    assert_eq!(mask(&Unit).unwrap(), Unit);
}
