//! Field types without a `Maskable` impl are carried with `#[mask(opaque)]`,
//! including generic ones.

use std::time::Duration;

use fieldmask::{mask, Mask};

#[derive(Clone, Default, PartialEq, Debug)]
pub struct External {
    pub handle: u64,
}

#[derive(Clone, Mask)]
pub struct Job<H> {
    #[mask(opaque)]
    pub timeout: Duration,
    #[mask(opaque, "zero")]
    pub handle: H,
    #[mask("char,3")]
    pub name: String,
}

fn main() {
    let job = Job {
        timeout: Duration::from_secs(5),
        handle: External { handle: 9 },
        name: "nightly".to_string(),
    };
    let masked = mask(&job).unwrap();
    assert_eq!(masked.timeout, Duration::from_secs(5));
    assert_eq!(masked.handle, External { handle: 9 });
    assert_eq!(masked.name, "***");
}
