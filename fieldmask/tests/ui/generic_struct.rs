//! Generic parameters used in fields get a `Maskable` bound; parameters only
//! behind `PhantomData` do not.

use std::marker::PhantomData;

use fieldmask::{mask, Mask};

struct Tenant;

#[derive(Clone, Mask)]
pub struct Scoped<T, S> {
    #[mask("char,-1")]
    pub secret: T,
    pub items: Vec<T>,
    _scope: PhantomData<S>,
}

fn main() {
    let scoped: Scoped<String, Tenant> = Scoped {
        secret: "hunter2".to_string(),
        items: vec!["a".to_string()],
        _scope: PhantomData,
    };
    let masked = mask(&scoped).unwrap();
    assert_eq!(masked.secret, "*******");
    assert_eq!(masked.items, ["a"]);
}
