//! End-to-end tests for the public masking API.
//!
//! These tests exercise the integration of:
//! - `Mask` derive lowering and rebuilding,
//! - directive dispatch through the default engine and custom engines, and
//! - traversal of common standard library containers.

use std::collections::HashMap;

use fieldmask::{
    builtins, default_engine, mask, mask_any, mask_float, mask_int, mask_string, mask_uint,
    Dynamic, Engine, Mask, MaskError, Value,
};

#[derive(Clone, Debug, Default, PartialEq, Mask)]
pub struct Showcase {
    pub pub_info: String,
    #[mask("char")]
    pub str_char: String,
    #[mask("char,3")]
    pub str_char3: String,
    #[mask("char,-1")]
    pub str_char_same_len: String,
    #[mask("char,,-")]
    pub str_char_dash: String,
    #[mask("rand")]
    pub str_rand: String,
    #[mask("hash")]
    pub str_hash: String,
    #[mask("zero")]
    pub str_zero: String,
    #[mask("zero")]
    pub int_zero: i64,
    #[mask("zero")]
    pub uint_zero: u32,
    #[mask("zero")]
    pub float_zero: f64,
    #[mask("zero")]
    pub any_zero: Dynamic,
}

fn showcase() -> Showcase {
    Showcase {
        pub_info: "This field won't be masked".into(),
        str_char: "This field will be ********".into(),
        str_char3: "This field will be ***".into(),
        str_char_same_len: "abcdef".into(),
        str_char_dash: "This field will be --------".into(),
        str_rand: "This field will be a random string".into(),
        str_hash: "abcdef".into(),
        str_zero: "This field will be a empty string".into(),
        int_zero: 57128,
        uint_zero: 57128,
        float_zero: 57128.0,
        any_zero: Dynamic::new(&"This field will be empty".to_string()),
    }
}

#[test]
fn test_default_engine_masks_every_directive() {
    let masked = mask(&showcase()).unwrap();

    assert_eq!(masked.pub_info, "This field won't be masked");
    assert_eq!(masked.str_char, "********");
    assert_eq!(masked.str_char3, "***");
    assert_eq!(masked.str_char_same_len, "******");
    assert_eq!(masked.str_char_dash, "--------");
    assert_eq!(masked.str_rand.len(), 8);
    assert_ne!(masked.str_rand, "This field will be a random string");
    assert_eq!(
        masked.str_hash,
        "bef57ec7f53a6d40beb640a780a639c83bc29ac8a9816f1fc6c5c6dcd93c4721"
    );
    assert_eq!(masked.str_zero, "");
    assert_eq!(masked.int_zero, 0);
    assert_eq!(masked.uint_zero, 0);
    assert_eq!(masked.float_zero, 0.0);
    assert_eq!(
        masked.any_zero.downcast::<String>().unwrap(),
        Some(String::new())
    );
}

#[test]
fn test_original_is_not_modified() {
    let original = showcase();
    let snapshot = original.clone();
    let _ = mask(&original).unwrap();
    assert_eq!(original, snapshot);
}

#[test]
fn test_zero_only_engine() {
    let engine = Engine::new().register_any("zero", builtins::zero);
    let masked = engine.mask(&showcase()).unwrap();

    assert_eq!(masked.str_zero, "");
    assert_eq!(masked.int_zero, 0);
    assert_eq!(masked.uint_zero, 0);
    assert_eq!(masked.float_zero, 0.0);
    // Not registered on this engine, so copied unchanged.
    assert_eq!(masked.str_char, "This field will be ********");
}

#[test]
fn test_composite_end_to_end() {
    #[derive(Clone, Debug, PartialEq, Mask)]
    pub struct Order {
        pub customer: String,
        #[mask("zero")]
        pub card_number: i64,
    }

    let order = Order {
        customer: "ada".into(),
        card_number: 4_111_111_111,
    };
    let masked = mask(&order).unwrap();
    assert_eq!(
        masked,
        Order {
            customer: "ada".into(),
            card_number: 0,
        }
    );
    assert_eq!(order.card_number, 4_111_111_111);
}

#[test]
fn test_category_entry_points() {
    assert_eq!(
        mask_string("This field will be a empty string", "zero").unwrap(),
        ""
    );
    assert_eq!(mask_int(57128, "zero").unwrap(), 0);
    assert_eq!(mask_uint(57128, "zero").unwrap(), 0);
    assert_eq!(mask_float(57128.0, "zero").unwrap(), 0.0);
    assert_eq!(mask_string("abcdef", "").unwrap(), "abcdef");
}

#[test]
fn test_mask_any_shapes() {
    let cases = [
        (Value::from("string"), Value::from("")),
        (Value::int(57128), Value::int(0)),
        (Value::uint(57128), Value::uint(0)),
        (Value::float(57128.0), Value::float(0.0)),
        (
            Value::Dynamic(Some(Box::new(Value::from("string")))),
            Value::Dynamic(None),
        ),
    ];
    for (input, expected) in cases {
        let outcome = mask_any(&input, "zero").unwrap();
        assert!(outcome.hit);
        assert_eq!(outcome.value, expected);
    }
}

#[test]
fn test_mask_any_zeroes_maps() {
    let mut map = HashMap::new();
    map.insert("foo".to_string(), "bar".to_string());
    let value = fieldmask::Maskable::to_value(&map);

    let outcome = mask_any(&value, "zero").unwrap();
    assert!(outcome.hit);
    assert_eq!(outcome.value, Value::Map(None));

    let rebuilt: HashMap<String, String> = fieldmask::Maskable::from_value(outcome.value).unwrap();
    assert!(rebuilt.is_empty());
}

#[test]
fn test_hash_algorithms() {
    assert_eq!(
        mask_string("abcdef", "hash,md5").unwrap(),
        "e80b5017098950fc58aad83c8c14978e"
    );
    assert_eq!(
        mask_string("abcdef", "hash,sha1").unwrap(),
        "1f8ac10f23c5b5bc1167bda84b833e5c057a77d2"
    );
    assert_eq!(
        mask_string("abcdef", "hash,sha256").unwrap(),
        "bef57ec7f53a6d40beb640a780a639c83bc29ac8a9816f1fc6c5c6dcd93c4721"
    );
    assert!(matches!(
        mask_string("abcdef", "hash,crc32"),
        Err(MaskError::UnsupportedAlgorithm(name)) if name == "crc32"
    ));
}

#[test]
fn test_random_numeric_builtins_on_custom_engine() {
    let engine = Engine::with_builtins()
        .register_int(builtins::names::RAND, builtins::rand_int)
        .register_uint(builtins::names::RAND, builtins::rand_uint)
        .register_float(builtins::names::RAND, builtins::rand_float);

    for _ in 0..100 {
        let int = engine.mask_int(0, "rand,20,10").unwrap();
        assert!((10..20).contains(&int));
        let uint = engine.mask_uint(0, "rand,20,10").unwrap();
        assert!((10..20).contains(&uint));
        let float = engine.mask_float(0.0, "rand,20,10,3").unwrap();
        assert!((10.0..20.0).contains(&float));
    }
    // String `rand` is untouched by the numeric registrations.
    assert_eq!(engine.mask_string("abcdef", "rand,-1").unwrap().len(), 6);
}

#[test]
fn test_custom_transformation_in_derived_struct() {
    #[derive(Clone, Debug, Mask)]
    pub struct Contact {
        #[mask("keep_domain")]
        pub email: String,
    }

    let engine = Engine::with_builtins().register_string("keep_domain", |value, _| {
        Ok(value
            .split_once('@')
            .map_or_else(|| "*".repeat(value.len()), |(_, domain)| format!("***@{domain}")))
    });
    let masked = engine
        .mask(&Contact {
            email: "ada@example.com".into(),
        })
        .unwrap();
    assert_eq!(masked.email, "***@example.com");
}

#[test]
fn test_nested_structs_and_containers() {
    #[derive(Clone, Debug, PartialEq, Mask)]
    pub struct Card {
        #[mask("char,-1")]
        pub number: String,
        pub brand: String,
    }

    #[derive(Clone, Debug, PartialEq, Mask)]
    pub struct Wallet {
        pub owner: String,
        pub primary: Option<Card>,
        pub cards: Vec<Card>,
        #[mask("char,4")]
        pub pins: Vec<String>,
        #[mask("zero")]
        pub balances: [u64; 2],
        pub backup: Option<Box<Card>>,
    }

    let card = |number: &str| Card {
        number: number.into(),
        brand: "visa".into(),
    };
    let wallet = Wallet {
        owner: "ada".into(),
        primary: Some(card("4111")),
        cards: vec![card("4012888"), card("5555")],
        pins: vec!["1".into(), "123456".into()],
        balances: [10, 20],
        backup: None,
    };

    let masked = mask(&wallet).unwrap();
    assert_eq!(masked.owner, "ada");
    assert_eq!(masked.primary, Some(card("****")));
    assert_eq!(masked.cards, vec![card("*******"), card("****")]);
    assert_eq!(masked.pins, vec!["****".to_string(), "****".to_string()]);
    assert_eq!(masked.balances, [0, 0]);
    assert_eq!(masked.backup, None);
}

#[test]
fn test_default_engine_is_shared_and_populated() {
    assert!(std::ptr::eq(default_engine(), default_engine()));
    assert!(default_engine()
        .lookup(fieldmask::Category::Any, "zero")
        .is_some());
    for name in ["char", "rand", "hash"] {
        assert!(default_engine()
            .lookup(fieldmask::Category::String, name)
            .is_some());
    }
    assert!(default_engine()
        .lookup(fieldmask::Category::Int, "rand")
        .is_none());
}
