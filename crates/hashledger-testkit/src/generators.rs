//! Proptest generators for property-based testing.

use proptest::prelude::*;

use hashledger_core::{Digest, Link, Record, Timestamp, Transfer};

/// A non-empty party name, possibly with surrounding whitespace and non-ASCII text.
pub fn party_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9 ._-]{0,23}",
        "\\PC{1,16}".prop_filter("must not be blank", |s| !s.trim().is_empty()),
        "[A-Za-z]{1,8}".prop_map(|s| format!("  {}\t", s)),
    ]
}

/// Amount text that parses: integers, decimals, negatives and exponents.
pub fn amount_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1_000_000).prop_map(|n| n.to_string()),
        (-1_000_000i64..1_000_000, 0u32..1000).prop_map(|(w, f)| format!("{}.{}", w, f)),
        (1u32..100, -3i32..4).prop_map(|(m, e)| format!("{}e{}", m, e)),
        (-1e9f64..1e9).prop_map(|v| v.to_string()),
    ]
}

/// Amount text that must be rejected.
pub fn bad_amount_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("NaN".to_string()),
        Just("inf".to_string()),
        Just("-infinity".to_string()),
        Just("1e400".to_string()),
        "[a-zA-Z]{1,10}",
        "[0-9]{1,4}[a-z]{1,3}",
    ]
}

/// A second-granularity timestamp between 2000 and 2099.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| {
            let text = format!("{:04}-{:02}-{:02} {:02}:{:02}:{:02}", y, mo, d, h, mi, s);
            Timestamp::parse(&text).expect("generated timestamp is valid")
        },
    )
}

/// Any link, including the genesis sentinel.
pub fn link() -> impl Strategy<Value = Link> {
    prop_oneof![
        1 => Just(Link::GENESIS),
        4 => any::<[u8; 8]>().prop_map(Link::from_bytes),
    ]
}

pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}

/// Parameters for sealing one record.
#[derive(Debug, Clone)]
pub struct TransferParams {
    pub sender: String,
    pub receiver: String,
    pub amount: String,
    pub block_number: u64,
    pub previous: Link,
    pub timestamp: Timestamp,
}

impl Arbitrary for TransferParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            party_name(),
            party_name(),
            amount_text(),
            1u64..=10_000,
            link(),
            timestamp(),
        )
            .prop_map(
                |(sender, receiver, amount, block_number, previous, timestamp)| TransferParams {
                    sender,
                    receiver,
                    amount,
                    block_number,
                    previous,
                    timestamp,
                },
            )
            .boxed()
    }
}

/// Seal a record from parameters.
pub fn record_from_params(params: &TransferParams) -> Record {
    let transfer = Transfer::parse(&params.sender, &params.receiver, &params.amount)
        .expect("generated transfer is valid");
    Record::seal(
        &transfer,
        params.block_number,
        params.previous,
        params.timestamp,
    )
}
