//! REST-shaped records used across the crate's unit tests. Every `size`
//! is the exact byte length of the encoded transaction.

use serde_json::{json, Value};

pub const SIGNER: &str = "9801508C58666C746F471538E43002B85B1CD542F9874B2861183919BA8787B6";
pub const COSIGNER: &str = "2134E47AEE6F2392A5B3D1238CD7714EABEB739361B7CCF24BAE127F10DF17F2";
/// TestNet address, hex form.
pub const ADDRESS: &str = "98E521BD0F024F58E670A023BF3A14F3BECAF0280396BED0";
/// TestNet alias for namespace `D85742D268617751`, hex form.
pub const ALIAS: &str = "9951776168D24257D8000000000000000000000000000000";
pub const CURRENCY_ALIAS: &str = "E74B99BA41F4AFEE";
pub const MOSAIC: &str = "6BED913FA20223F8";

pub fn signature() -> String {
    "AB".repeat(64)
}

fn hash(byte: &str) -> String {
    byte.repeat(32)
}

/// Merges kind-specific fields into a signed TestNet envelope.
fn record(transaction_type: u16, size: u32, body: Value) -> Value {
    let mut transaction = json!({
        "size": size,
        "signature": signature(),
        "signerPublicKey": SIGNER,
        "version": 1,
        "network": 152,
        "type": transaction_type,
        "maxFee": "25000",
        "deadline": "1",
    });
    if let (Some(target), Value::Object(fields)) = (transaction.as_object_mut(), body) {
        target.extend(fields);
    }
    json!({
        "id": "5A0069D83F17CF0001777E55",
        "meta": {
            "height": "18160",
            "hash": hash("C7"),
            "merkleComponentHash": hash("C7"),
            "index": 0,
        },
        "transaction": transaction,
    })
}

pub fn transfer_record() -> Value {
    let mut r = record(
        0x4154,
        189,
        json!({
            "recipientAddress": ADDRESS,
            "message": "00746573742D6D657373616765",
            "mosaics": [{ "id": CURRENCY_ALIAS, "amount": "1000000" }],
        }),
    );
    r["transaction"]["maxFee"] = json!("0");
    r
}

/// Aggregate complete with an inner transfer (109 bytes, padded to 112)
/// and an inner account key link (81 bytes, padded to 88), plus one
/// cosignature: 128 + 40 + 200 + 104.
pub fn aggregate_record() -> Value {
    json!({
        "id": "5A0069D83F17CF0001777E60",
        "meta": {
            "height": "18160",
            "hash": hash("D1"),
            "merkleComponentHash": hash("D1"),
            "index": 0,
        },
        "transaction": {
            "size": 472,
            "signature": signature(),
            "signerPublicKey": SIGNER,
            "version": 1,
            "network": 152,
            "type": 0x4141,
            "maxFee": "50000",
            "deadline": "7200000",
            "transactionsHash": hash("00"),
            "transactions": [
                {
                    "id": "5A0069D83F17CF0001777E61",
                    "meta": {
                        "height": "18160",
                        "aggregateHash": hash("D1"),
                        "aggregateId": "5A0069D83F17CF0001777E60",
                        "index": 0,
                    },
                    "transaction": {
                        "signerPublicKey": SIGNER,
                        "version": 1,
                        "network": 152,
                        "type": 0x4154,
                        "recipientAddress": ALIAS,
                        "message": "00746573742D6D657373616765",
                        "mosaics": [{ "id": CURRENCY_ALIAS, "amount": "10" }],
                    },
                },
                {
                    "id": "5A0069D83F17CF0001777E62",
                    "meta": {
                        "height": "18160",
                        "aggregateHash": hash("D1"),
                        "aggregateId": "5A0069D83F17CF0001777E60",
                        "index": 1,
                    },
                    "transaction": {
                        "signerPublicKey": COSIGNER,
                        "version": 1,
                        "network": 152,
                        "type": 0x414C,
                        "linkedPublicKey": SIGNER,
                        "linkAction": 1,
                    },
                },
            ],
            "cosignatures": [
                {
                    "version": "0",
                    "signerPublicKey": COSIGNER,
                    "signature": signature(),
                }
            ],
        },
    })
}

/// One record per transaction kind.
pub fn all_records() -> Vec<Value> {
    let mut bonded = aggregate_record();
    bonded["transaction"]["type"] = json!(0x4241);

    vec![
        transfer_record(),
        record(
            0x414E,
            149,
            json!({
                "registrationType": 0,
                "duration": "1000",
                "id": "D85742D268617751",
                "name": "cat",
            }),
        ),
        record(
            0x424E,
            161,
            json!({ "namespaceId": "D85742D268617751", "address": ADDRESS, "aliasAction": 1 }),
        ),
        record(
            0x434E,
            145,
            json!({ "namespaceId": CURRENCY_ALIAS, "mosaicId": MOSAIC, "aliasAction": 1 }),
        ),
        record(
            0x414D,
            150,
            json!({
                "id": MOSAIC,
                "duration": "0",
                "nonce": 1234,
                "flags": 7,
                "divisibility": 6,
            }),
        ),
        record(
            0x424D,
            145,
            json!({ "mosaicId": MOSAIC, "action": 1, "delta": "500" }),
        ),
        record(
            0x4155,
            160,
            json!({
                "minApprovalDelta": 1,
                "minRemovalDelta": -1,
                "addressAdditions": [ADDRESS],
                "addressDeletions": [],
            }),
        ),
        aggregate_record(),
        bonded,
        record(
            0x4148,
            184,
            json!({
                "mosaicId": CURRENCY_ALIAS,
                "amount": "10000000",
                "duration": "480",
                "hash": hash("D1"),
            }),
        ),
        record(
            0x4152,
            209,
            json!({
                "recipientAddress": ALIAS,
                "secret": hash("3F"),
                "mosaicId": MOSAIC,
                "amount": "10",
                "duration": "100",
                "hashAlgorithm": 0,
            }),
        ),
        record(
            0x4252,
            191,
            json!({
                "recipientAddress": ADDRESS,
                "secret": hash("3F"),
                "hashAlgorithm": 0,
                "proof": "9A493664",
            }),
        ),
        record(
            0x4150,
            160,
            json!({
                "restrictionFlags": 1,
                "restrictionAdditions": [ADDRESS],
                "restrictionDeletions": [],
            }),
        ),
        record(
            0x4250,
            144,
            json!({
                "restrictionFlags": 2,
                "restrictionAdditions": [MOSAIC],
                "restrictionDeletions": [],
            }),
        ),
        record(
            0x4350,
            138,
            json!({
                "restrictionFlags": 16388,
                "restrictionAdditions": [0x4154],
                "restrictionDeletions": [],
            }),
        ),
        record(0x414C, 161, json!({ "linkedPublicKey": COSIGNER, "linkAction": 1 })),
        record(0x424C, 161, json!({ "linkedPublicKey": COSIGNER, "linkAction": 1 })),
        record(0x4243, 161, json!({ "linkedPublicKey": COSIGNER, "linkAction": 0 })),
        record(
            0x4143,
            169,
            json!({
                "linkedPublicKey": COSIGNER,
                "startEpoch": 1,
                "endEpoch": 360,
                "linkAction": 1,
            }),
        ),
        record(
            0x4151,
            170,
            json!({
                "mosaicId": MOSAIC,
                "referenceMosaicId": "0000000000000000",
                "restrictionKey": "00000000000004D2",
                "previousRestrictionValue": "0",
                "previousRestrictionType": 0,
                "newRestrictionValue": "1",
                "newRestrictionType": 1,
            }),
        ),
        record(
            0x4251,
            184,
            json!({
                "mosaicId": MOSAIC,
                "restrictionKey": "00000000000004D2",
                "targetAddress": ALIAS,
                "previousRestrictionValue": "18446744073709551615",
                "newRestrictionValue": "2",
            }),
        ),
        record(
            0x4144,
            167,
            json!({
                "targetAddress": ADDRESS,
                "scopedMetadataKey": "00000000000000A1",
                "valueSizeDelta": 3,
                "value": "414243",
            }),
        ),
        record(
            0x4244,
            175,
            json!({
                "targetAddress": ADDRESS,
                "scopedMetadataKey": "00000000000000A1",
                "targetMosaicId": MOSAIC,
                "valueSizeDelta": -2,
                "value": "414243",
            }),
        ),
        record(
            0x4344,
            175,
            json!({
                "targetAddress": ADDRESS,
                "scopedMetadataKey": "00000000000000A1",
                "targetNamespaceId": "D85742D268617751",
                "valueSizeDelta": 3,
                "value": "414243",
            }),
        ),
    ]
}
