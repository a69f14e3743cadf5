use std::collections::HashSet;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use karma_gate::types::{Identity, IDENTITY_HEX_LEN};
use karma_gate::KarmaError;

#[test]
fn known_sha256_vector() {
    let id = Identity::derive("abc").unwrap();
    assert_eq!(
        id.as_str(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn same_input_same_identity() {
    let a = Identity::derive("john@gmail.com").unwrap();
    let b = Identity::derive("john@gmail.com").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, Identity::derive("IP:192.168.1.1").unwrap());
}

#[test]
fn output_is_64_lowercase_hex() {
    for raw in ["x", "IP:10.0.0.1", "session-3f9a", "ünïcödé@example.org"] {
        let id = Identity::derive(raw).unwrap();
        assert_eq!(id.as_str().len(), IDENTITY_HEX_LEN);
        assert!(id
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        assert!(!id.as_str().contains(raw));
    }
}

#[test]
fn no_collisions_in_a_large_sample() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut raws = HashSet::new();
    while raws.len() < 20_000 {
        let len = rng.gen_range(1..24);
        let s: String = (&mut rng).sample_iter(&Alphanumeric).take(len).map(char::from).collect();
        raws.insert(s);
    }

    let ids: HashSet<Identity> = raws.iter().map(|r| Identity::derive(r).unwrap()).collect();
    assert_eq!(ids.len(), raws.len());
}

#[test]
fn empty_identity_is_rejected() {
    assert!(matches!(Identity::derive(""), Err(KarmaError::InvalidInput(_))));
}

#[test]
fn from_hex_accepts_only_derived_shape() {
    let id = Identity::derive("someone").unwrap();
    assert_eq!(Identity::from_hex(id.as_str()).unwrap(), id);

    assert!(Identity::from_hex(&id.as_str().to_uppercase()).is_err());
    assert!(Identity::from_hex(&id.as_str()[..63]).is_err());
    assert!(Identity::from_hex("someone").is_err());
}

#[test]
fn debug_output_is_shortened() {
    let id = Identity::derive("john@gmail.com").unwrap();
    let dbg = format!("{:?}", id);
    assert!(dbg.contains(id.short()));
    assert!(!dbg.contains(id.as_str()));
    assert!(!dbg.contains("john"));
}

#[test]
fn stored_identity_must_be_a_digest() {
    let id = Identity::derive("bob@example.com").unwrap();
    let json = serde_json::to_string(&id).unwrap();
    let back: Identity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);

    for bad in [r#""abc""#, r#""é""#, r#""""#] {
        assert!(serde_json::from_str::<Identity>(bad).is_err(), "{}", bad);
    }
}
