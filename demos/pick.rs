fn main() {
    let picked = verreq::pick("~1.2.5 || ^2.0.0", ["1.2.4", "1.2.9", "1.3.0", "2.4.1", "3.0.0"])
        .unwrap();

    assert_eq!(picked.as_deref(), Some("2.4.1"));

    let nothing = verreq::pick(">=5.0.0", ["1.0.0", "1.2.5"]).unwrap();
    assert_eq!(nothing, None);
}
