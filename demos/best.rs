use verreq::{Requirement, Version};

fn main() {
    let versions: Vec<_> = vec!["1.2.3", "1.2.4", "1.2.5", "1.2.6", "1.3.0"]
        .iter()
        .map(|s| Version::parse(s).unwrap())
        .collect();
    let requirement = Requirement::parse("~1.2.3").unwrap();

    let result = requirement.best(&versions);

    assert_eq!(result, Some(&Version::parse("1.2.6").unwrap()));
}
