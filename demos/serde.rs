use serde::Serialize;
use verreq::{Requirement, Version};

#[derive(Serialize)]
struct Dependency {
    name: String,
    requirement: Requirement,
    resolved: Version,
}

fn main() {
    let dependency = Dependency {
        name: "parser".to_string(),
        requirement: "^3.4".parse().unwrap(),
        resolved: "3.4.5-rc1".parse().unwrap(),
    };

    println!("{}", serde_json::to_string(&dependency).unwrap());
}
