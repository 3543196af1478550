//! Parsing, querying and rendering list text, plus a Serde round trip.
//!
//! Run with: cargo run --example simple

use lisp_list::{from_str, parse, to_string, PrintOptions};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let source = r#"(id 42 name "Alice Johnson" roles (admin ops) quota 1.5)"#;

    let root = parse(source)?.ok_or("empty document")?;
    let record = &root[0];

    if let Some(name) = record.get("name") {
        println!("name: {}", name.text());
    }
    if let Some(quota) = record.get("quota").and_then(|n| n.parse_value()) {
        println!("quota: {} ({:?})", quota, quota.kind());
    }

    println!("JSON: {}", record.to_json());
    println!("Pretty:\n{}", record.to_lisp(&PrintOptions::pretty().with_indent(2)));

    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    let text = to_string(&users)?;
    println!("Encoded:\n{}\n", text);

    let users_back: Vec<User> = from_str(&text)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
