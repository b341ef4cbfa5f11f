//! Derive a schema from tagged structs.
//!
//! Shows nested records, required markers, keyword segments, skipped
//! fields, and the links capability.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tagschema-demos --example derive_schema
//! ```

use tagschema::{JsonSchema, Links, Reflect, Relation};

#[derive(Reflect, Default)]
struct Address {
    #[tag(json = "street")]
    street: String,
    #[tag(json = "city,required")]
    city: String,
    #[tag(json = "zip,pattern=^[0-9]{5}$")]
    zip: String,
}

#[derive(Reflect, Default)]
#[reflect(links)]
struct User {
    #[tag(json = "id,required")]
    id: u64,
    #[tag(json = "email,format=email,required")]
    email: String,
    #[tag(json = "nickname,omitempty")]
    nickname: Option<String>,
    #[tag(json = "roles")]
    roles: Vec<String>,
    #[tag(json = "address")]
    address: Address,
    #[tag(json = "created,type=string,format=date-time")]
    created: Timestamp,
    #[tag(json = "-")]
    password_hash: String,
}

#[derive(Reflect, Default)]
struct Timestamp {
    #[tag(json = "secs")]
    secs: i64,
}

impl Links for User {
    fn links(&self) -> Vec<Relation> {
        vec![
            Relation::from([
                ("href".to_string(), format!("/users/{}", self.id)),
                ("rel".to_string(), "self".to_string()),
            ]),
            Relation::from([
                ("href".to_string(), format!("/users/{}/roles", self.id)),
                ("rel".to_string(), "roles".to_string()),
            ]),
        ]
    }
}

fn main() {
    let user = User {
        id: 42,
        email: "ada@example.com".into(),
        nickname: None,
        roles: vec!["admin".into()],
        address: Address {
            street: "Kauppakatu 1".into(),
            city: "Oulu".into(),
            zip: "90100".into(),
        },
        created: Timestamp { secs: 0 },
        password_hash: String::new(),
    };

    let schema = JsonSchema::new(&user, Some("user"), Some("A registered user"));
    match schema.to_json_pretty() {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Failed to serialize schema: {e}"),
    }

    println!();
    println!("=== Non-record inputs ===");
    for (label, value) in [
        ("absent", serde_json::to_string(&JsonSchema::new(&None::<User>, None, None))),
        ("integer", serde_json::to_string(&JsonSchema::new(&7_u8, None, None))),
        ("empty string", serde_json::to_string(&JsonSchema::new(&"", None, None))),
    ] {
        match value {
            Ok(text) => println!("  {label}: {text}"),
            Err(e) => eprintln!("  {label}: {e}"),
        }
    }
}
