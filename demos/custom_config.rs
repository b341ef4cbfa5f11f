//! Derive a schema under a YAML configuration.
//!
//! Reads the configuration from the path given as the first argument, or
//! uses an inline document when no path is given.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tagschema-demos --example custom_config
//! cargo run -p tagschema-demos --example custom_config -- tagschema.yml
//! ```

use tagschema::{JsonSchema, Reflect, SchemaConfig};

const INLINE_CONFIG: &str = r#"
tag_key: xml
required_keywords:
  - required
  - mandatory
additional_properties: true
max_depth: 1
"#;

#[derive(Reflect)]
struct Order {
    #[tag(json = "orderId,required", xml = "OrderId,mandatory")]
    id: u32,
    #[tag(json = "lines", xml = "Lines")]
    lines: Vec<Line>,
    #[tag(json = "customer", xml = "Customer")]
    customer: Customer,
}

#[derive(Reflect)]
struct Line {
    #[tag(json = "sku", xml = "Sku")]
    sku: String,
}

#[derive(Reflect)]
struct Customer {
    #[tag(json = "name", xml = "Name,mandatory")]
    name: String,
    #[tag(json = "billing", xml = "Billing")]
    billing: Billing,
}

#[derive(Reflect)]
struct Billing {
    #[tag(json = "iban", xml = "Iban")]
    iban: String,
}

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => SchemaConfig::load(&path),
        None => SchemaConfig::from_yaml_str(INLINE_CONFIG),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let order = Order {
        id: 1,
        lines: Vec::new(),
        customer: Customer {
            name: "ACME".into(),
            billing: Billing {
                iban: String::new(),
            },
        },
    };

    let schema = JsonSchema::with_config(&order, Some("order"), None, &config);
    match schema.to_json_pretty() {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Failed to serialize schema: {e}"),
    }
}
