use notecard_schema::audit;
use notecard_schema::config::CheckerConfig;
use notecard_schema::loader::SchemaRegistry;

fn main() {
    let config = match CheckerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("notecard-schema: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let registry = match SchemaRegistry::new(&config.schema_dir) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("notecard-schema: cannot load schema corpus: {e}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let ok = match args.first().map(String::as_str) {
        Some("check") if args.len() == 1 => check_corpus(&registry),
        Some("validate") if args.len() == 3 => validate_file(&registry, &args[1], &args[2]),
        _ => {
            eprintln!("usage: notecard-schema check");
            eprintln!("       notecard-schema validate <schema-file-name> <instance.json>");
            std::process::exit(2);
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

/// Validate every embedded sample and run the metadata audit.
fn check_corpus(registry: &SchemaRegistry) -> bool {
    let mut failures = 0usize;
    let mut samples = 0usize;

    for doc in registry.documents() {
        let instances = match doc.sample_instances() {
            Ok(list) => list,
            Err(e) => {
                eprintln!("FAIL {}: {e}", doc.name);
                failures += 1;
                continue;
            }
        };

        for (description, instance) in &instances {
            samples += 1;
            if let Err(e) = notecard_schema::validate(instance, &doc.root) {
                eprintln!("FAIL {} (sample \"{description}\"):\n{e}", doc.name);
                failures += 1;
            }
        }
    }

    let findings = audit::audit_registry(registry);
    for finding in &findings {
        eprintln!("AUDIT {finding}");
    }
    failures += findings.len();

    println!(
        "{} schemas, {} samples, {} failures",
        registry.count(),
        samples,
        failures
    );
    failures == 0
}

/// Validate one instance file against a named schema.
fn validate_file(registry: &SchemaRegistry, schema_name: &str, instance_path: &str) -> bool {
    let text = match std::fs::read_to_string(instance_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("notecard-schema: cannot read '{instance_path}': {e}");
            return false;
        }
    };
    let instance: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("notecard-schema: '{instance_path}' is not valid JSON: {e}");
            return false;
        }
    };

    match registry.validate(schema_name, &instance) {
        Ok(()) => {
            println!("{instance_path} conforms to {schema_name}");
            true
        }
        Err(e) => {
            eprintln!("{instance_path} does not conform to {schema_name}:\n{e}");
            false
        }
    }
}
