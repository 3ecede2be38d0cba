use clap::{Parser, Subcommand};
use hospital_core::{
    schema::check_document, validation::validate_hospital_payload, CoreConfig, FieldErrors,
    FileStore, GatewayError, RecordStoreGateway, StoreBackend, DEFAULT_HOSPITAL_DATA_DIR,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital onboarding records CLI")]
struct Cli {
    /// Data directory of the file store (falls back to HOSPITAL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all registered hospitals
    List,
    /// Check a JSON payload against both validation layers without storing it
    Validate {
        /// Path to a JSON file shaped like the POST body
        file: PathBuf,
    },
    /// Register a hospital from a JSON payload
    Create {
        /// Path to a JSON file shaped like the POST body
        file: PathBuf,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var_os("HOSPITAL_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOSPITAL_DATA_DIR));

    match cli.command {
        Some(Commands::List) => {
            let gateway = open_gateway(data_dir)?;
            let hospitals = gateway.list()?;
            if hospitals.is_empty() {
                println!("No hospitals found.");
            } else {
                for hospital in hospitals {
                    println!(
                        "ID: {}, Name: {}, Size: {}, Location: {}, Beds: {}, Created: {}",
                        hospital.id,
                        hospital.name,
                        hospital.size,
                        hospital.location,
                        hospital.total_beds,
                        hospital.created_at.to_rfc3339()
                    );
                }
            }
        }
        Some(Commands::Validate { file }) => {
            let payload = read_payload(&file)?;
            let checked = validate_hospital_payload(&payload)
                .map_err(|errors| ("Validation failed.", errors))
                .and_then(|draft| {
                    let doc = serde_json::to_value(&draft).map_err(|e| {
                        let mut errors = FieldErrors::new();
                        errors.push("document", e.to_string());
                        ("Database validation failed.", errors)
                    })?;
                    check_document(&doc).map_err(|errors| ("Database validation failed.", errors))
                });
            match checked {
                Ok(doc) => println!("Valid: {}", doc.name),
                Err((summary, errors)) => {
                    print_field_errors(summary, &errors);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::Create { file }) => {
            let payload = read_payload(&file)?;
            let gateway = open_gateway(data_dir)?;
            match gateway.create(&payload) {
                Ok(record) => println!("Registered {} with ID: {}", record.name, record.id),
                Err(GatewayError::Validation(errors)) => {
                    print_field_errors("Validation failed.", &errors);
                    return Ok(ExitCode::FAILURE);
                }
                Err(GatewayError::Schema(errors)) => {
                    print_field_errors("Database validation failed.", &errors);
                    return Ok(ExitCode::FAILURE);
                }
                Err(GatewayError::Conflict { field, value }) => {
                    eprintln!("Conflict: A record with this {field} ('{value}') already exists.");
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            }
        }
        None => {
            println!("Use 'hospital --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_gateway(data_dir: PathBuf) -> Result<RecordStoreGateway, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(StoreBackend::Files, data_dir)?;
    let store = FileStore::open(&cfg)?;
    Ok(RecordStoreGateway::new(Arc::new(store)))
}

fn read_payload(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let contents = std::fs::read(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let payload = serde_json::from_slice(&contents)
        .map_err(|e| format!("{} is not valid JSON: {}", path.display(), e))?;
    Ok(payload)
}

fn print_field_errors(summary: &str, errors: &FieldErrors) {
    eprintln!("{summary}");
    for (field, messages) in errors.as_map() {
        for message in messages {
            eprintln!("  {field}: {message}");
        }
    }
}
