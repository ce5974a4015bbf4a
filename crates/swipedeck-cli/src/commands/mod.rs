pub mod boost;
pub mod classify;
pub mod config;
pub mod deck;

/// Print one value as a single JSON line.
pub fn emit<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
