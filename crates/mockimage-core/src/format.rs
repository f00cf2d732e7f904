//! Human-readable byte sizes.

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Format a byte count: whole bytes below 1 KiB, KB with two decimals
/// below 1 MiB, MB with two decimals otherwise.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
