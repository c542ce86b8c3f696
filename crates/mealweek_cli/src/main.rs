//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mealweek_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("mealweek_core ping={}", mealweek_core::ping());
    println!("mealweek_core version={}", mealweek_core::core_version());
}
