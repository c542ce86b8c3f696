//! FFI crate exposing the MealWeek core to the Flutter UI.

pub mod api;
