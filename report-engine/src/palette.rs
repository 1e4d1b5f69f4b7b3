//! FILENAME: report-engine/src/palette.rs
//! Cyclic color assignment for ordered series lists.

/// The fixed base palette. Assignment cycles through these in order.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#0072bd",
    "#d95319",
    "#edb120",
    "#7e2f8e",
    "#77ac30",
    "#4dbeee",
    "#a2142f",
];

/// Returns `n` colors, cycling over the base palette (`index mod 7`).
pub fn color_list(n: usize) -> Vec<&'static str> {
    (0..n).map(|i| DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()]).collect()
}
