//! Text rendering of [`ErrorTable`]s: a plain table and a horizontal bar chart.

use crate::{ErrorTable, Primitive};
use std::fmt::Write;

/// Render **table** as two right-aligned columns `k` and `SSE`, one row per swept k.
pub fn render_table<T: Primitive>(table: &ErrorTable<T>) -> String {
    let rows: Vec<(String, String)> = table.iter()
        .map(|(k, e)| (k.to_string(), format!("{:.6}", e)))
        .collect();
    let k_width = rows.iter().map(|(k, _)| k.len()).chain(Some(1)).max().unwrap_or(1);
    let e_width = rows.iter().map(|(_, e)| e.len()).chain(Some(3)).max().unwrap_or(3);

    let mut out = String::new();
    let _ = writeln!(out, "{:>kw$}  {:>ew$}", "k", "SSE", kw = k_width, ew = e_width);
    for (k, e) in rows {
        let _ = writeln!(out, "{:>kw$}  {:>ew$}", k, e, kw = k_width, ew = e_width);
    }
    out
}

/// Render **table** as one bar per swept k. The largest error spans **width** characters,
/// all other bars are scaled relative to it.
pub fn render_bar_chart<T: Primitive>(table: &ErrorTable<T>, width: usize) -> String {
    let max = match table.max_error() {
        Some(max) if max > T::zero() => max,
        _ => T::one(),
    };
    let k_width = table.iter().map(|(k, _)| k.to_string().len()).max().unwrap_or(1);

    let mut out = String::new();
    for (k, e) in table.iter() {
        let len = (e / max * T::from_count(width)).round().to_usize().unwrap_or(0).min(width);
        let _ = writeln!(out, "{:>kw$} | {:<bw$} {:.4}", k, "#".repeat(len), e, kw = k_width, bw = width);
    }
    out
}
