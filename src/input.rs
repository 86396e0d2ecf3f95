//! Loading of sample files.
//!
//! Every non-blank line holds one sample as two finite real numbers separated by a semicolon, e.g. `1.77;3.46`.

use crate::error::{KMeansError, Result};
use crate::{Point, Primitive};
use std::path::Path;
use std::str::FromStr;

fn parse_line<T: Primitive + FromStr>(line: &str) -> Option<Point<T>> {
    let mut fields = line.split(';');
    let x: T = fields.next()?.trim().parse().ok()?;
    let y: T = fields.next()?.trim().parse().ok()?;
    if fields.next().is_some() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::new(x, y))
}

/// Parse all samples from **text**, keeping their order.
///
/// ## Errors
/// [`KMeansError::Parse`] with the (1-based) number of the first malformed line.
pub fn parse_points<T: Primitive + FromStr>(text: &str) -> Result<Vec<Point<T>>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(line).ok_or_else(|| KMeansError::Parse {
            line: idx + 1,
            content: line.to_string(),
        }))
        .collect()
}

/// Read and parse the sample file at **path**.
pub fn load_points<T: Primitive + FromStr>(path: impl AsRef<Path>) -> Result<Vec<Point<T>>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let points = parse_points(&text)?;
    tracing::debug!(path = %path.display(), sample_cnt = points.len(), "loaded samples");
    Ok(points)
}
