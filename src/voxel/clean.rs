//! Normalization of raw LiDAR point exports
//!
//! Input is CSV with a header row naming at least the columns `x`, `y` and
//! `z`. Coordinates are rounded half-to-even, shifted so the smallest value
//! on each axis becomes 0, and reduced to the first point of every `(x, y)`
//! column. The result is headerless `x,y,z` integer lines ready for
//! [`voxelize_file`](super::voxelize_file).

use crate::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn column_index(header: &[&str], name: &str, source: &Path) -> Result<usize> {
    header
        .iter()
        .position(|col| col.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::MalformedPoint {
            path: source.to_path_buf(),
            line: 1,
            text: header.join(","),
            message: format!("header has no '{name}' column"),
        })
}

/// Clean CSV point text into non-negative integer triples
pub fn clean_points(text: &str, source: &Path) -> Result<Vec<[u64; 3]>> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
    let Some((_, header)) = lines.next() else {
        return Err(Error::EmptyPointFile(source.to_path_buf()));
    };
    let header: Vec<&str> = header.split(',').collect();
    let columns = [
        column_index(&header, "x", source)?,
        column_index(&header, "y", source)?,
        column_index(&header, "z", source)?,
    ];

    let mut rounded: Vec<[i64; 3]> = Vec::new();
    for (idx, raw) in lines {
        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        let mut point = [0i64; 3];
        for (slot, &col) in point.iter_mut().zip(&columns) {
            let value = fields
                .get(col)
                .and_then(|f| f.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::MalformedPoint {
                    path: source.to_path_buf(),
                    line: idx + 1,
                    text: raw.trim().to_string(),
                    message: format!("column {} is missing or not a number", col + 1),
                })?;
            *slot = value.round_ties_even() as i64;
        }
        rounded.push(point);
    }

    if rounded.is_empty() {
        return Err(Error::EmptyPointFile(source.to_path_buf()));
    }

    let mut min = rounded[0];
    for point in &rounded {
        for axis in 0..3 {
            min[axis] = min[axis].min(point[axis]);
        }
    }

    let mut seen = HashSet::new();
    let cleaned = rounded
        .into_iter()
        .map(|p| {
            [
                (p[0] - min[0]) as u64,
                (p[1] - min[1]) as u64,
                (p[2] - min[2]) as u64,
            ]
        })
        .filter(|p| seen.insert((p[0], p[1])))
        .collect();
    Ok(cleaned)
}

/// Clean `input` and write the integer triples to `output`.
///
/// Returns the number of points kept.
pub fn clean_file(input: &Path, output: &Path) -> Result<usize> {
    let text = fs::read_to_string(input).map_err(|e| Error::file(input, e))?;
    let points = clean_points(&text, input)?;

    let mut out = String::new();
    for [x, y, z] in &points {
        out.push_str(&format!("{x},{y},{z}\n"));
    }
    fs::write(output, out).map_err(|e| Error::file(output, e))?;

    log::info!("cleaned {} -> {} ({} points)", input.display(), output.display(), points.len());
    Ok(points.len())
}
