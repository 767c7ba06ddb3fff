//! Persisted grid format.
//!
//! A save is the JSON array `[metadata, [internTable, tiles]]` where metadata
//! is `{"width", "height", "wrap"}` and the second element is the codec
//! output for the row-major tile array. Loading checks every part of that
//! shape and builds nothing until all of it holds.

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::codec;
use crate::error::{Error, Result};
use crate::grid::{Grid, MAX_SIDE, Tile};
use crate::topology::Wrap;

/// The grid as a persisted JSON value.
pub fn save_value(grid: &Grid) -> Result<Value> {
    let tiles = serde_json::to_value(grid.tiles())?;
    let (packed, table) = codec::compress(&tiles);
    debug!(tiles = grid.len(), strings = table.len(), "compressed tiles");
    Ok(json!([
        {
            "width": grid.width(),
            "height": grid.height(),
            "wrap": grid.wrap().tag()
        },
        [table, packed]
    ]))
}

/// The grid as a persisted JSON string.
pub fn save(grid: &Grid) -> Result<String> {
    let text = serde_json::to_string(&save_value(grid)?)?;
    info!(
        width = grid.width(),
        height = grid.height(),
        wrap = %grid.wrap(),
        bytes = text.len(),
        "saved grid"
    );
    Ok(text)
}

fn pair(value: Value, what: &str) -> Result<(Value, Value)> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            let mut items = items.into_iter();
            match (items.next(), items.next()) {
                (Some(a), Some(b)) => Ok((a, b)),
                _ => Err(Error::malformed(format!("{what} must be a two-element array"))),
            }
        }
        Value::Array(items) => Err(Error::malformed(format!(
            "{what} must be a two-element array, got {} elements",
            items.len()
        ))),
        _ => Err(Error::malformed(format!("{what} must be an array"))),
    }
}

fn side(metadata: &Value, key: &str) -> Result<usize> {
    let raw = metadata
        .get(key)
        .ok_or_else(|| Error::malformed(format!("metadata is missing `{key}`")))?;
    match raw.as_u64() {
        Some(0) | None => Err(Error::malformed(format!(
            "metadata `{key}` must be a positive integer, got {raw}"
        ))),
        Some(n) if n > MAX_SIDE as u64 => Err(Error::malformed(format!(
            "metadata `{key}` is {n}, above the limit of {MAX_SIDE}"
        ))),
        Some(n) => Ok(n as usize),
    }
}

fn wrap_tag(metadata: &Value) -> Result<Wrap> {
    let raw = metadata
        .get("wrap")
        .ok_or_else(|| Error::malformed("metadata is missing `wrap`"))?;
    let tag = raw
        .as_str()
        .ok_or_else(|| Error::malformed(format!("metadata `wrap` must be a string, got {raw}")))?;
    Wrap::ALL
        .into_iter()
        .find(|w| w.tag() == tag)
        .ok_or_else(|| Error::UnknownWrap(tag.to_owned()))
}

fn intern_table(value: Value) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(Error::malformed("intern table must be an array"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(Error::malformed(format!(
                "intern table entry {i} must be a string, got {other}"
            ))),
        })
        .collect()
}

/// Rebuilds a grid from a persisted JSON value.
pub fn load_value(value: Value) -> Result<Grid> {
    let (metadata, compressed) = pair(value, "saved grid")?;
    if !metadata.is_object() {
        return Err(Error::malformed("metadata must be an object"));
    }
    let width = side(&metadata, "width")?;
    let height = side(&metadata, "height")?;
    let wrap = wrap_tag(&metadata)?;

    let (table, packed) = pair(compressed, "compressed tiles")?;
    let table = intern_table(table)?;
    if !packed.is_array() {
        return Err(Error::malformed("compressed tiles must be an array"));
    }
    let Value::Array(raw_tiles) = codec::decompress(packed, &table)? else {
        return Err(Error::malformed("compressed tiles must be an array"));
    };

    let expected = width * height;
    if raw_tiles.len() != expected {
        return Err(Error::TileCount {
            width,
            height,
            expected,
            actual: raw_tiles.len(),
        });
    }

    let tiles = raw_tiles
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_value::<Tile>(raw)
                .map_err(|e| Error::malformed(format!("tile {i}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let grid = Grid::from_tiles(width, height, wrap, tiles)?;
    info!(width, height, %wrap, strings = table.len(), "loaded grid");
    Ok(grid)
}

/// Rebuilds a grid from a persisted JSON string.
pub fn load(text: &str) -> Result<Grid> {
    load_value(serde_json::from_str(text)?)
}
