//! Text encoding of circuits (`.nrg` level files).
//!
//! ```text
//! 2 3 S
//! S 1 . L 0 3
//! . 0 1 . .
//! ```
//!
//! The first line is `<height> <width> <shape-code>`. Each following line is
//! one row of `width` cells. A cell is a part marker (`S`, `W`, `L` or `.`)
//! followed by the indices of its connected edges. Cells with no tile are
//! written as a bare `.`.
//!
//! Every declared cell decodes to a tile, except a bare `.` at the bottom of
//! an odd column in a hexagonal grid: the brick layout has no cell there.
//! A part or edge in that slot still decodes, since a circuit with holes can
//! leave an occupied odd-column tile on its last row.

use energy_core::{Circuit, Dimension, GridPosition, Part, Tile, TilingKind};
use tracing::trace;

use crate::error::LevelError;

// ===========================================================================
// Encoding
// ===========================================================================

/// Render `circuit` as level file text.
///
/// Height, width and shape come from the circuit's current tiles. An empty
/// circuit encodes as `0 0 S`.
pub fn encode(circuit: &Circuit) -> String {
    let Dimension { height, width } = circuit.dimension();
    let shape = circuit.shape().unwrap_or(TilingKind::Square);

    let mut out = format!("{height} {width} {}\n", shape.code());
    for row in 0..height {
        let cells: Vec<String> = (0..width)
            .map(|col| match circuit.tile_at(GridPosition::at(row, col)) {
                Some(tile) => encode_tile(tile),
                None => Part::Empty.marker().to_string(),
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

fn encode_tile(tile: &Tile) -> String {
    std::iter::once(tile.part().marker().to_string())
        .chain(tile.connected_edges().iter().map(usize::to_string))
        .collect::<Vec<_>>()
        .join(" ")
}

// ===========================================================================
// Decoding
// ===========================================================================

struct Header {
    height: u32,
    width: u32,
    shape: TilingKind,
}

/// One decoded cell: its part and connected edges.
type Cell = (Part, Vec<usize>);

/// Parse level file text into a circuit.
///
/// Fails with [`LevelError::Malformed`] naming the offending line. Trailing
/// blank lines are ignored.
pub fn decode(text: &str) -> Result<Circuit, LevelError> {
    let lines: Vec<&str> = text.lines().collect();
    let header_line = lines
        .first()
        .ok_or_else(|| LevelError::malformed(1, "missing header"))?;
    let header = parse_header(header_line)?;
    let height = header.height as usize;

    let rows = &lines[1..];
    if rows.len() < height {
        return Err(LevelError::malformed(
            lines.len() + 1,
            format!("expected {height} rows, found {}", rows.len()),
        ));
    }
    if let Some(extra) = rows[height..].iter().position(|l| !l.trim().is_empty()) {
        return Err(LevelError::malformed(
            height + extra + 2,
            "unexpected content after the last row",
        ));
    }

    let mut circuit = Circuit::with_shape(header.shape);
    for (row, text) in rows[..height].iter().enumerate() {
        let line = row + 2;
        let cells = parse_row(line, text, header.shape)?;
        if cells.len() != header.width as usize {
            return Err(LevelError::malformed(
                line,
                format!("expected {} cells, found {}", header.width, cells.len()),
            ));
        }
        let row = row as u32;
        for (col, (part, edges)) in cells.into_iter().enumerate() {
            let pos = GridPosition::at(row, col as u32);
            if is_outside_brick_layout(&header, pos) && part == Part::Empty && edges.is_empty() {
                trace!(%pos, "skipping bare cell outside the hexagonal layout");
                continue;
            }
            let mut tile = Tile::new(header.shape, pos, part);
            tile.connect_many(&edges);
            circuit.add_tile(tile)?;
        }
    }
    Ok(circuit)
}

fn parse_header(text: &str) -> Result<Header, LevelError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [height, width, code] = tokens.as_slice() else {
        return Err(LevelError::malformed(
            1,
            format!("expected '<height> <width> <shape>', found '{text}'"),
        ));
    };
    let parse_size = |token: &str, what: &str| {
        token
            .parse::<u32>()
            .map_err(|_| LevelError::malformed(1, format!("invalid {what} '{token}'")))
    };
    Ok(Header {
        height: parse_size(*height, "height")?,
        width: parse_size(*width, "width")?,
        shape: TilingKind::from_code(*code).map_err(|e| LevelError::malformed(1, e.to_string()))?,
    })
}

fn parse_row(line: usize, text: &str, shape: TilingKind) -> Result<Vec<Cell>, LevelError> {
    let mut cells: Vec<Cell> = Vec::new();
    for token in text.split_whitespace() {
        if let Ok(part) = Part::from_marker(token) {
            cells.push((part, Vec::new()));
            continue;
        }
        let edge: usize = token
            .parse()
            .map_err(|_| LevelError::malformed(line, format!("unexpected token '{token}'")))?;
        if edge >= shape.edge_count() {
            return Err(LevelError::malformed(
                line,
                format!("edge {edge} out of range for a {shape:?} tile"),
            ));
        }
        match cells.last_mut() {
            Some((_, edges)) => edges.push(edge),
            None => {
                return Err(LevelError::malformed(
                    line,
                    format!("edge {edge} before any part marker"),
                ));
            }
        }
    }
    Ok(cells)
}

fn is_outside_brick_layout(header: &Header, pos: GridPosition) -> bool {
    header.shape == TilingKind::Hexagon && pos.col() % 2 == 1 && pos.row() + 1 == header.height
}
