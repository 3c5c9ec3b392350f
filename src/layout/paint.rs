//! Brush-paint engine for grid floors.
//!
//! DESIGN
//! ======
//! Relabel-all policy: painting sets one cell's kind, then the whole cell
//! sequence is rescanned and every seating cell gets `"{prefix}{n}"`, with
//! one 1-based counter per prefix (`S` for seats, `G` for group seats) in
//! row-major order. Non-seating cells always end with an empty label.
//!
//! A paint may renumber cells other than the one painted. Labels stay dense
//! and duplicate-free after every operation.
//!
//! A cell painted with a non-seating brush drops back to `Available`, so a
//! wall never carries a booking status and a seat painted back in starts
//! free.
//!
//! An unknown cell id is a silent no-op: the floor is left exactly as it was
//! and the caller just gets `PaintOutcome::UnknownCell` back.

#[cfg(test)]
#[path = "paint_test.rs"]
mod tests;

use serde::Serialize;

use super::{Floor, FloorLayout, Seat, SeatKind, SeatStatus};

/// Result of a single paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PaintOutcome {
    /// The cell was found; `previous` is its kind before the paint.
    Painted { previous: SeatKind },
    /// No cell with that id; nothing changed.
    UnknownCell,
    /// The floor uses a flexible layout, which has no paintable grid.
    NotGrid,
}

/// Totals for a brush stroke across several cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrokeSummary {
    pub painted: usize,
    pub unknown: usize,
}

/// Paint one grid cell with `brush` and re-derive all seat labels.
pub fn paint_cell(floor: &mut Floor, cell_id: &str, brush: SeatKind) -> PaintOutcome {
    match &mut floor.layout {
        FloorLayout::Grid(grid) => paint_cells(grid.cells_mut(), cell_id, brush),
        FloorLayout::Flexible(_) => PaintOutcome::NotGrid,
    }
}

/// Paint each id in order, as a click-and-drag over the grid would.
///
/// Returns `None` for flexible floors.
pub fn paint_stroke<S: AsRef<str>>(floor: &mut Floor, cell_ids: &[S], brush: SeatKind) -> Option<StrokeSummary> {
    let FloorLayout::Grid(grid) = &mut floor.layout else {
        return None;
    };

    let mut summary = StrokeSummary::default();
    for cell_id in cell_ids {
        match paint_cells(grid.cells_mut(), cell_id.as_ref(), brush) {
            PaintOutcome::Painted { .. } => summary.painted += 1,
            PaintOutcome::UnknownCell | PaintOutcome::NotGrid => summary.unknown += 1,
        }
    }
    Some(summary)
}

/// Paint within a bare cell sequence.
pub fn paint_cells(cells: &mut [Seat], cell_id: &str, brush: SeatKind) -> PaintOutcome {
    let Some(cell) = cells.iter_mut().find(|c| c.id == cell_id) else {
        return PaintOutcome::UnknownCell;
    };
    let previous = std::mem::replace(&mut cell.kind, brush);
    if !brush.is_seating() {
        cell.status = SeatStatus::Available;
    }
    relabel(cells);
    PaintOutcome::Painted { previous }
}

/// Renumber every seating cell in scan order; clear all other labels.
pub fn relabel(cells: &mut [Seat]) {
    let mut seats = 0u32;
    let mut group_seats = 0u32;
    for cell in cells {
        let counter = match cell.kind {
            SeatKind::Seat => &mut seats,
            SeatKind::GroupSeat => &mut group_seats,
            _ => {
                cell.label.clear();
                continue;
            }
        };
        *counter += 1;
        if let Some(prefix) = cell.kind.label_prefix() {
            cell.label = format!("{prefix}{counter}");
        }
    }
}
