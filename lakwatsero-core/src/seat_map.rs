//! Seat grid layout.
//!
//! Seats are laid out row by row in ascending numeric order, six to a row,
//! with an aisle gap after the third seat. The grid is a pure function of the
//! fetched inventory and the set of seat numbers currently held by the
//! passenger list; the only thing it produces besides the layout is a
//! [`SeatClick`] when an interactive grid is pressed.

use std::collections::HashSet;
use std::fmt;

use lakwatsero_shared::models::Seat;

pub const SEATS_PER_ROW: usize = 6;
pub const AISLE_AFTER: usize = 3;

pub const EMPTY_MESSAGE: &str = "No seats available for this flight.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Available,
    Selected,
    Booked,
}

impl SeatState {
    pub fn tooltip(&self) -> &'static str {
        match self {
            SeatState::Available => "Available seat",
            SeatState::Selected => "Selected seat",
            SeatState::Booked => "Seat is booked",
        }
    }
}

/// Signal emitted by an interactive grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatClick {
    /// An available seat was pressed.
    Select(String),
    /// A seat that is already held by someone in the passenger list was pressed.
    Deselect(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Seat { seat_number: String, state: SeatState },
    Aisle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeatRow {
    pub cells: Vec<GridCell>,
}

impl SeatRow {
    pub fn seats(&self) -> impl Iterator<Item = (&str, SeatState)> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Seat { seat_number, state } => Some((seat_number.as_str(), *state)),
            GridCell::Aisle => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub seats_per_row: usize,
    pub aisle_after: usize,
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            seats_per_row: SEATS_PER_ROW,
            aisle_after: AISLE_AFTER,
        }
    }
}

/// Sorts a copy of the inventory by ascending numeric seat number.
///
/// Seat numbers without leading digits go last, ordered by their text.
pub fn sorted_seats(seats: &[Seat]) -> Vec<&Seat> {
    let mut sorted: Vec<&Seat> = seats.iter().collect();
    sorted.sort_by(|a, b| {
        let key_a = (a.numeric_part().is_none(), a.numeric_part(), &a.seat_number);
        let key_b = (b.numeric_part().is_none(), b.numeric_part(), &b.seat_number);
        key_a.cmp(&key_b)
    });
    sorted
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeatGrid {
    pub rows: Vec<SeatRow>,
}

impl SeatGrid {
    pub fn layout(seats: &[Seat], selected: &[String], shape: GridShape) -> Self {
        let selected: HashSet<&str> = selected
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        let per_row = shape.seats_per_row.max(1);

        let rows = sorted_seats(seats)
            .chunks(per_row)
            .map(|chunk| {
                let mut cells = Vec::with_capacity(chunk.len() + 1);
                for (col, seat) in chunk.iter().enumerate() {
                    // Booked wins over selected.
                    let state = if seat.is_booked {
                        SeatState::Booked
                    } else if selected.contains(seat.seat_number.as_str()) {
                        SeatState::Selected
                    } else {
                        SeatState::Available
                    };
                    cells.push(GridCell::Seat {
                        seat_number: seat.seat_number.clone(),
                        state,
                    });
                    if col + 1 == shape.aisle_after {
                        cells.push(GridCell::Aisle);
                    }
                }
                SeatRow { cells }
            })
            .collect();

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn state_of(&self, seat_number: &str) -> Option<SeatState> {
        self.rows
            .iter()
            .flat_map(SeatRow::seats)
            .find(|(number, _)| *number == seat_number)
            .map(|(_, state)| state)
    }

    /// Seat numbers in display order.
    pub fn seat_numbers(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flat_map(SeatRow::seats)
            .map(|(number, _)| number)
            .collect()
    }
}

/// How a rendered grid reacts to presses.
pub enum SeatGridMode<'a> {
    /// Preview only; presses are ignored.
    ReadOnly,
    Interactive(&'a mut dyn FnMut(SeatClick)),
}

impl fmt::Debug for SeatGridMode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatGridMode::ReadOnly => write!(f, "ReadOnly"),
            SeatGridMode::Interactive(_) => write!(f, "Interactive"),
        }
    }
}

/// A laid-out grid bound to its interaction mode.
#[derive(Debug)]
pub struct SeatMap<'a> {
    pub grid: SeatGrid,
    mode: SeatGridMode<'a>,
}

pub fn render<'a>(seats: &[Seat], selected: &[String], mode: SeatGridMode<'a>) -> SeatMap<'a> {
    SeatMap {
        grid: SeatGrid::layout(seats, selected, GridShape::default()),
        mode,
    }
}

impl<'a> SeatMap<'a> {
    pub fn with_shape(seats: &[Seat], selected: &[String], shape: GridShape, mode: SeatGridMode<'a>) -> Self {
        Self {
            grid: SeatGrid::layout(seats, selected, shape),
            mode,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.mode, SeatGridMode::Interactive(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_interactive() {
            "Select Your Seat"
        } else {
            "Seat Preview"
        }
    }

    /// Press a seat. Returns the signal handed to the handler, if any.
    ///
    /// Booked seats, unknown seat numbers and read-only grids emit nothing.
    pub fn press(&mut self, seat_number: &str) -> Option<SeatClick> {
        let state = self.grid.state_of(seat_number)?;
        let handler = match &mut self.mode {
            SeatGridMode::ReadOnly => return None,
            SeatGridMode::Interactive(handler) => handler,
        };

        let click = match state {
            SeatState::Booked => return None,
            SeatState::Selected => SeatClick::Deselect(seat_number.to_string()),
            SeatState::Available => SeatClick::Select(seat_number.to_string()),
        };
        (*handler)(click.clone());
        Some(click)
    }
}

impl fmt::Display for SeatGrid {
    /// Text rendering: ` 12 ` available, `[12]` selected, ` ## ` booked.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "{}", EMPTY_MESSAGE);
        }

        let width = self
            .seat_numbers()
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(1);

        for row in &self.rows {
            let mut line = String::new();
            for cell in &row.cells {
                match cell {
                    GridCell::Aisle => line.push_str("   "),
                    GridCell::Seat { seat_number, state } => {
                        let text = match state {
                            SeatState::Available => format!(" {:>width$} ", seat_number, width = width),
                            SeatState::Selected => format!("[{:>width$}]", seat_number, width = width),
                            SeatState::Booked => format!(" {} ", "#".repeat(width)),
                        };
                        line.push_str(&text);
                    }
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl fmt::Display for SeatMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        write!(f, "{}", self.grid)?;
        if self.is_interactive() && !self.grid.is_empty() {
            writeln!(f, "Tap a seat to select. Booked seats are disabled.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inventory(numbers: &[&str], booked: &[&str]) -> Vec<Seat> {
        numbers
            .iter()
            .map(|n| Seat::new(format!("id-{}", n), *n, booked.contains(n)))
            .collect()
    }

    #[test]
    fn test_rows_of_six_with_aisle_after_third() {
        let numbers: Vec<String> = (1..=8).map(|n| n.to_string()).collect();
        let refs: Vec<&str> = numbers.iter().map(String::as_str).collect();
        let grid = SeatGrid::layout(&inventory(&refs, &[]), &[], GridShape::default());

        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[0].cells.len(), 7);
        assert_eq!(grid.rows[0].cells[3], GridCell::Aisle);
        // Short trailing row: aisle only after a third seat exists.
        assert_eq!(grid.rows[1].cells.len(), 2);
        assert!(!grid.rows[1].cells.contains(&GridCell::Aisle));
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        let grid = SeatGrid::layout(&inventory(&["10", "2", "1", "21", "3"], &[]), &[], GridShape::default());
        assert_eq!(grid.seat_numbers(), vec!["1", "2", "3", "10", "21"]);
    }

    #[test]
    fn test_booked_takes_precedence_over_selected() {
        let seats = inventory(&["1", "2", "3"], &["2"]);
        let selected = vec!["2".to_string(), "3".to_string()];
        let grid = SeatGrid::layout(&seats, &selected, GridShape::default());

        assert_eq!(grid.state_of("1"), Some(SeatState::Available));
        assert_eq!(grid.state_of("2"), Some(SeatState::Booked));
        assert_eq!(grid.state_of("3"), Some(SeatState::Selected));
    }

    #[test]
    fn test_interactive_press_emits_select_and_deselect() {
        let seats = inventory(&["1", "2", "3"], &["3"]);
        let selected = vec!["2".to_string()];
        let mut clicks = Vec::new();
        let mut handler = |click: SeatClick| clicks.push(click);

        {
            let mut map = render(&seats, &selected, SeatGridMode::Interactive(&mut handler));
            assert_eq!(map.title(), "Select Your Seat");
            assert_eq!(map.press("1"), Some(SeatClick::Select("1".into())));
            assert_eq!(map.press("2"), Some(SeatClick::Deselect("2".into())));
            assert_eq!(map.press("3"), None);
            assert_eq!(map.press("99"), None);
        }

        assert_eq!(
            clicks,
            vec![SeatClick::Select("1".into()), SeatClick::Deselect("2".into())]
        );
    }

    #[test]
    fn test_read_only_grid_ignores_presses() {
        let seats = inventory(&["1", "2"], &[]);
        let mut map = render(&seats, &[], SeatGridMode::ReadOnly);
        assert_eq!(map.title(), "Seat Preview");
        assert_eq!(map.press("1"), None);
    }

    #[test]
    fn test_text_rendering() {
        let seats = inventory(&["1", "2", "3", "4"], &["4"]);
        let grid = SeatGrid::layout(&seats, &["2".to_string()], GridShape::default());
        assert_eq!(grid.to_string(), " 1 [2] 3     #\n");

        let empty = SeatGrid::layout(&[], &[], GridShape::default());
        assert_eq!(empty.to_string(), format!("{}\n", EMPTY_MESSAGE));
    }

    proptest! {
        #[test]
        fn prop_grid_is_sorted_regardless_of_input_order(
            numbers in proptest::collection::hash_set(1u32..500, 0..60)
                .prop_map(|s| s.into_iter().collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let seats: Vec<Seat> = numbers
                .iter()
                .map(|n| Seat::new(format!("id-{}", n), n.to_string(), false))
                .collect();
            let grid = SeatGrid::layout(&seats, &[], GridShape::default());
            let laid_out: Vec<u32> = grid
                .seat_numbers()
                .iter()
                .map(|n| n.parse().unwrap())
                .collect();

            let mut expected = numbers.clone();
            expected.sort_unstable();
            prop_assert_eq!(laid_out, expected);
        }
    }
}
