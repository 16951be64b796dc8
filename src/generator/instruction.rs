//! Rectangle-filling instructions for chunk generation

use rand::Rng;

use super::randomizer::Roll;
use crate::error::GenerationError;

/// Inclusive cell rectangle inside a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl Span {
    /// Check bounds against a `rows x cols` chunk
    fn checked(
        (start_row, end_row): (i64, i64),
        (start_col, end_col): (i64, i64),
        rows: usize,
        cols: usize,
    ) -> Option<Self> {
        let in_range = |start: i64, end: i64, n: usize| start >= 0 && end >= start && end < n as i64;
        if !in_range(start_row, end_row, rows) || !in_range(start_col, end_col, cols) {
            return None;
        }
        Some(Self {
            start_row: start_row as usize,
            end_row: end_row as usize,
            start_col: start_col as usize,
            end_col: end_col as usize,
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.start_row..=self.end_row)
            .flat_map(move |row| (self.start_col..=self.end_col).map(move |col| (row, col)))
    }
}

/// Same rectangle on every chunk
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantInstruction {
    pub entity: String,
    pub span: Span,
}

impl ConstantInstruction {
    /// Ranges are `start:end`; `*` stands for the first or last row/column
    pub fn new(
        rows: usize,
        cols: usize,
        entity: &str,
        row_range: &str,
        col_range: &str,
    ) -> Result<Self, GenerationError> {
        let row_span = parse_range(row_range, rows)?;
        let col_span = parse_range(col_range, cols)?;
        let span = Span::checked(row_span, col_span, rows, cols).ok_or_else(|| {
            GenerationError::Instruction(format!(
                "constant {entity:?} at rows {row_range:?} cols {col_range:?} is outside a {rows}x{cols} chunk"
            ))
        })?;
        Ok(Self {
            entity: entity.to_string(),
            span,
        })
    }
}

fn parse_range(range: &str, n: usize) -> Result<(i64, i64), GenerationError> {
    let bad = || GenerationError::Instruction(format!("bad range {range:?}"));
    let (start, end) = range.split_once(':').ok_or_else(bad)?;
    let start = match start.trim() {
        "*" => 0,
        s => s.parse::<i64>().map_err(|_| bad())?,
    };
    let end = match end.trim() {
        "*" => n as i64 - 1,
        s => s.parse::<i64>().map_err(|_| bad())?,
    };
    Ok((start, end))
}

/// Growth direction of a random rectangle away from its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth {
    pub left: bool,
    pub up: bool,
}

impl Growth {
    /// Parse `LEFT|RIGHT:UP|DOWN`
    pub fn parse(s: &str) -> Result<Self, GenerationError> {
        let bad = || GenerationError::Direction(s.to_string());
        let (horizontal, vertical) = s.split_once(':').ok_or_else(bad)?;
        let left = match horizontal.trim() {
            "LEFT" => true,
            "RIGHT" => false,
            _ => return Err(bad()),
        };
        let up = match vertical.trim() {
            "UP" => true,
            "DOWN" => false,
            _ => return Err(bad()),
        };
        Ok(Self { left, up })
    }
}

/// Rectangle re-rolled on every chunk
#[derive(Debug, Clone, PartialEq)]
pub struct RandomInstruction {
    pub entity: String,
    growth: Growth,
    origin_row: Roll,
    origin_col: Roll,
    num_rows: Roll,
    num_cols: Roll,
    rows: usize,
    cols: usize,
}

/// Raw text fields of a random instruction
#[derive(Debug, Clone, Copy)]
pub struct RandomFields<'a> {
    pub entity: &'a str,
    pub direction: &'a str,
    pub origin_row: &'a str,
    pub origin_col: &'a str,
    pub num_rows: &'a str,
    pub num_cols: &'a str,
}

impl RandomInstruction {
    /// Build and check one roll against the chunk bounds
    pub fn new(
        rows: usize,
        cols: usize,
        fields: RandomFields<'_>,
        rng: &mut impl Rng,
    ) -> Result<Self, GenerationError> {
        let instruction = Self {
            entity: fields.entity.to_string(),
            growth: Growth::parse(fields.direction)?,
            origin_row: Roll::parse(fields.origin_row)?,
            origin_col: Roll::parse(fields.origin_col)?,
            num_rows: Roll::parse(fields.num_rows)?,
            num_cols: Roll::parse(fields.num_cols)?,
            rows,
            cols,
        };
        if instruction.roll(rng).is_none() {
            return Err(GenerationError::Instruction(format!(
                "random {:?} starting at row {:?} col {:?} is outside a {rows}x{cols} chunk",
                fields.entity, fields.origin_row, fields.origin_col
            )));
        }
        Ok(instruction)
    }

    /// Pick a fresh rectangle, clamped to the chunk
    ///
    /// Returns `None` when the origin itself lies outside the chunk.
    pub fn roll(&self, rng: &mut impl Rng) -> Option<Span> {
        let origin_row = self.origin_row.sample(rng);
        let origin_col = self.origin_col.sample(rng);

        let mut row_depth = self.num_rows.sample(rng) - 1;
        if self.growth.up {
            row_depth = -row_depth;
        }
        let mut col_depth = self.num_cols.sample(rng) - 1;
        if self.growth.left {
            col_depth = -col_depth;
        }

        let row_span = clamped_extent(origin_row, row_depth, self.rows);
        let col_span = clamped_extent(origin_col, col_depth, self.cols);
        Span::checked(row_span, col_span, self.rows, self.cols)
    }
}

fn clamped_extent(origin: i64, depth: i64, n: usize) -> (i64, i64) {
    let other = origin + depth;
    let start = origin.min(other).max(0);
    let end = origin.max(other).min(n as i64 - 1);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ROWS: usize = 10;
    const COLS: usize = 20;

    fn fields<'a>(direction: &'a str, origin: (&'a str, &'a str), size: (&'a str, &'a str)) -> RandomFields<'a> {
        RandomFields {
            entity: "2",
            direction,
            origin_row: origin.0,
            origin_col: origin.1,
            num_rows: size.0,
            num_cols: size.1,
        }
    }

    fn span(direction: &str, origin: (&str, &str), size: (&str, &str)) -> Span {
        let mut rng = Pcg32::seed_from_u64(0);
        let instruction = RandomInstruction::new(ROWS, COLS, fields(direction, origin, size), &mut rng).unwrap();
        instruction.roll(&mut rng).unwrap()
    }

    #[test]
    fn test_constant_ranges() {
        let inst = ConstantInstruction::new(ROWS, COLS, "2", "*:*", "3:5").unwrap();
        assert_eq!(
            inst.span,
            Span {
                start_row: 0,
                end_row: 9,
                start_col: 3,
                end_col: 5
            }
        );
        assert_eq!(inst.span.cells().count(), 30);
    }

    #[test]
    fn test_constant_validation() {
        assert!(ConstantInstruction::new(ROWS, COLS, "2", "5:3", "0:1").is_err());
        assert!(ConstantInstruction::new(ROWS, COLS, "2", "0:10", "0:1").is_err());
        assert!(ConstantInstruction::new(ROWS, COLS, "2", "-1:3", "0:1").is_err());
        assert!(ConstantInstruction::new(ROWS, COLS, "2", "0:3", "x:1").is_err());
        assert!(ConstantInstruction::new(ROWS, COLS, "2", "03", "0:1").is_err());
    }

    #[test]
    fn test_fixed_growth_directions() {
        let right_down = span("RIGHT:DOWN", ("5", "10"), ("3", "2"));
        assert_eq!((right_down.start_row, right_down.end_row), (5, 7));
        assert_eq!((right_down.start_col, right_down.end_col), (10, 11));

        let right_up = span("RIGHT:UP", ("5", "10"), ("3", "2"));
        assert_eq!((right_up.start_row, right_up.end_row), (3, 5));

        let left_up = span("LEFT:UP", ("5", "10"), ("3", "2"));
        assert_eq!((left_up.start_col, left_up.end_col), (9, 10));

        let left_down = span("LEFT:DOWN", ("5", "10"), ("3", "2"));
        assert_eq!((left_down.start_row, left_down.end_row), (5, 7));
        assert_eq!((left_down.start_col, left_down.end_col), (9, 10));
    }

    #[test]
    fn test_extent_is_clamped() {
        let clamped = span("RIGHT:DOWN", ("3", "4"), ("5", "6"));
        assert_eq!((clamped.start_row, clamped.end_row), (3, 7));
        assert_eq!((clamped.start_col, clamped.end_col), (4, 9));

        let at_edge = span("RIGHT:DOWN", ("8", "18"), ("5", "5"));
        assert_eq!(at_edge.end_row, ROWS - 1);
        assert_eq!(at_edge.end_col, COLS - 1);
    }

    #[test]
    fn test_random_origin_rerolls() {
        let mut rng = Pcg32::seed_from_u64(11);
        let inst = RandomInstruction::new(ROWS, COLS, fields("RIGHT:DOWN", ("U(2:9)", "10"), ("3", "2")), &mut rng).unwrap();
        for _ in 0..100 {
            let span = inst.roll(&mut rng).unwrap();
            assert!((2..=9).contains(&span.start_row));
        }
    }

    #[test]
    fn test_weighted_height() {
        let mut rng = Pcg32::seed_from_u64(12);
        let inst = RandomInstruction::new(ROWS, COLS, fields("RIGHT:DOWN", ("7", "10"), ("2", "R(3,4,6;0.5,0.25,0.25)")), &mut rng).unwrap();
        for _ in 0..50 {
            let span = inst.roll(&mut rng).unwrap();
            assert_eq!(span.start_col, 10);
            assert!((12..=15).contains(&span.end_col));
        }
    }

    #[test]
    fn test_invalid_random_instructions() {
        let mut rng = Pcg32::seed_from_u64(13);
        let cases = [
            fields("LEFT", ("10", "5"), ("3", "2")),
            fields("RIGHT:DOWN", ("11", "19"), ("3", "2")),
            fields("RIGHT:DOWN", ("5", "21"), ("3", "2")),
            fields("RIGHT:DOWN", ("A", "2"), ("3", "2")),
            fields("RIGHT:DOWN", ("2", "C"), ("3", "2")),
            fields("RIGHT:DOWN", ("2", "2"), ("W", "2")),
            fields("RIGHT:DOWN", ("2", "4"), ("3", "H")),
            fields("SIDEWAYS:DOWN", ("2", "4"), ("3", "2")),
        ];
        for case in cases {
            assert!(RandomInstruction::new(ROWS, COLS, case, &mut rng).is_err(), "{case:?}");
        }
    }
}
