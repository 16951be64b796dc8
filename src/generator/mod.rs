//! Procedural level chunks
//!
//! A generation spec describes one rectangular chunk of tile codes:
//! - `base`: code filling every cell first
//! - `constant`: rectangles identical in every chunk
//! - `random`: rectangles whose origin and extent are re-rolled per chunk
//!
//! ```json
//! {
//!   "rows": 10, "columns": 20, "base": 0,
//!   "constant": [{ "entity": 2, "rows": "9:9", "columns": "*:*" }],
//!   "random": [{ "entity": 3, "direction": "RIGHT:UP", "origin_row": 8,
//!                "origin_col": "U(0:19)", "num_rows": 1, "num_cols": "R(1,2;0.7,0.3)" }]
//! }
//! ```

pub mod instruction;
pub mod randomizer;

use std::fmt;
use std::fs;
use std::path::Path;

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::loader::EntityFactory;
use crate::sim::EntityArena;
pub use instruction::{ConstantInstruction, RandomFields, RandomInstruction, Span};

/// Integer or text JSON value, read back as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::Int(v) => write!(f, "{v}"),
            SpecValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantSpec {
    pub entity: SpecValue,
    pub rows: String,
    pub columns: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomSpec {
    pub entity: SpecValue,
    pub direction: String,
    pub origin_row: SpecValue,
    pub origin_col: SpecValue,
    pub num_rows: SpecValue,
    pub num_cols: SpecValue,
}

/// On-disk generation specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSpec {
    pub rows: usize,
    pub columns: usize,
    pub base: SpecValue,
    #[serde(default)]
    pub constant: Vec<ConstantSpec>,
    #[serde(default)]
    pub random: Vec<RandomSpec>,
}

/// Produces successive chunks of tile codes from a spec
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
    rows: usize,
    cols: usize,
    base: String,
    constants: Vec<ConstantInstruction>,
    randoms: Vec<RandomInstruction>,
    rng: Pcg32,
}

impl ChunkGenerator {
    pub fn from_path(path: &Path, seed: u64) -> Result<Self, GenerationError> {
        let json = fs::read_to_string(path)?;
        let generator = Self::from_json(&json, seed)?;
        log::info!(
            "Loaded generation spec {}: {}x{} chunks",
            path.display(),
            generator.rows,
            generator.cols
        );
        Ok(generator)
    }

    pub fn from_json(json: &str, seed: u64) -> Result<Self, GenerationError> {
        let spec: GenerationSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec, seed)
    }

    /// Build every instruction, failing on the first invalid one
    pub fn from_spec(spec: &GenerationSpec, seed: u64) -> Result<Self, GenerationError> {
        if spec.rows == 0 || spec.columns == 0 {
            return Err(GenerationError::Instruction(format!(
                "chunk must be at least 1x1, got {}x{}",
                spec.rows, spec.columns
            )));
        }
        let mut rng = Pcg32::seed_from_u64(seed);

        let constants = spec
            .constant
            .iter()
            .map(|c| {
                ConstantInstruction::new(spec.rows, spec.columns, &c.entity.to_string(), &c.rows, &c.columns)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut randoms = Vec::with_capacity(spec.random.len());
        for r in &spec.random {
            let (entity, origin_row, origin_col) = (r.entity.to_string(), r.origin_row.to_string(), r.origin_col.to_string());
            let (num_rows, num_cols) = (r.num_rows.to_string(), r.num_cols.to_string());
            let fields = RandomFields {
                entity: &entity,
                direction: &r.direction,
                origin_row: &origin_row,
                origin_col: &origin_col,
                num_rows: &num_rows,
                num_cols: &num_cols,
            };
            randoms.push(RandomInstruction::new(spec.rows, spec.columns, fields, &mut rng)?);
        }

        Ok(Self {
            rows: spec.rows,
            cols: spec.columns,
            base: spec.base.to_string(),
            constants,
            randoms,
            rng,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    /// Row-major grid of codes: base, then constants, then fresh random rolls
    pub fn generate_next_chunk(&mut self) -> Vec<Vec<String>> {
        let mut grid = vec![vec![self.base.clone(); self.cols]; self.rows];
        for constant in &self.constants {
            fill(&mut grid, &constant.span, &constant.entity);
        }
        for random in &self.randoms {
            if let Some(span) = random.roll(&mut self.rng) {
                fill(&mut grid, &span, &random.entity);
            }
        }
        grid
    }
}

fn fill(grid: &mut [Vec<String>], span: &Span, code: &str) {
    for (row, col) in span.cells() {
        grid[row][col] = code.to_string();
    }
}

/// Decode a chunk and insert it with its top-left cell at (col_offset, row_offset)
///
/// Returns the number of entities inserted.
pub fn insert_chunk(
    entities: &mut EntityArena,
    factory: &EntityFactory,
    grid: &[Vec<String>],
    row_offset: f64,
    col_offset: f64,
) -> usize {
    let mut inserted = 0;
    for (row, codes) in grid.iter().enumerate() {
        for (col, code) in codes.iter().enumerate() {
            if let Some(kind) = factory.decode(code) {
                let pos = DVec2::new(col_offset + col as f64, row_offset + row as f64);
                entities.insert_empowered(kind, pos);
                inserted += 1;
            }
        }
    }
    log::debug!("Inserted chunk at ({col_offset:.2}, {row_offset:.2}): {inserted} entities");
    inserted
}
