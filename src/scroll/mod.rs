//! Viewport scrolling strategies
//!
//! The view never moves; scrolling translates every entity instead. A
//! scroller is built from a comma-separated configuration line whose first
//! field names the strategy:
//!
//! - `Manual,left,right,up,down`
//! - `Auto,dx,dy,lockPlayer`
//! - `Doodle,left,right,up,down` (needs a generation spec)
//! - `AutoGeneration,dx,dy,lockPlayer` (needs a generation spec)

pub mod auto;
pub mod generation;
pub mod manual;

use std::fmt::Debug;
use std::path::Path;

pub use auto::AutoScroller;
pub use generation::{AutoGenerationScroller, DoodleGenerationScroller};
pub use manual::ManualScroller;

use crate::error::ModelError;
use crate::generator::ChunkGenerator;
use crate::loader::EntityFactory;
use crate::sim::{EntityArena, EntityId};

/// Manual bound that never scrolls
pub const NO_SCROLL: f64 = -1.0;
/// Manual bound that always scrolls
pub const ALWAYS_SCROLL: f64 = 0.0;

pub trait Scroller: Debug {
    /// Move the world relative to `player`, returning the score earned
    fn scroll(&mut self, entities: &mut EntityArena, player: EntityId) -> i64;

    /// Forget progress after the level restarts
    fn reset(&mut self) {}
}

/// Builds scrollers from configuration lines
#[derive(Debug, Clone, Copy)]
pub struct ScrollerFactory {
    factory: EntityFactory,
    view_blocks: f64,
    seed: u64,
}

impl ScrollerFactory {
    pub fn new(factory: EntityFactory, view_blocks: f64, seed: u64) -> Self {
        Self {
            factory,
            view_blocks,
            seed,
        }
    }

    /// Build the scroller named by the first field of `line`
    ///
    /// Unknown names give a scroller that never moves.
    pub fn build(&self, line: &str, generator_path: Option<&Path>) -> Result<Box<dyn Scroller>, ModelError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let args = Args { line, fields: &fields[1..] };

        let scroller: Box<dyn Scroller> = match fields[0] {
            "Manual" => Box::new(args.manual()?),
            "Auto" => Box::new(args.auto()?),
            "Doodle" => Box::new(DoodleGenerationScroller::new(
                args.manual()?,
                self.generator(line, generator_path)?,
                self.factory,
                self.view_blocks,
            )),
            "AutoGeneration" => Box::new(AutoGenerationScroller::new(
                args.auto()?,
                self.generator(line, generator_path)?,
                self.factory,
                self.view_blocks,
            )),
            other => {
                log::warn!("Unknown scroller {other:?}, level will not scroll");
                Box::new(AutoScroller::still())
            }
        };
        log::debug!("Built scroller {scroller:?}");
        Ok(scroller)
    }

    fn generator(&self, line: &str, path: Option<&Path>) -> Result<ChunkGenerator, ModelError> {
        let path = path.ok_or_else(|| malformed(line, "missing generation spec path"))?;
        ChunkGenerator::from_path(path, self.seed).map_err(|e| malformed(line, e))
    }
}

fn malformed(line: &str, message: impl ToString) -> ModelError {
    ModelError::MalformedScroller {
        args: line.to_string(),
        message: message.to_string(),
    }
}

/// Positional scroller arguments after the name
struct Args<'a> {
    line: &'a str,
    fields: &'a [&'a str],
}

impl Args<'_> {
    fn field(&self, index: usize) -> Result<&str, ModelError> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| malformed(self.line, format!("missing argument {}", index + 1)))
    }

    fn number(&self, index: usize) -> Result<f64, ModelError> {
        let field = self.field(index)?;
        field
            .parse::<f64>()
            .map_err(|_| malformed(self.line, format!("{field:?} is not a number")))
    }

    /// Anything but a case-insensitive `true` is false
    fn flag(&self, index: usize) -> Result<bool, ModelError> {
        Ok(self.field(index)?.eq_ignore_ascii_case("true"))
    }

    fn manual(&self) -> Result<ManualScroller, ModelError> {
        Ok(ManualScroller::new(
            self.number(0)?,
            self.number(1)?,
            self.number(2)?,
            self.number(3)?,
        ))
    }

    fn auto(&self) -> Result<AutoScroller, ModelError> {
        Ok(AutoScroller::new(self.number(0)?, self.number(1)?, self.flag(2)?))
    }
}
