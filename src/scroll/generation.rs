//! Endless levels: scrolling that appends generated chunks
//!
//! Both scrollers keep a flag marking where the next chunk starts, move it
//! along with the world and generate once it enters the view. Entities that
//! leave the view for good are dropped afterwards. Players are never dropped.

use super::{AutoScroller, ManualScroller, Scroller};
use crate::generator::{ChunkGenerator, insert_chunk};
use crate::loader::EntityFactory;
use crate::sim::{EntityArena, EntityId};

/// Doodle score per tile of upward scroll
const HEIGHT_SCORE_SCALE: f64 = 100.0;

/// Chunk source shared by both generation scrollers
#[derive(Debug, Clone)]
struct ChunkFeed {
    generator: ChunkGenerator,
    factory: EntityFactory,
}

impl ChunkFeed {
    fn append(&mut self, entities: &mut EntityArena, row_offset: f64, col_offset: f64) {
        let grid = self.generator.generate_next_chunk();
        insert_chunk(entities, &self.factory, &grid, row_offset, col_offset);
    }
}

/// Side-scrolling auto scroller that generates chunks to the right
#[derive(Debug, Clone)]
pub struct AutoGenerationScroller {
    auto: AutoScroller,
    feed: ChunkFeed,
    /// Right edge of the view, where new chunks start
    bound: f64,
    /// x of the next chunk's left column
    flag_x: f64,
}

impl AutoGenerationScroller {
    pub fn new(auto: AutoScroller, generator: ChunkGenerator, factory: EntityFactory, view_blocks: f64) -> Self {
        Self {
            auto,
            feed: ChunkFeed { generator, factory },
            bound: view_blocks,
            flag_x: view_blocks,
        }
    }

    fn collect_garbage(entities: &mut EntityArena) {
        let removed = entities.remove_where(|e| !e.kind.is_player() && e.hitbox.x_right() < 0.0);
        if removed > 0 {
            log::debug!("Dropped {removed} entities left of the view");
        }
    }
}

impl Scroller for AutoGenerationScroller {
    fn scroll(&mut self, entities: &mut EntityArena, player: EntityId) -> i64 {
        if self.flag_x <= self.bound {
            self.feed.append(entities, 0.0, self.flag_x);
            self.flag_x += self.feed.generator.columns() as f64;
            Self::collect_garbage(entities);
        }
        self.flag_x += self.auto.delta().x;
        self.auto.scroll(entities, player)
    }

    fn reset(&mut self) {
        self.flag_x = self.bound;
    }
}

/// Vertical manual scroller that generates chunks above the view
#[derive(Debug, Clone)]
pub struct DoodleGenerationScroller {
    manual: ManualScroller,
    feed: ChunkFeed,
    /// One chunk height above the view
    bound: f64,
    /// y of the next chunk's top row
    flag_y: f64,
    view_blocks: f64,
}

impl DoodleGenerationScroller {
    pub fn new(manual: ManualScroller, generator: ChunkGenerator, factory: EntityFactory, view_blocks: f64) -> Self {
        let bound = -(generator.rows() as f64);
        Self {
            manual,
            feed: ChunkFeed { generator, factory },
            bound,
            flag_y: bound,
            view_blocks,
        }
    }

    fn collect_garbage(&self, entities: &mut EntityArena) {
        let floor = self.view_blocks;
        let removed = entities.remove_where(|e| !e.kind.is_player() && e.hitbox.y_top() > floor);
        if removed > 0 {
            log::debug!("Dropped {removed} entities below the view");
        }
    }
}

impl Scroller for DoodleGenerationScroller {
    /// Score is the height gained, in hundredths of a tile
    fn scroll(&mut self, entities: &mut EntityArena, player: EntityId) -> i64 {
        let shift = self.manual.shift(entities, player);
        self.flag_y += shift.y;

        if self.flag_y >= self.bound {
            self.feed.append(entities, self.flag_y, 0.0);
            self.flag_y -= self.feed.generator.rows() as f64;
            self.collect_garbage(entities);
        }
        (HEIGHT_SCORE_SCALE * shift.y).trunc() as i64
    }

    fn reset(&mut self) {
        self.flag_y = self.bound;
    }
}
