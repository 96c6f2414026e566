use rand::{rngs::ThreadRng, Rng};

use crate::area::PlayArea;
use crate::area::Position;

pub trait FoodSpawner {
    fn spawn(&mut self, area: &PlayArea) -> Position;
}

/// Picks a uniformly random grid cell inside the area, one cell away from
/// its edges. The snake's body is not excluded, so food can land on it.
pub struct RandomFoodSpawner<R = ThreadRng> {
    rng: R,
}

impl RandomFoodSpawner<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for RandomFoodSpawner<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomFoodSpawner<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomFoodSpawner { rng }
    }
}

impl<R: Rng> FoodSpawner for RandomFoodSpawner<R> {
    fn spawn(&mut self, area: &PlayArea) -> Position {
        let bounds = area.bounds();
        let cell = area.cell();

        Position::new(
            interior_coordinate(&mut self.rng, bounds.x, bounds.width, cell),
            interior_coordinate(&mut self.rng, bounds.y, bounds.height, cell),
        )
    }
}

/// Samples `origin + cell + k * cell` strictly below `origin + extent - cell`.
fn interior_coordinate<R: Rng>(rng: &mut R, origin: i32, extent: i32, cell: i32) -> i32 {
    // PlayArea guarantees extent > 2 * cell, so there is at least one step
    let span = extent - 2 * cell;
    let steps = (span + cell - 1) / cell;
    origin + cell + rng.gen_range(0..steps) * cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::Rect;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn assert_interior(area: &PlayArea, pos: Position) {
        let b = area.bounds();
        let cell = area.cell();
        assert!(b.x + cell <= pos.x && pos.x < b.x + b.width - cell, "x out of range: {:?}", pos);
        assert!(b.y + cell <= pos.y && pos.y < b.y + b.height - cell, "y out of range: {:?}", pos);
        assert!(area.is_aligned(pos), "not on the grid: {:?}", pos);
    }

    #[test]
    fn spawns_inside_and_on_the_grid() {
        let area = PlayArea::from_window(800, 600, 40, 10).unwrap();
        let mut spawner = RandomFoodSpawner::with_rng(StdRng::seed_from_u64(7));

        for _ in 0..2000 {
            assert_interior(&area, spawner.spawn(&area));
        }
    }

    #[test]
    fn handles_extents_off_the_grid() {
        let area = PlayArea::new(Rect::new(5, 5, 47, 33), 10).unwrap();
        let mut spawner = RandomFoodSpawner::with_rng(StdRng::seed_from_u64(11));

        for _ in 0..500 {
            assert_interior(&area, spawner.spawn(&area));
        }
    }

    #[test]
    fn smallest_area_has_one_spot() {
        let area = PlayArea::new(Rect::new(0, 0, 30, 30), 10).unwrap();
        let mut spawner = RandomFoodSpawner::with_rng(StdRng::seed_from_u64(3));

        for _ in 0..20 {
            assert_eq!(spawner.spawn(&area), Position::new(10, 10));
        }
    }

    #[test]
    fn reaches_every_interior_cell() {
        let area = PlayArea::new(Rect::new(0, 0, 60, 50), 10).unwrap();
        let mut spawner = RandomFoodSpawner::with_rng(StdRng::seed_from_u64(42));

        let seen: HashSet<Position> = (0..1000).map(|_| spawner.spawn(&area)).collect();
        // x in {10, 20, 30, 40}, y in {10, 20, 30}
        assert_eq!(seen.len(), 12);
    }
}
