use std::collections::{HashMap, HashSet};

use metrohash::MetroBuildHasher;

use crate::{pos, Pos};

/// offsets of the 8 cells surrounding a cell.
const NEIGHBOR_OFFSETS: [Pos; 8] = [
    pos!(-1, -1),
    pos!(0, -1),
    pos!(1, -1),
    pos!(-1, 0),
    pos!(1, 0),
    pos!(-1, 1),
    pos!(0, 1),
    pos!(1, 1),
];

/// the set of live cells of an unbounded plane; every cell absent from the
/// set is dead. an empty set is a valid, stable state.
#[derive(Debug, Default, Clone)]
pub struct LifeGrid {
    cells: HashSet<Pos, MetroBuildHasher>,
    generation: u64,
}

impl LifeGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(cells: impl IntoIterator<Item = Pos>) -> Self {
        let mut grid = Self::new();
        grid.seed(cells);
        grid
    }

    /// replaces the whole live set; duplicates collapse. resets the
    /// generation counter.
    pub fn seed(&mut self, cells: impl IntoIterator<Item = Pos>) {
        self.cells = cells.into_iter().collect();
        self.generation = 0;
    }

    pub fn is_alive(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn live_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// count of generations computed since the last seed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// computes the next generation in place.
    ///
    /// every live cell contributes one count to each of its 8 neighbors;
    /// cells that received no count have no live neighbor and stay dead, so
    /// only tally keys can be alive next generation.
    pub fn advance(&mut self) {
        let mut tally: HashMap<Pos, u8, MetroBuildHasher> =
            HashMap::with_capacity_and_hasher(self.cells.len() * 8, MetroBuildHasher::default());
        for &cell in &self.cells {
            for offset in NEIGHBOR_OFFSETS {
                *tally.entry(cell + offset).or_insert(0) += 1;
            }
        }

        let next = tally
            .into_iter()
            .filter(|&(pos, count)| match (self.cells.contains(&pos), count) {
                (true, 2 | 3) => true,  // survives
                (false, 3) => true,     // born
                _ => false,             // dies or stays dead
            })
            .map(|(pos, _)| pos)
            .collect();
        self.cells = next;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(cells: impl IntoIterator<Item = Pos>) -> Vec<Pos> {
        let mut cells = cells.into_iter().collect::<Vec<_>>();
        cells.sort_by_key(|p| (p.x, p.y));
        cells
    }

    fn grid_of(cells: &[(i64, i64)]) -> LifeGrid {
        LifeGrid::from_seed(cells.iter().map(|&(x, y)| pos!(x, y)))
    }

    #[test]
    fn block_is_a_still_life() {
        let mut grid = grid_of(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let before = sorted(grid.live_cells());
        for _ in 0..5 {
            grid.advance();
            assert_eq!(sorted(grid.live_cells()), before);
        }
    }

    #[test]
    fn blinker_oscillates_with_period_2() {
        let mut grid = grid_of(&[(-1, 0), (0, 0), (1, 0)]);
        let horizontal = sorted(grid.live_cells());

        grid.advance();
        let vertical = sorted([pos!(0, -1), pos!(0, 0), pos!(0, 1)]);
        assert_eq!(sorted(grid.live_cells()), vertical);

        grid.advance();
        assert_eq!(sorted(grid.live_cells()), horizontal);
    }

    #[test]
    fn lone_cell_goes_extinct_and_stays_extinct() {
        let mut grid = grid_of(&[(3, -7)]);
        grid.advance();
        assert_eq!(grid.population(), 0);
        for _ in 0..3 {
            grid.advance();
            assert_eq!(grid.population(), 0);
        }
    }

    /// a live center with k of its 8 neighbors alive survives only for
    /// k = 2 or 3; a dead center is born only for k = 3.
    #[test]
    fn survival_and_birth_thresholds() {
        for count in 0..=8 {
            let neighbors = NEIGHBOR_OFFSETS.iter().copied().take(count);

            let mut with_center = LifeGrid::from_seed(neighbors.clone().chain([pos!(0, 0)]));
            with_center.advance();
            let survives = matches!(count, 2 | 3);
            assert_eq!(
                with_center.is_alive(pos!(0, 0)),
                survives,
                "live center with {count} neighbors"
            );

            let mut without_center = LifeGrid::from_seed(neighbors);
            without_center.advance();
            let born = count == 3;
            assert_eq!(
                without_center.is_alive(pos!(0, 0)),
                born,
                "dead center with {count} neighbors"
            );
        }
    }

    #[test]
    fn seed_replaces_and_collapses_duplicates() {
        let mut grid = grid_of(&[(0, 0), (0, 0), (5, 5)]);
        assert_eq!(grid.population(), 2);

        grid.seed([pos!(9, 9)]);
        assert_eq!(grid.population(), 1);
        assert!(!grid.is_alive(pos!(0, 0)));
        assert!(grid.is_alive(pos!(9, 9)));
    }

    #[test]
    fn generation_counts_advances_and_resets_on_seed() {
        let mut grid = grid_of(&[(0, 0)]);
        grid.advance();
        grid.advance();
        assert_eq!(grid.generation(), 2);

        grid.seed([pos!(1, 1)]);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn empty_grid_advances_to_empty() {
        let mut grid = LifeGrid::new();
        grid.advance();
        assert_eq!(grid.population(), 0);
    }
}
