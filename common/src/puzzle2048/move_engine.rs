//! Slide and merge resolution.
//!
//! Every direction is expressed as a list of cell groups ordered so that
//! index 0 is the edge tiles move towards. The same routines then serve all
//! four directions.

use super::grid::{CellGroup, Grid};
use super::types::{Direction, MergeEvent, Relocation};

pub fn groups_for(grid: &Grid, direction: Direction) -> Vec<CellGroup> {
    match direction {
        Direction::Up => grid.cell_groups_by_column(),
        Direction::Down => reversed(grid.cell_groups_by_column()),
        Direction::Left => grid.cell_groups_by_row(),
        Direction::Right => reversed(grid.cell_groups_by_row()),
    }
}

fn reversed(groups: Vec<CellGroup>) -> Vec<CellGroup> {
    groups
        .into_iter()
        .map(|mut group| {
            group.reverse();
            group
        })
        .collect()
}

/// True when some tile could step one cell towards the leading edge.
pub fn can_move(grid: &Grid, groups: &[CellGroup]) -> bool {
    groups.iter().any(|group| {
        group.windows(2).any(|pair| {
            let (target, source) = (&grid.cells()[pair[0]], &grid.cells()[pair[1]]);
            source.tile().is_some_and(|tile| target.can_accept(tile))
        })
    })
}

pub fn can_move_in(grid: &Grid, direction: Direction) -> bool {
    can_move(grid, &groups_for(grid, direction))
}

pub fn any_move_available(grid: &Grid) -> bool {
    Direction::ALL
        .iter()
        .any(|&direction| can_move_in(grid, direction))
}

/// Moves tiles towards the leading edge of each group.
///
/// Tiles are processed nearest-to-edge first and every acceptance check reads
/// the live grid, so a cell that already received a merge this pass stops any
/// further tile. Merges are only recorded here; call [`finalize_merges`] once
/// the relocations have been shown.
pub fn resolve(grid: &mut Grid, groups: &[CellGroup]) -> Vec<Relocation> {
    let mut relocations = Vec::new();

    for group in groups {
        for i in 1..group.len() {
            let source = group[i];
            let Some(tile) = grid.cells()[source].tile() else {
                continue;
            };

            let mut destination = None;
            for &candidate in group[..i].iter().rev() {
                if !grid.cells()[candidate].can_accept(tile) {
                    break;
                }
                destination = Some(candidate);
            }

            let Some(destination) = destination else {
                continue;
            };
            let Some(tile) = grid.cell_mut(source).take_tile() else {
                continue;
            };

            let target = grid.cell_mut(destination);
            let is_merge = !target.is_empty();
            relocations.push(Relocation {
                tile: tile.id(),
                value: tile.value(),
                from: source,
                to: destination,
                is_merge,
            });

            if is_merge {
                target.set_merge_tile(tile);
            } else {
                target.set_tile(tile);
            }
        }
    }

    relocations
}

pub fn resolve_move(grid: &mut Grid, direction: Direction) -> Vec<Relocation> {
    let groups = groups_for(grid, direction);
    resolve(grid, &groups)
}

/// Folds every pending merge: the destination tile doubles, the moving tile
/// is dropped. Events are reported in cell order.
pub fn finalize_merges(grid: &mut Grid) -> Vec<MergeEvent> {
    (0..grid.cells().len())
        .filter_map(|cell| {
            grid.cell_mut(cell)
                .merge_tiles()
                .map(|(surviving, consumed, value)| MergeEvent {
                    cell,
                    surviving,
                    consumed,
                    value,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle2048::grid::tests::{grid_from, raw_values};

    fn play(grid: &mut Grid, direction: Direction) -> (Vec<Relocation>, u32) {
        let relocations = resolve_move(grid, direction);
        let points = finalize_merges(grid).iter().map(|m| m.value).sum();
        (relocations, points)
    }

    #[test]
    fn test_merge_once_per_tile() {
        let mut grid = grid_from(4, &[
            2, 2, 2, 2,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        let (_, points) = play(&mut grid, Direction::Left);
        assert_eq!(&raw_values(&grid)[0..4], &[4, 4, 0, 0]);
        assert_eq!(points, 8);
    }

    #[test]
    fn test_largest_tiles_stay_apart() {
        let top = crate::puzzle2048::MAX_TILE_VALUE;
        let mut grid = grid_from(2, &[top, top, 2, 4]);
        assert!(!can_move_in(&grid, Direction::Left));
        assert!(!any_move_available(&grid));

        let relocations = resolve_move(&mut grid, Direction::Left);
        assert!(relocations.is_empty());
        assert!(finalize_merges(&mut grid).is_empty());
        assert_eq!(raw_values(&grid), vec![top, top, 2, 4]);
    }

    #[test]
    fn test_merge_once_towards_right() {
        let mut grid = grid_from(4, &[
            2, 2, 2, 2,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        let relocations = resolve_move(&mut grid, Direction::Right);
        let merges = finalize_merges(&mut grid);
        assert_eq!(&raw_values(&grid)[0..4], &[0, 0, 4, 4]);
        assert_eq!(merges.len(), 2);
        assert!(merges.iter().all(|m| m.value == 4));
        assert_eq!(relocations.len(), 3);
    }

    #[test]
    fn test_simple_merge_left() {
        let mut grid = grid_from(4, &[
            2, 2, 4, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        let (_, points) = play(&mut grid, Direction::Left);
        assert_eq!(&raw_values(&grid)[0..4], &[4, 4, 0, 0]);
        assert_eq!(points, 4);
    }

    #[test]
    fn test_three_equal_tiles_merge_nearest_pair() {
        let mut grid = grid_from(4, &[
            2, 2, 2, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        let (_, points) = play(&mut grid, Direction::Left);
        assert_eq!(&raw_values(&grid)[0..4], &[4, 2, 0, 0]);
        assert_eq!(points, 4);
    }

    #[test]
    fn test_doubled_tile_does_not_merge_again() {
        let mut grid = grid_from(4, &[
            4, 2, 2, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        let (_, points) = play(&mut grid, Direction::Left);
        assert_eq!(&raw_values(&grid)[0..4], &[4, 4, 0, 0]);
        assert_eq!(points, 4);
    }

    #[test]
    fn test_slide_without_merge() {
        let mut grid = grid_from(4, &[
            0, 0, 2, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        let (relocations, points) = play(&mut grid, Direction::Left);
        assert_eq!(&raw_values(&grid)[0..4], &[2, 0, 0, 0]);
        assert_eq!(points, 0);
        assert_eq!(relocations.len(), 1);
        assert_eq!(relocations[0].from, 2);
        assert_eq!(relocations[0].to, 0);
        assert!(!relocations[0].is_merge);
    }

    #[test]
    fn test_vertical_moves() {
        let mut grid = grid_from(4, &[
            2, 0, 0, 0,
            2, 0, 0, 0,
            0, 0, 0, 8,
            4, 0, 0, 0,
        ]);
        play(&mut grid, Direction::Up);
        assert_eq!(raw_values(&grid), vec![
            4, 0, 0, 8,
            4, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);

        let (_, points) = play(&mut grid, Direction::Down);
        assert_eq!(raw_values(&grid), vec![
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            8, 0, 0, 8,
        ]);
        assert_eq!(points, 8);
    }

    #[test]
    fn test_merge_relocation_and_identity() {
        let mut grid = grid_from(4, &[
            0, 8, 0, 8,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        let survivor = grid.cells()[1].tile().unwrap().id();
        let mover = grid.cells()[3].tile().unwrap().id();

        let relocations = resolve_move(&mut grid, Direction::Left);
        assert_eq!(relocations, vec![
            Relocation { tile: survivor, value: 8, from: 1, to: 0, is_merge: false },
            Relocation { tile: mover, value: 8, from: 3, to: 0, is_merge: true },
        ]);
        assert!(grid.has_pending_merges());
        assert_eq!(grid.cells()[0].merge_tile().map(|t| t.id()), Some(mover));

        let merges = finalize_merges(&mut grid);
        assert_eq!(merges, vec![MergeEvent { cell: 0, surviving: survivor, consumed: mover, value: 16 }]);
        assert!(!grid.has_pending_merges());
        assert_eq!(grid.cells()[0].tile().map(|t| t.id()), Some(survivor));
        assert_eq!(grid.tile_count(), 1);
    }

    #[test]
    fn test_blocking_wall_stops_tile() {
        let mut grid = grid_from(4, &[
            2, 4, 0, 2,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);
        play(&mut grid, Direction::Left);
        assert_eq!(&raw_values(&grid)[0..4], &[2, 4, 2, 0]);
    }

    #[test]
    fn test_can_move_has_no_side_effects() {
        let grid = grid_from(4, &[
            2, 2, 0, 4,
            0, 8, 0, 0,
            16, 0, 0, 16,
            0, 0, 2, 0,
        ]);
        let before = raw_values(&grid);
        for _ in 0..5 {
            for direction in Direction::ALL {
                assert!(can_move_in(&grid, direction));
            }
        }
        assert_eq!(raw_values(&grid), before);
        assert!(!grid.has_pending_merges());
    }

    #[test]
    fn test_can_move_respects_direction() {
        let grid = grid_from(4, &[
            2, 0, 0, 0,
            4, 0, 0, 0,
            8, 0, 0, 0,
            16, 0, 0, 0,
        ]);
        assert!(!can_move_in(&grid, Direction::Left));
        assert!(!can_move_in(&grid, Direction::Up));
        assert!(!can_move_in(&grid, Direction::Down));
        assert!(can_move_in(&grid, Direction::Right));
    }

    #[test]
    fn test_blocked_grid_has_no_moves() {
        let grid = grid_from(4, &[
            2, 4, 2, 4,
            4, 2, 4, 2,
            2, 4, 2, 4,
            4, 2, 4, 2,
        ]);
        for direction in Direction::ALL {
            assert!(!can_move_in(&grid, direction));
        }
        assert!(!any_move_available(&grid));
    }

    #[test]
    fn test_illegal_move_resolves_to_nothing() {
        let mut grid = grid_from(2, &[2, 4, 8, 16]);
        let before = raw_values(&grid);
        assert!(resolve_move(&mut grid, Direction::Left).is_empty());
        assert!(finalize_merges(&mut grid).is_empty());
        assert_eq!(raw_values(&grid), before);
    }
}
