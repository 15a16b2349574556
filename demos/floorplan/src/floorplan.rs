//! Built-in floor plan and movements used when no input files are given.
//!
//! A small office floor: two rooms on the left joined to an open hall by
//! single doors, a pillar block in the hall, and a corridor along the bottom
//! leading to the two exits on the right.  Coordinates in [`MOVEMENTS`] are
//! in plan cells, so the demo runs with downscale factor 1.

pub const FLOOR_PLAN: &str = "\
type octile
height 16
width 32
map
################################
#.........#....................#
#.........#....................#
#.........#.......####.........#
#..............####..####......#
#.........#.......####.........#
#.........#....................#
#####.#####....................#
#.........#.........##.........#
#.........#.........##.........#
#..............................#
#.........#.........##..........
#.........#.....................
#####.######################.###
#..............................#
################################
";

pub const MOVEMENTS: &str = "\
start,target,count
2:2,11:31,40
9:3,12:31,25
5:25,11:31,30
14:2,12:31,15
1:28,14:30,10
";
