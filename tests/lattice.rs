use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vorolattice::{Point, Voronoi, EPSILON};

const SIZE: f64 = 10.0;

/// Lattice points `site + k * r` strictly inside the box of `voronoi`.
fn site_lattice(voronoi: &Voronoi, i: usize, r: f64) -> Vec<Point> {
    let b = voronoi.bounds();
    let s = voronoi.sites()[i];
    let axis = |c: f64, lo: f64, hi: f64| -> Vec<f64> {
        let k0 = ((lo - c) / r).floor() as i64;
        let k1 = ((hi - c) / r).ceil() as i64;
        (k0..=k1)
            .map(|k| c + k as f64 * r)
            .filter(|&v| lo < v && v < hi)
            .collect()
    };

    let mut points = Vec::new();
    for &x in &axis(s.x, b.min_x, b.max_x) {
        for &y in &axis(s.y, b.min_y, b.max_y) {
            for &z in &axis(s.z, b.min_z, b.max_z) {
                points.push(Point::new(x, y, z));
            }
        }
    }
    points
}

/// Smallest distance from `p` to any bisector between site `i` and another site, negative
/// when `p` is closer to another site.
fn bisector_margin(sites: &[Point], i: usize, p: &Point) -> f64 {
    let si = sites[i];
    sites
        .iter()
        .enumerate()
        .filter(|&(j, sj)| j != i && sj.distance_sq(&si) > 0.0)
        .map(|(_, sj)| (p.distance_sq(sj) - p.distance_sq(&si)) / (2.0 * sj.distance(&si)))
        .fold(f64::INFINITY, f64::min)
}

/// `(certain, possible)`: lattice points of cell `i` well inside the cell, and points inside
/// it at all.
fn brute_force(voronoi: &Voronoi, i: usize, r: f64) -> (usize, usize) {
    let mut certain = 0;
    let mut possible = 0;
    for p in site_lattice(voronoi, i, r) {
        let margin = bisector_margin(voronoi.sites(), i, &p);
        if margin > 2.0 * EPSILON {
            certain += 1;
        }
        if margin > -2.0 * EPSILON {
            possible += 1;
        }
    }
    (certain, possible)
}

fn two_sites(a: Point, b: Point) -> Voronoi {
    let mut voronoi = Voronoi::new(0.0, SIZE, 0.0, SIZE, 0.0, SIZE).unwrap();
    voronoi.add_site(a);
    voronoi.add_site(b);
    voronoi.create_cells(None, None).unwrap();
    voronoi
}

#[test]
fn test_single_site_fills_box() {
    let mut voronoi = Voronoi::new(0.0, SIZE, 0.0, SIZE, 0.0, SIZE).unwrap();
    voronoi.add_site(Point::new(5.2, 5.2, 5.2));
    voronoi.create_cells(None, None).unwrap();

    // 0.2, 1.2, ..., 9.2 on every axis
    assert_eq!(voronoi.count_grids(0, 1.0).unwrap(), 10 * 10 * 10);
    // 0.2, 0.7, ..., 9.7 on every axis
    assert_eq!(voronoi.count_grids(0, 0.5).unwrap(), 20 * 20 * 20);
}

#[test]
fn test_lattice_on_box_faces() {
    let mut voronoi = Voronoi::new(0.0, SIZE, 0.0, SIZE, 0.0, SIZE).unwrap();
    voronoi.add_site(Point::new(5.0, 5.0, 5.0));
    voronoi.create_cells(None, None).unwrap();

    // Slices z = 0 and z = 10 only touch the cell and columns x = 0 and x = 10 are not
    // inside, but rows y = 0 and y = 10 run along a face and span it
    assert_eq!(voronoi.count_grids(0, 1.0).unwrap(), 9 * 11 * 9);
}

#[test]
fn test_sites_outside_box() {
    let voronoi = two_sites(Point::new(-5.0, 5.0, 5.0), Point::new(15.0, 5.0, 5.0));
    assert_eq!(voronoi.count_grids(0, 1.0).unwrap(), 0);
    assert_eq!(voronoi.count_grids(1, 1.0).unwrap(), 0);
    assert_eq!(voronoi.count_all_grids(1.0).unwrap(), 0);

    // Close enough that the site's own column enters the cell
    let voronoi = two_sites(Point::new(-0.5, 5.5, 5.5), Point::new(10.5, 5.5, 5.5));
    assert_eq!(voronoi.count_grids(0, 1.0).unwrap(), 5 * 10 * 10);
    assert_eq!(voronoi.count_grids(1, 1.0).unwrap(), 5 * 10 * 10);
}

#[test]
fn test_tilted_bisector_matches_brute_force() {
    // Bisector 4y + z = 27 never passes through a lattice point, and every slice of either
    // cell contains its site's row
    let voronoi = two_sites(Point::new(0.5, 7.5, 5.5), Point::new(0.5, 3.5, 4.5));

    let mut total = 0;
    for i in 0..2 {
        let count = voronoi.count_grids(i, 1.0).unwrap();
        let (certain, possible) = brute_force(&voronoi, i, 1.0);
        assert_eq!(certain, possible);
        assert_eq!(count, certain, "Cell {} counted {}, expected {}", i, count, certain);
        total += count;
    }
    assert_eq!(total, 1000);
}

#[test]
fn test_tilted_bisector_axis_orders() {
    // Swapping which axes carry the tilt keeps the count as long as the steep axis is scanned
    // inside the shallow one
    let a = [0.5, 7.5, 5.5];
    let b = [0.5, 3.5, 4.5];
    // (steep, shallow) axes: (y, z), (x, z), (x, y)
    let permutations = [[0, 1, 2], [1, 0, 2], [1, 2, 0]];

    let mut counts = Vec::new();
    for perm in permutations {
        let pa = Point::new(a[perm[0]], a[perm[1]], a[perm[2]]);
        let pb = Point::new(b[perm[0]], b[perm[1]], b[perm[2]]);
        let voronoi = two_sites(pa, pb);
        for i in 0..2 {
            let (certain, possible) = brute_force(&voronoi, i, 1.0);
            assert_eq!(certain, possible);
            assert_eq!(voronoi.count_grids(i, 1.0).unwrap(), certain);
        }
        counts.push((
            voronoi.count_grids(0, 1.0).unwrap(),
            voronoi.count_grids(1, 1.0).unwrap(),
        ));
    }
    println!("Counts per permutation: {:?}", counts);
    assert!(counts.windows(2).all(|w| w[0] == w[1]), "Counts differ: {:?}", counts);
}

#[test]
fn test_orientation_fine_lattice() {
    // Bisector x = 1.4 with the lattice offset by 0.05 from it and from the box
    let a = [0.85, 1.55, 1.45];
    let b = [1.95, 1.55, 1.45];
    let permutations = [[0, 1, 2], [1, 2, 0], [2, 0, 1], [0, 2, 1], [2, 1, 0], [1, 0, 2]];

    let mut counts = Vec::new();
    for perm in permutations {
        let mut voronoi = Voronoi::new(0.0, 3.0, 0.0, 3.0, 0.0, 3.0).unwrap();
        voronoi.add_site(Point::new(a[perm[0]], a[perm[1]], a[perm[2]]));
        voronoi.add_site(Point::new(b[perm[0]], b[perm[1]], b[perm[2]]));
        voronoi.create_cells(None, None).unwrap();
        counts.push((
            voronoi.count_grids(0, 0.1).unwrap(),
            voronoi.count_grids(1, 0.1).unwrap(),
        ));
    }
    println!("Counts per permutation: {:?}", counts);
    assert!(counts.windows(2).all(|w| w[0] == w[1]), "Counts differ: {:?}", counts);
    // 0.05, 0.15, ..., 2.95 on every axis, split at 1.4
    assert_eq!(counts[0], (14 * 30 * 30, 16 * 30 * 30));
}

#[test]
fn test_mirrored_sites_split_evenly() {
    let voronoi = two_sites(Point::new(3.3, 4.1, 2.2), Point::new(6.7, 5.9, 7.8));
    let c0 = voronoi.count_grids(0, 0.5).unwrap();
    let c1 = voronoi.count_grids(1, 0.5).unwrap();
    assert_eq!(c0, c1);
}

#[test]
fn test_get_grids_points_belong_to_cell() {
    let voronoi = two_sites(Point::new(0.5, 7.5, 5.5), Point::new(0.5, 3.5, 4.5));

    for i in 0..2 {
        let points = voronoi.get_grids(i, 1.0).unwrap();
        assert_eq!(points.len(), voronoi.count_grids(i, 1.0).unwrap());
        assert_eq!(points[0], voronoi.sites()[i]);
        for p in &points {
            assert!(voronoi.bounds().contains(p));
            assert!(bisector_margin(voronoi.sites(), i, p) > 0.0, "Point {:?} not in cell {}", p, i);
        }
    }
}

#[test]
fn test_random_sites_stay_within_brute_force() {
    let mut voronoi = Voronoi::new(0.0, SIZE, 0.0, SIZE, 0.0, SIZE).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..8 {
        voronoi.add_site(Point::new(
            rng.gen_range(0.0..SIZE),
            rng.gen_range(0.0..SIZE),
            rng.gen_range(0.0..SIZE),
        ));
    }
    voronoi.create_cells(None, None).unwrap();

    // The scan stops at the first empty row, so it may miss a detached part of a slice but
    // never counts a point outside the cell. The site itself is always found.
    for i in 0..voronoi.count_sites() {
        let count = voronoi.count_grids(i, 1.0).unwrap();
        let (_, possible) = brute_force(&voronoi, i, 1.0);
        assert!(
            1 <= count && count <= possible,
            "Cell {} counted {}, brute force at most {}",
            i,
            count,
            possible
        );
    }
}
