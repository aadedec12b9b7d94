use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vorolattice::{Point, Voronoi, VoronoiError};

fn random_voronoi(count: usize, seed: u64) -> Voronoi {
    let mut voronoi = Voronoi::new(0.0, 30.0, 0.0, 30.0, 0.0, 30.0).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..count {
        voronoi.add_site(Point::new(
            rng.gen_range(0.0..30.0),
            rng.gen_range(0.0..30.0),
            rng.gen_range(0.0..30.0),
        ));
    }
    voronoi
}

fn complete_adjacency(count: usize) -> Vec<Vec<usize>> {
    (0..count)
        .map(|i| (0..count).filter(|&j| j != i).collect())
        .collect()
}

#[test]
fn test_full_adjacency_matches_all_pairs() {
    let mut all = random_voronoi(12, 5);
    let mut listed = all.clone();
    all.create_cells(None, None).unwrap();

    let adjacency = complete_adjacency(12);
    listed.create_cells(Some(adjacency.as_slice()), None).unwrap();

    assert_eq!(all.cells(), listed.cells());
}

#[test]
fn test_half_weights_match_bisectors() {
    let mut plain = random_voronoi(10, 6);
    let mut weighted = plain.clone();
    let adjacency = complete_adjacency(10);
    let weights: Vec<Vec<f64>> = adjacency.iter().map(|row| vec![0.5; row.len()]).collect();

    plain.create_cells(Some(adjacency.as_slice()), None).unwrap();
    weighted.create_cells(Some(adjacency.as_slice()), Some(weights.as_slice())).unwrap();

    for i in 0..10 {
        let a = plain.cell(i).unwrap().volume();
        let b = weighted.cell(i).unwrap().volume();
        assert!((a - b).abs() < 1e-9, "Cell {} volume {} vs {}", i, a, b);
        assert_eq!(
            plain.count_grids(i, 2.0).unwrap(),
            weighted.count_grids(i, 2.0).unwrap()
        );
    }
}

#[test]
fn test_partial_adjacency() {
    // Three sites on a line: the outer two do not know about each other
    let mut voronoi = Voronoi::new(0.0, 30.0, 0.0, 10.0, 0.0, 10.0).unwrap();
    voronoi.add_site(Point::new(5.0, 5.0, 5.0));
    voronoi.add_site(Point::new(15.0, 5.0, 5.0));
    voronoi.add_site(Point::new(25.0, 5.0, 5.0));

    let adjacency = vec![vec![1], vec![0, 2], vec![1]];
    voronoi.create_cells(Some(adjacency.as_slice()), None).unwrap();

    let volumes: Vec<f64> = voronoi.cells().iter().map(|c| c.volume()).collect();
    assert!((volumes[0] - 1000.0).abs() < 1e-6, "Volume {}", volumes[0]);
    assert!((volumes[1] - 1000.0).abs() < 1e-6, "Volume {}", volumes[1]);
    assert!((volumes[2] - 1000.0).abs() < 1e-6, "Volume {}", volumes[2]);

    // Without a neighbor the cell keeps the whole box
    let adjacency = vec![vec![], vec![0, 2], vec![1]];
    voronoi.create_cells(Some(adjacency.as_slice()), None).unwrap();
    assert!((voronoi.cell(0).unwrap().volume() - 3000.0).abs() < 1e-6);
}

#[test]
fn test_weights_move_the_plane() {
    let mut voronoi = Voronoi::new(0.0, 10.0, 0.0, 10.0, 0.0, 10.0).unwrap();
    voronoi.add_site(Point::new(2.0, 5.0, 5.0));
    voronoi.add_site(Point::new(8.0, 5.0, 5.0));
    let adjacency = vec![vec![1], vec![0]];

    // Plane at x = 2 + 6 * w for cell 0
    for (w, expected) in [(0.1, 260.0), (0.25, 350.0), (0.5, 500.0), (0.75, 650.0)] {
        let weights = vec![vec![w], vec![1.0 - w]];
        voronoi.create_cells(Some(adjacency.as_slice()), Some(weights.as_slice())).unwrap();
        let v0 = voronoi.cell(0).unwrap().volume();
        let v1 = voronoi.cell(1).unwrap().volume();
        assert!((v0 - expected).abs() < 1e-6, "w {}: volume {}", w, v0);
        assert!((v0 + v1 - 1000.0).abs() < 1e-6);
    }
}

#[test]
fn test_bad_tables_leave_cells() {
    let mut voronoi = random_voronoi(3, 9);
    voronoi.create_cells(None, None).unwrap();
    let before = voronoi.cells().to_vec();

    let adjacency = vec![vec![1], vec![0], vec![5]];
    assert_eq!(
        voronoi.create_cells(Some(adjacency.as_slice()), None),
        Err(VoronoiError::NeighborOutOfRange {
            site: 2,
            neighbor: 5
        })
    );
    assert_eq!(voronoi.cells(), &before[..]);
}
