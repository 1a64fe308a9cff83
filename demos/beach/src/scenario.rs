//! Synthetic 600 × 320 m coastline.
//!
//! ```text
//!  y 260..320  hill (safe)
//!  y 200..210  coastal road (street)
//!  y 150..195  parking lot in the middle third
//!  y 130..150  two staircases, west and east
//!  y   0..130  beach (start), crossed by a boardwalk at x 290..310
//! ```
//!
//! Beach markers sit on a 20 m grid across the sand plus every 5 m along
//! the foot of each staircase; road markers form a 10 m grid from the middle of the
//! stairs up into the hill.

use anyhow::Result;

use ev_core::{Point2, Polygon};
use ev_spatial::{RegionKind, RegionSet, Surface};

pub const WIDTH: f64 = 600.0;

const STAIRS: [(f64, f64); 2] = [(100.0, 140.0), (460.0, 500.0)];

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Polygon> {
    Ok(Polygon::rect(Point2::new(x0, y0), Point2::new(x1, y1))?)
}

pub fn regions() -> Result<RegionSet> {
    let mut regions = RegionSet::new();
    regions.add("beach", RegionKind::Start, rect(0.0, 0.0, WIDTH, 130.0)?);
    regions.add("boardwalk", RegionKind::Terrain(Surface::Trail), rect(290.0, 0.0, 310.0, 150.0)?);
    for (i, (x0, x1)) in STAIRS.into_iter().enumerate() {
        regions.add(format!("stairs_{i}"), RegionKind::Transition, rect(x0, 130.0, x1, 150.0)?);
    }
    regions.add("parking", RegionKind::Terrain(Surface::Parking), rect(200.0, 150.0, 400.0, 195.0)?);
    regions.add("coast_road", RegionKind::Terrain(Surface::Street), rect(0.0, 200.0, WIDTH, 210.0)?);
    regions.add("hill", RegionKind::Safe, rect(0.0, 260.0, WIDTH, 320.0)?);
    Ok(regions)
}

pub fn beach_markers() -> Vec<Point2> {
    let sand = (0..=30).flat_map(|i| (0..6).map(move |j| Point2::new(i as f64 * 20.0, 10.0 + j as f64 * 20.0)));
    let stairs = STAIRS.into_iter().flat_map(|(x0, x1)| {
        let steps = ((x1 - x0) / 5.0) as usize;
        (0..=steps).map(move |k| Point2::new(x0 + k as f64 * 5.0, 132.0))
    });
    sand.chain(stairs).collect()
}

pub fn road_markers() -> Vec<Point2> {
    (0..=60)
        .flat_map(|i| (14..=30).map(move |j| Point2::new(i as f64 * 10.0, j as f64 * 10.0)))
        .collect()
}
