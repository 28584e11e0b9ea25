//! Colour-coded ASCII PLY export of clustering results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;

use crate::clusterer::ViewClusterer;

/// Writes the clustered camera centres as an ASCII PLY point cloud with one
/// random colour per cluster. With `include_points` the pre-downsampling
/// scene points are appended in white.
pub fn write_ply(
    clusterer: &ViewClusterer,
    path: &Path,
    include_points: bool,
) -> std::io::Result<()> {
    let clusters = clusterer.final_clusters();
    let views = clusterer.views();
    let points = clusterer.orig_points();

    let mut vertex_count: usize = clusters.iter().map(|c| c.len()).sum();
    if include_points {
        vertex_count += points.len();
    }

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "ply")?;
    writeln!(file, "format ascii 1.0")?;
    writeln!(file, "element vertex {vertex_count}")?;
    writeln!(file, "property float x")?;
    writeln!(file, "property float y")?;
    writeln!(file, "property float z")?;
    writeln!(file, "property uchar red")?;
    writeln!(file, "property uchar green")?;
    writeln!(file, "property uchar blue")?;
    writeln!(file, "end_header")?;

    let mut rng = rand::rng();
    for cluster in clusters {
        let red: u8 = rng.random_range(0..255);
        let green: u8 = rng.random_range(0..255);
        let blue: u8 = rng.random_range(0..255);
        for &id in cluster {
            let pos = views[id].trans;
            writeln!(file, "{} {} {} {red} {green} {blue}", pos.x, pos.y, pos.z)?;
        }
    }

    if include_points {
        for p in points {
            writeln!(file, "{} {} {} 255 255 255", p.pos.x, p.pos.y, p.pos.z)?;
        }
    }
    Ok(())
}
