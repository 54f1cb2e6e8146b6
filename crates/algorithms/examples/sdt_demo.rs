//! Signed distance transform demo on a synthetic mask.
//!
//! Builds a 48x64 binary mask holding a disk and a bar, computes the
//! signed Euclidean distance transform under both sign conventions, and
//! prints summary statistics plus a coarse contour rendering.
//!
//! Run:
//!   cargo run -p paramorph-algorithms --example sdt_demo

use paramorph_algorithms::distance::{signed_distance_transform, SdtParams};
use paramorph_core::Volume;

const ROWS: usize = 48;
const COLS: usize = 64;

fn main() {
    let mask = build_mask();
    let foreground = mask.data().iter().filter(|&&v| v > 0).count();
    println!(
        "mask: {}x{}, {} foreground voxels",
        ROWS, COLS, foreground
    );

    let params = SdtParams {
        outside_value: 0u8,
        inside_is_positive: true,
        use_spacing: true,
        algorithm: Default::default(),
    };
    let sdt = signed_distance_transform(&mask, &params).expect("sdt failed");
    report("inside positive", &sdt);

    let params = SdtParams {
        inside_is_positive: false,
        ..params
    };
    let sdt_flipped = signed_distance_transform(&mask, &params).expect("sdt failed");
    report("outside positive", &sdt_flipped);

    println!("\ncontour bands (inside positive):");
    render(&sdt);
}

fn build_mask() -> Volume<u8> {
    let mut data = vec![0u8; ROWS * COLS];
    // disk of radius 10 centred left of middle
    let (cy, cx, r) = (24.0, 20.0, 10.0);
    // vertical bar on the right
    for i in 0..ROWS {
        for j in 0..COLS {
            let dy = i as f64 - cy;
            let dx = j as f64 - cx;
            let in_disk = dy * dy + dx * dx <= r * r;
            let in_bar = (44..48).contains(&j) && (8..40).contains(&i);
            if in_disk || in_bar {
                data[i * COLS + j] = 1;
            }
        }
    }
    Volume::from_vec(&[ROWS, COLS], data).expect("mask shape")
}

fn report(label: &str, sdt: &Volume<f64>) {
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in sdt.data().iter() {
        min = min.min(v);
        max = max.max(v);
    }
    println!("  {label}: distance range [{min:.3}, {max:.3}]");
}

fn render(sdt: &Volume<f64>) {
    for i in (0..ROWS).step_by(2) {
        let mut row = String::with_capacity(COLS);
        for j in 0..COLS {
            let d = sdt.get(&[i, j]).expect("in bounds");
            row.push(match d {
                d if d > 6.0 => '#',
                d if d > 0.0 => '+',
                d if d > -6.0 => '.',
                _ => ' ',
            });
        }
        println!("{row}");
    }
}
