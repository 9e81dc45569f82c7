use depth_cloud::config::export;
use depth_cloud::depth::io::{
    load_depth_npy, load_keypoints, load_measurements, load_mesh_paths, write_json_compact,
    write_json_file,
};
use depth_cloud::depth::DepthMap;
use depth_cloud::diagnostics::ExportReport;
use depth_cloud::{CloudExporter, ExportInput};
use image::{GrayImage, Luma};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "cloud_export".to_string());
    let config = export::parse_cli(&program)?;

    let map = load_depth_npy(&config.input.xyz_npy)?;
    println!(
        "Loaded {}: {} x {} pixels",
        config.input.xyz_npy.display(),
        map.w,
        map.h
    );

    let mesh_paths = match &config.input.mesh_paths_json {
        Some(path) => load_mesh_paths(path)?,
        None => Vec::new(),
    };
    let keypoints = match &config.input.keypoints_json {
        Some(path) => load_keypoints(path)?,
        None => Vec::new(),
    };
    let measurements = match &config.input.measurements_json {
        Some(path) => load_measurements(path)?,
        None => serde_json::Value::Null,
    };

    let exporter = CloudExporter::new(config.params);
    let report = exporter.process(ExportInput {
        map: &map,
        mesh_paths: &mesh_paths,
        keypoints: &keypoints,
        measurements,
    })?;

    print_text_summary(&report);

    write_json_compact(&config.output.cloud_json, &report.cloud)?;
    let size_mib = fs::metadata(&config.output.cloud_json)
        .map(|m| m.len() as f64 / 1024.0 / 1024.0)
        .unwrap_or(0.0);
    println!(
        "\nSaved {}: {} points, {:.1} MiB",
        config.output.cloud_json.display(),
        report.cloud.point_count,
        size_mib
    );

    if let Some(path) = &config.output.trace_json {
        write_json_file(path, &report.trace)?;
        println!("Trace written to {}", path.display());
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &map, &report)?;
        println!("Debug artifacts written to {}", dir.display());
    }

    Ok(())
}

fn print_text_summary(report: &ExportReport) {
    let trace = &report.trace;
    let cloud = &report.cloud;
    println!("Export summary");
    println!(
        "  input: {} x {}, {} paths, {} keypoints",
        trace.input.width, trace.input.height, trace.input.path_count, trace.input.keypoint_count
    );
    println!("  valid pixels: {}", trace.roi.valid_pixels);
    println!(
        "  crop bounds: rows [{}, {}], cols [{}, {}] -> {} points",
        trace.roi.bounds.row_lo,
        trace.roi.bounds.row_hi,
        trace.roi.bounds.col_lo,
        trace.roi.bounds.col_hi,
        trace.roi.cropped_pixels
    );
    if trace.sampling.applied {
        println!(
            "  downsampled to {} points (target {}, seed {})",
            trace.sampling.selected_points, trace.sampling.target_points, trace.sampling.seed
        );
    }
    println!(
        "  center: [{:.3}, {:.3}, {:.3}]",
        cloud.center[0], cloud.center[1], cloud.center[2]
    );
    println!("  scale: {:.3}", cloud.scale);
    println!(
        "  z span: {:.1} mm ({:.1} cm)",
        cloud.z_span_mm,
        cloud.z_span_mm / 10.0
    );
    for path in &trace.projection.paths {
        println!(
            "  path '{}': {} / {} sampled pixels resolved",
            path.name, path.points_resolved, path.pixels_sampled
        );
    }
    println!(
        "  keypoints: {} / {} resolved",
        trace.projection.keypoints_resolved, trace.projection.keypoints_total
    );
    println!("  total: {:.3} ms", trace.timings.total_ms);
}

fn save_debug_artifacts(dir: &Path, map: &DepthMap, report: &ExportReport) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
    save_validity_mask(&dir.join("validity_mask.png"), map)?;
    save_z_preview(&dir.join("z_preview.png"), map)?;
    write_json_file(&dir.join("trace.json"), &report.trace)
}

/// White where the depth map carries a measurement, black elsewhere.
fn save_validity_mask(path: &Path, map: &DepthMap) -> Result<(), String> {
    let mut out = GrayImage::new(map.w as u32, map.h as u32);
    for row in 0..map.h {
        for col in 0..map.w {
            let v = if map.get(row, col).is_valid() { 255 } else { 0 };
            out.put_pixel(col as u32, row as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Valid Z values stretched to the full gray range; invalid pixels black.
fn save_z_preview(path: &Path, map: &DepthMap) -> Result<(), String> {
    let mut z_min = f64::INFINITY;
    let mut z_max = f64::NEG_INFINITY;
    for cell in map.cells() {
        if let Some(p) = cell.xyz() {
            z_min = z_min.min(p[2]);
            z_max = z_max.max(p[2]);
        }
    }
    let z_range = (z_max - z_min).max(1e-9);

    let mut out = GrayImage::new(map.w as u32, map.h as u32);
    for row in 0..map.h {
        for col in 0..map.w {
            let v = match map.get(row, col).xyz() {
                Some(p) => (1.0 + 254.0 * (p[2] - z_min) / z_range).clamp(0.0, 255.0) as u8,
                None => 0,
            };
            out.put_pixel(col as u32, row as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}
