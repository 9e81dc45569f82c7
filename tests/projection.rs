mod common;

use common::synthetic_depth::plane_map;
use depth_cloud::annotations::{Keypoint, MeasurementPath};
use depth_cloud::depth::DepthCell;
use depth_cloud::roi::CropFractions;
use depth_cloud::{CloudExporter, ExportInput, ExportParams};

fn params_with_stride(stride: usize) -> ExportParams {
    ExportParams {
        crop: CropFractions::default(),
        target_points: 0,
        path_stride: stride,
        ..Default::default()
    }
}

#[test]
fn paths_and_keypoints_share_the_cloud_frame() {
    let _ = env_logger::builder().is_test(true).try_init();
    let map = plane_map(20, 20, 5.0, 700.0);

    let paths = vec![MeasurementPath {
        name: "chest_width".to_string(),
        path_pixels: (0..10).map(|x| [x, 4]).collect(),
    }];
    let keypoints = vec![Keypoint {
        id: "collar_left".to_string(),
        finetuned_x: 6.3,
        finetuned_y: 4.1,
    }];

    let report = CloudExporter::new(params_with_stride(1))
        .process(ExportInput {
            map: &map,
            mesh_paths: &paths,
            keypoints: &keypoints,
            measurements: serde_json::Value::Null,
        })
        .unwrap();
    let cloud = &report.cloud;

    assert_eq!(cloud.paths.len(), 1);
    assert_eq!(cloud.paths[0].name, "chest_width");
    assert_eq!(cloud.paths[0].path3d.len(), 10);
    assert_eq!(cloud.keypoints.len(), 1);

    // Un-normalizing a projected pixel must recover the depth cell at that
    // pixel: path pixel [x, 4] sits at (row 4, col x).
    for (x, p) in cloud.paths[0].path3d.iter().enumerate() {
        let expected = [x as f64 * 5.0, 20.0, 700.0 + 4.0 + x as f64];
        for axis in 0..3 {
            let back = p[axis] * cloud.scale + cloud.center[axis];
            assert!(
                (back - expected[axis]).abs() < 1e-3,
                "pixel {x} axis {axis}: {back} vs {}",
                expected[axis]
            );
        }
    }

    // Keypoint rounds to (row 4, col 6).
    let kp = &cloud.keypoints[0];
    let expected = [30.0, 20.0, 710.0];
    for axis in 0..3 {
        let back = kp.pos[axis] * cloud.scale + cloud.center[axis];
        assert!((back - expected[axis]).abs() < 1e-3);
    }
}

#[test]
fn path_stride_bounds_the_output_length() {
    let map = plane_map(20, 20, 5.0, 700.0);
    let paths = vec![MeasurementPath {
        name: "hem".to_string(),
        path_pixels: (0..11).map(|x| [x, 2]).collect(),
    }];
    let report = CloudExporter::new(params_with_stride(3))
        .process(ExportInput {
            map: &map,
            mesh_paths: &paths,
            keypoints: &[],
            measurements: serde_json::Value::Null,
        })
        .unwrap();
    // ceil(11 / 3) = 4 sampled pixels, all valid.
    assert_eq!(report.cloud.paths[0].path3d.len(), 4);
    assert_eq!(report.trace.projection.paths[0].pixels_sampled, 4);
}

#[test]
fn unresolvable_annotations_are_dropped_silently() {
    let _ = env_logger::builder().is_test(true).try_init();
    // Valid plane with an invalid hole around (10, 10).
    let mut map = plane_map(24, 24, 5.0, 700.0);
    for row in 2..19usize {
        for col in 2..19usize {
            map.set(row, col, DepthCell::Invalid);
        }
    }

    let paths = vec![
        MeasurementPath {
            name: "inside_hole".to_string(),
            path_pixels: vec![[5, 5], [6, 6], [7, 7]],
        },
        MeasurementPath {
            name: "crossing".to_string(),
            path_pixels: vec![[0, 0], [5, 5], [23, 23]],
        },
    ];
    let keypoints = vec![
        Keypoint {
            id: "deep_in_hole".to_string(),
            finetuned_x: 10.0,
            finetuned_y: 10.0,
        },
        Keypoint {
            id: "near_edge".to_string(),
            finetuned_x: 2.0,
            finetuned_y: 2.0,
        },
    ];

    let report = CloudExporter::new(params_with_stride(1))
        .process(ExportInput {
            map: &map,
            mesh_paths: &paths,
            keypoints: &keypoints,
            measurements: serde_json::Value::Null,
        })
        .unwrap();
    let cloud = &report.cloud;

    // Both paths stay in the output; the fully-invalid one is empty.
    assert_eq!(cloud.paths.len(), 2);
    assert!(cloud.paths[0].path3d.is_empty());
    assert_eq!(cloud.paths[1].path3d.len(), 2);

    // The hole is 17 pixels wide: radius 5 cannot escape from its center,
    // but can from one pixel inside the border.
    assert_eq!(cloud.keypoints.len(), 1);
    assert_eq!(cloud.keypoints[0].id, "near_edge");
    assert_eq!(report.trace.projection.keypoints_resolved, 1);
    assert_eq!(report.trace.projection.keypoints_total, 2);
}

#[test]
fn keypoint_window_prefers_scan_order_over_distance() {
    // All-invalid map except two cells straddling the lookup pixel: the
    // earlier row wins even though both are equally near.
    let mut map = plane_map(9, 9, 1.0, 0.0);
    for row in 0..9usize {
        for col in 0..9usize {
            if !(row == 2 && col == 4 || row == 6 && col == 4) {
                map.set(row, col, DepthCell::Invalid);
            }
        }
    }
    // Keep normalization non-degenerate: cells at (2,4) and (6,4) differ.
    let keypoints = vec![Keypoint {
        id: "between".to_string(),
        finetuned_x: 4.0,
        finetuned_y: 4.0,
    }];
    let report = CloudExporter::new(params_with_stride(1))
        .process(ExportInput {
            map: &map,
            mesh_paths: &[],
            keypoints: &keypoints,
            measurements: serde_json::Value::Null,
        })
        .unwrap();
    let cloud = &report.cloud;
    assert_eq!(cloud.keypoints.len(), 1);
    // Row 2 cell: y = 2.0 in depth units.
    let back_y = cloud.keypoints[0].pos[1] * cloud.scale + cloud.center[1];
    assert!((back_y - 2.0).abs() < 1e-3, "resolved y {back_y}");
}
