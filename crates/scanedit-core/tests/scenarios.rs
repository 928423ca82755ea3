//! End-to-end editing scenarios through the public API.

use scanedit_core::{
    estimate_skew, DeskewParams, EditError, EditOperation, EditSession, PixelFormat, ScanImage,
};

/// White page holding one line of black "words" (20 px blocks, 5 px apart)
/// rotated counter-clockwise by `angle_degrees` about the image center.
fn skewed_text_line(
    size: u32,
    line_length: f64,
    half_thickness: f64,
    angle_degrees: f64,
) -> ScanImage {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let c = (size as f64 - 1.0) / 2.0;
    let half_len = line_length / 2.0;

    let mut pixels = Vec::with_capacity((size * size * 3) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - c;
            let dy = y as f64 - c;
            let u = dx * cos - dy * sin;
            let v = dx * sin + dy * cos;
            let in_word = (u + half_len).rem_euclid(25.0) < 20.0;
            let ink = u.abs() <= half_len && v.abs() <= half_thickness && in_word;
            let value = if ink { 0 } else { 255 };
            pixels.extend_from_slice(&[value, value, value]);
        }
    }
    ScanImage::new_rgb(size, size, pixels)
}

fn gradient(width: u32, height: u32) -> ScanImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width) as u8);
            pixels.push((y * 255 / height) as u8);
            pixels.push(((x + y) * 127 / (width + height)) as u8);
        }
    }
    ScanImage::new_rgb(width, height, pixels)
}

fn assert_deskews(image: ScanImage, params: &DeskewParams) {
    let estimate = estimate_skew(&image, params)
        .unwrap()
        .expect("skewed text line should be detected");
    assert!(
        (estimate.angle_degrees - 10.0).abs() <= 2.0,
        "estimated skew {}",
        estimate.angle_degrees
    );

    let mut session = EditSession::new(image).unwrap();
    let corrected = scanedit_core::deskew_with(session.current(), params).unwrap();
    session.commit(corrected).unwrap();
    assert!(session.can_undo());

    let residual = estimate_skew(session.current(), params)
        .unwrap()
        .expect("straightened line should still be detected");
    assert!(
        residual.angle_degrees.abs() < 2.0,
        "residual skew {}",
        residual.angle_degrees
    );
}

#[test]
fn deskew_page_with_default_detector() {
    let page = skewed_text_line(400, 320.0, 6.0, 10.0);
    assert_deskews(page.clone(), &DeskewParams::default());

    // The operation form goes through the same defaults
    let mut session = EditSession::new(page.clone()).unwrap();
    session.apply(&EditOperation::Deskew).unwrap();
    assert_ne!(session.current(), &page);
    assert_eq!((session.current().width, session.current().height), (400, 400));
}

#[test]
fn deskew_small_image_with_lower_vote_threshold() {
    // An 80 px line cannot collect the default 100 votes
    let page = skewed_text_line(100, 80.0, 3.0, 10.0);
    assert_deskews(page, &DeskewParams::default().with_vote_threshold(45));
}

#[test]
fn deskew_blank_page_is_identity() {
    let page = ScanImage::filled(100, 100, PixelFormat::Rgb8, 255);
    let mut session = EditSession::new(page.clone()).unwrap();
    session.apply(&EditOperation::Deskew).unwrap();
    assert_eq!(session.current(), &page);
}

#[test]
fn three_commits_then_two_undos() {
    let start = gradient(100, 100);
    let mut session = EditSession::new(start.clone()).unwrap();

    session
        .apply(&EditOperation::Rotate { angle_degrees: 5.0 })
        .unwrap();
    let after_rotate = session.current().clone();

    session
        .apply(&EditOperation::Crop {
            x1: 10,
            y1: 10,
            x2: 90,
            y2: 90,
        })
        .unwrap();
    assert_eq!((session.current().width, session.current().height), (80, 80));

    session
        .apply(&EditOperation::Contrast { alpha: 1.5 })
        .unwrap();

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.current(), &after_rotate);
    assert_ne!(session.current(), &start);
    assert_eq!(session.undo_depth(), 1);
    assert_eq!(session.redo_depth(), 2);
}

#[test]
fn degenerate_crop_is_rejected() {
    let mut session = EditSession::new(gradient(50, 40)).unwrap();
    for op in [
        EditOperation::Crop {
            x1: 10,
            y1: 5,
            x2: 10,
            y2: 30,
        },
        EditOperation::Crop {
            x1: 0,
            y1: 7,
            x2: 40,
            y2: 7,
        },
    ] {
        assert!(matches!(
            session.apply(&op),
            Err(EditError::InvalidParameter(_))
        ));
    }
    assert!(!session.can_undo());
}

#[test]
fn replay_logged_operations() {
    let log = r#"[
        {"op": "rotate", "angle_degrees": -3.0},
        {"op": "crop", "x1": 90, "y1": 70, "x2": 5, "y2": 5},
        {"op": "contrast", "alpha": 1.2},
        {"op": "binarize"}
    ]"#;
    let ops: Vec<EditOperation> = serde_json::from_str(log).unwrap();

    let mut session = EditSession::new(gradient(100, 80)).unwrap();
    for op in &ops {
        session.apply(op).unwrap();
    }

    let result = session.finalize();
    assert_eq!((result.width, result.height), (85, 65));
    assert!(result.pixels.iter().all(|&v| v == 0 || v == 255));
    assert_eq!(session.undo_depth(), ops.len());
}

#[test]
fn png_export_round_trips_session_result() {
    let mut session = EditSession::new(gradient(30, 20)).unwrap();
    session.apply(&EditOperation::Binarize).unwrap();
    let page = session.into_image();

    let png = scanedit_core::encode_png(&page).unwrap();
    let decoded = scanedit_core::decode_image(&png).unwrap();
    assert_eq!(decoded, page);
}
