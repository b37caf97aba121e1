use crate::tests::point;
use crate::{flatten_strokes, split_strokes};

#[test]
fn test_empty_sequence_has_no_strokes() {
    assert!(split_strokes(&[]).is_empty());
}

#[test]
fn test_strokes_split_on_marker_bit() {
    let points = vec![
        point(0.0, 0.0, true),
        point(1.0, 1.0, false),
        point(2.0, 2.0, false),
        point(10.0, 10.0, true),
        point(11.0, 11.0, false),
        point(20.0, 20.0, true),
    ];

    let strokes = split_strokes(&points);

    assert_eq!(strokes.len(), 3);
    assert_eq!(strokes[0].len(), 3);
    assert_eq!(strokes[1].len(), 2);
    assert_eq!(strokes[2].len(), 1);
    assert_eq!(strokes[1].points()[0].x, 10.0);
}

#[test]
fn test_unmarked_first_point_still_starts_a_stroke() {
    let points = vec![
        point(0.0, 0.0, false),
        point(1.0, 1.0, false),
        point(5.0, 5.0, true),
    ];

    let strokes = split_strokes(&points);

    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[0].len(), 2);
}

#[test]
fn test_flatten_restores_wire_order() {
    let points = vec![
        point(0.0, 0.0, true),
        point(1.0, 1.0, false),
        point(3.0, 3.0, true),
    ];

    let strokes = split_strokes(&points);

    assert_eq!(flatten_strokes(&strokes), points);
}

#[test]
fn test_stroke_color_and_author_come_from_pen_down_point() {
    let mut first = point(0.0, 0.0, true);
    first.color = "#ff0000".to_string();
    let points = vec![first, point(1.0, 1.0, false)];

    let strokes = split_strokes(&points);

    assert_eq!(strokes[0].color(), Some("#ff0000"));
    assert_eq!(strokes[0].author(), Some("did:plc:alice"));
}
