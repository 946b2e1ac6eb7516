//! End-to-end load flows: fetch, SVG sizing, load/error, then layout.

#![cfg(feature = "svg")]

use zendiff::svg::{SvgRoot, is_svg_content_type, svg_default_bounds};
use zendiff::*;

const INKSCAPE_LIKE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- Created with an editor -->
<svg
   xmlns:dc="http://purl.org/dc/elements/1.1/"
   xmlns="http://www.w3.org/2000/svg"
   width="100%"
   height="100%"
   viewBox="0 0 640 480"
   version="1.1">
  <g id="layer1"><rect x="0" y="0" width="640" height="480"/></g>
</svg>
"#;

const ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>"#;

fn file_box() -> f64 {
    // container width 1324 - 300 = 1024
    1324.0
}

#[test]
fn modified_svg_with_fluid_size() {
    let mut s = Session::new(file_box(), true, true, DiffConfig::default());

    let after = s.fetched(Side::After, Some("image/svg+xml"), INKSCAPE_LIKE.as_bytes(), None);
    // height = 300 · 640 / 480
    assert_eq!(after, Some(Size::new(300.0, 400.0)));
    assert_eq!(s.bounds_info(Side::After), BoundsInfo::Hidden);

    assert_eq!(s.fetched(Side::Before, Some("image/svg+xml"), ICON.as_bytes(), None), None);
    assert_eq!(s.bounds_info(Side::Before), BoundsInfo::Dimensions);

    s.loaded(Side::After, Size::new(300.0, 150.0));
    assert!(!s.is_ready());
    s.loaded(Side::Before, Size::new(24.0, 24.0));

    let views = s.views().expect("both settled");
    let sbs = views.side_by_side;
    assert_eq!(sbs.factor, 1.0);
    assert_eq!(sbs.after.unwrap().image, Size::new(300.0, 400.0));
    assert_eq!(sbs.before.unwrap().image, Size::new(24.0, 24.0));

    let overlay = views.overlay.expect("both present");
    // (300 - 24) / 2 = 138, (400 - 24) / 2 = 188
    assert_eq!(overlay.before.margin, Margin::px(188.0, 138.0));
    assert_eq!(overlay.container, Size::new(302.0, 422.0));

    let swipe = views.swipe.expect("both present");
    assert_eq!(swipe.frame, Size::new(302.0, 404.0));
}

#[test]
fn added_png_only_side_by_side() {
    let mut s = Session::new(file_box(), true, false, DiffConfig::default());
    assert_eq!(s.fetched(Side::After, Some("image/png"), b"\x89PNG", None), None);
    s.loaded(Side::After, Size::new(2048.0, 1024.0));

    let views = s.views().unwrap();
    // (1024 - 24) / 2 = 500
    assert_eq!(views.side_by_side.factor, 500.0 / 2048.0);
    assert!(views.swipe.is_none());
    assert!(views.overlay.is_none());
    assert!(views.labels.after.unwrap().width.highlight.is_none());
    assert!(views.side_by_side.before.is_none());
}

#[test]
fn broken_image_still_lays_out() {
    let mut s = Session::new(file_box(), true, true, DiffConfig::default());
    s.failed(Side::After);
    s.loaded(Side::Before, Size::new(100.0, 100.0));

    assert_eq!(s.bounds_info(Side::After).text(), Some(IMAGE_ERROR_TEXT));
    let views = s.views().unwrap();
    let after = views.side_by_side.after.expect("broken image keeps its frame");
    assert_eq!(after.image, Size::ZERO);
    assert_eq!(after.frame, Size::new(2.0, 2.0));
    let swipe = views.swipe.unwrap();
    assert_eq!(swipe.after.margin, Margin::px(0.0, 50.0));
    assert_eq!(swipe.after_container.padding_top, 50.0);
}

#[test]
fn rendered_size_preferred_for_fluid_svg() {
    let bounds = svg_default_bounds(
        INKSCAPE_LIKE.as_bytes(),
        Some(Size::new(320.0, 240.0)),
        &DiffConfig::default(),
    );
    assert_eq!(bounds, Ok(Some(Size::new(320.0, 240.0))));
}

#[test]
fn root_attributes_survive_namespaces_and_entities() {
    let doc = r#"<svg xmlns="http://www.w3.org/2000/svg" data-name="a &amp; b" width="10%" height="5"/>"#;
    let root = SvgRoot::parse(doc.as_bytes()).unwrap();
    assert!(root.has_percentage_size());
    assert!(is_svg_content_type("image/svg+xml;charset=UTF-8"));
}
