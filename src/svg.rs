//! Fallback sizing for SVG images without intrinsic dimensions.
//!
//! An `<svg>` whose `width`/`height` are missing or percentage-based has no
//! natural pixel size, so a browser renders it at whatever box it is given.
//! The diff views need concrete sizes, so such images get one of:
//!
//! 1. the size the browser actually rendered, when it looks sane;
//! 2. a 300px-wide box whose height follows the `viewBox`;
//! 3. a 300×300 box.
//!
//! Images with explicit absolute dimensions get no override.
//!
//! # Example
//!
//! ```
//! use zendiff::{DiffConfig, Size, svg::svg_default_bounds};
//!
//! let config = DiffConfig::default();
//!
//! let explicit = br#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32"/>"#;
//! assert_eq!(svg_default_bounds(explicit, None, &config).unwrap(), None);
//!
//! let fluid = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"/>"#;
//! assert_eq!(
//!     svg_default_bounds(fluid, None, &config).unwrap(),
//!     Some(Size::new(300.0, 600.0))
//! );
//! ```

use core::fmt;
use std::borrow::Cow;

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::config::DiffConfig;
use crate::geometry::Size;

/// MIME type served for SVG images.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Namespace the document element must be bound to.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Whether a `Content-Type` header value denotes an SVG image.
///
/// Parameters such as `; charset=utf-8` are ignored, as is ASCII case.
pub fn is_svg_content_type(header: &str) -> bool {
    let essence = header.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case(SVG_CONTENT_TYPE)
}

/// Unit of an SVG length, mirroring the DOM `SVGLength` unit types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// Unitless user units.
    Number,
    /// `%`
    Percentage,
    /// `em`
    Ems,
    /// `ex`
    Exs,
    /// `px`
    Px,
    /// `cm`
    Cm,
    /// `mm`
    Mm,
    /// `in`
    In,
    /// `pt`
    Pt,
    /// `pc`
    Pc,
}

const UNIT_SUFFIXES: &[(&str, LengthUnit)] = &[
    ("%", LengthUnit::Percentage),
    ("px", LengthUnit::Px),
    ("em", LengthUnit::Ems),
    ("ex", LengthUnit::Exs),
    ("cm", LengthUnit::Cm),
    ("mm", LengthUnit::Mm),
    ("in", LengthUnit::In),
    ("pt", LengthUnit::Pt),
    ("pc", LengthUnit::Pc),
];

/// A parsed `width`/`height` attribute value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SvgLength {
    /// Numeric part.
    pub value: f64,
    /// Unit.
    pub unit: LengthUnit,
}

impl SvgLength {
    /// `100%`, the initial value of a root `<svg>` width and height.
    pub const FULL: SvgLength = SvgLength {
        value: 100.0,
        unit: LengthUnit::Percentage,
    };

    /// Parse an attribute value like `"120"`, `"4.5em"`, or `"100%"`.
    ///
    /// Returns `None` for anything that is not a finite number with an
    /// optional known unit.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (number, unit) = UNIT_SUFFIXES
            .iter()
            .find_map(|&(suffix, unit)| s.strip_suffix(suffix).map(|n| (n, unit)))
            .unwrap_or((s, LengthUnit::Number));
        if number.is_empty() || number.ends_with(char::is_whitespace) {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        value.is_finite().then_some(Self { value, unit })
    }

    /// Whether the length is relative to the viewport.
    pub fn is_percentage(&self) -> bool {
        self.unit == LengthUnit::Percentage
    }
}

/// A parsed `viewBox` attribute.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewBox {
    /// Left edge in user units.
    pub min_x: f64,
    /// Top edge in user units.
    pub min_y: f64,
    /// Width in user units; must be positive to be usable.
    pub width: f64,
    /// Height in user units; must be positive to be usable.
    pub height: f64,
}

impl ViewBox {
    /// Parse four numbers separated by whitespace and/or commas.
    pub fn parse(s: &str) -> Option<Self> {
        let mut nums = s
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()));
        let vb = ViewBox {
            min_x: nums.next()??,
            min_y: nums.next()??,
            width: nums.next()??,
            height: nums.next()??,
        };
        if nums.next().is_some() {
            return None;
        }
        Some(vb)
    }

    /// Whether the box can provide an aspect ratio.
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Sizing-relevant attributes of an SVG document element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SvgRoot {
    /// `width`, defaulting to `100%` when missing or invalid.
    pub width: SvgLength,
    /// `height`, defaulting to `100%` when missing or invalid.
    pub height: SvgLength,
    /// `viewBox`, when present and well-formed.
    pub view_box: Option<ViewBox>,
}

impl SvgRoot {
    /// Read the document element of an SVG file.
    ///
    /// The root must be `svg` in the [`SVG_NAMESPACE`], with or without a
    /// prefix; browsers render anything else as a plain XML tree.
    pub fn parse(data: &[u8]) -> Result<Self, SvgError> {
        let mut reader = NsReader::from_reader(data);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_resolved_event_into(&mut buf) {
                Ok((ns, Event::Start(ref e))) | Ok((ns, Event::Empty(ref e))) => {
                    let in_svg_ns = matches!(
                        ns,
                        ResolveResult::Bound(Namespace(uri)) if uri == SVG_NAMESPACE.as_bytes()
                    );
                    if !in_svg_ns || e.local_name().as_ref() != b"svg" {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        return Err(SvgError::NotSvg(name));
                    }
                    return Self::from_element(e);
                }
                Ok((_, Event::Decl(_)))
                | Ok((_, Event::Comment(_)))
                | Ok((_, Event::DocType(_)))
                | Ok((_, Event::PI(_)))
                | Ok((_, Event::Text(_))) => {}
                Ok((_, Event::Eof)) => return Err(SvgError::Empty),
                Ok((_, other)) => {
                    return Err(SvgError::Malformed(format!("unexpected {other:?} before root")));
                }
                Err(e) => return Err(SvgError::Malformed(e.to_string())),
            }
            buf.clear();
        }
    }

    fn from_element(e: &BytesStart<'_>) -> Result<Self, SvgError> {
        let mut root = SvgRoot {
            width: SvgLength::FULL,
            height: SvgLength::FULL,
            view_box: None,
        };
        for attr in e.attributes() {
            let attr = attr.map_err(|e| SvgError::Malformed(e.to_string()))?;
            let value: Cow<'_, str> = attr
                .unescape_value()
                .map_err(|e| SvgError::Malformed(e.to_string()))?;
            match attr.key.as_ref() {
                b"width" => root.width = length_or_initial("width", &value),
                b"height" => root.height = length_or_initial("height", &value),
                b"viewBox" => {
                    root.view_box = ViewBox::parse(&value);
                    if root.view_box.is_none() {
                        log::trace!(target: "zendiff::svg", "ignoring invalid viewBox {value:?}");
                    }
                }
                _ => {}
            }
        }
        Ok(root)
    }

    /// Whether either dimension is percentage-based.
    pub fn has_percentage_size(&self) -> bool {
        self.width.is_percentage() || self.height.is_percentage()
    }

    /// Fallback display size, or `None` when the explicit size is usable.
    ///
    /// `rendered` is the size the browser produced when loading the image
    /// standalone; it wins when both dimensions lie strictly between 1 and
    /// [`DiffConfig::svg_max_size`].
    pub fn default_bounds(&self, rendered: Option<Size>, config: &DiffConfig) -> Option<Size> {
        if !self.has_percentage_size() {
            return None;
        }
        let sane = |v: f64| v > 1.0 && v < config.svg_max_size;
        if let Some(r) = rendered
            && sane(r.width)
            && sane(r.height)
        {
            return Some(r);
        }
        let side = config.svg_default_size;
        match self.view_box {
            Some(vb) if vb.is_usable() => Some(Size::new(side, side * vb.width / vb.height)),
            _ => Some(Size::new(side, side)),
        }
    }
}

fn length_or_initial(attr: &str, value: &str) -> SvgLength {
    SvgLength::parse(value).unwrap_or_else(|| {
        log::trace!(target: "zendiff::svg", "invalid {attr} {value:?}, using 100%");
        SvgLength::FULL
    })
}

/// Parse `data` and compute its fallback display size.
///
/// `Ok(None)` means the SVG has explicit absolute dimensions and needs no
/// override.
pub fn svg_default_bounds(
    data: &[u8],
    rendered: Option<Size>,
    config: &DiffConfig,
) -> Result<Option<Size>, SvgError> {
    let root = SvgRoot::parse(data)?;
    Ok(root.default_bounds(rendered, config))
}

/// Why an SVG document could not be inspected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SvgError {
    /// No element in the document.
    Empty,
    /// XML syntax error.
    Malformed(String),
    /// Document element is not `<svg>` in the SVG namespace.
    NotSvg(String),
}

impl fmt::Display for SvgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgError::Empty => f.write_str("document has no root element"),
            SvgError::Malformed(msg) => write!(f, "malformed svg: {msg}"),
            SvgError::NotSvg(name) => write!(f, "root element <{name}> is not an SVG <svg>"),
        }
    }
}

impl std::error::Error for SvgError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DiffConfig {
        DiffConfig::default()
    }

    /// A bodiless SVG root with the given attributes.
    fn doc(attrs: &str) -> Vec<u8> {
        format!(r#"<svg xmlns="{SVG_NAMESPACE}" {attrs}/>"#).into_bytes()
    }

    // ---- content type ----

    #[test]
    fn content_type_exact() {
        assert!(is_svg_content_type("image/svg+xml"));
    }

    #[test]
    fn content_type_with_params_and_case() {
        assert!(is_svg_content_type("Image/SVG+XML; charset=utf-8"));
        assert!(!is_svg_content_type("image/png"));
        assert!(!is_svg_content_type(""));
    }

    // ---- lengths ----

    #[test]
    fn length_units() {
        assert_eq!(
            SvgLength::parse("120"),
            Some(SvgLength {
                value: 120.0,
                unit: LengthUnit::Number
            })
        );
        assert_eq!(SvgLength::parse("4.5em").map(|l| l.unit), Some(LengthUnit::Ems));
        assert_eq!(SvgLength::parse(" 50% ").map(|l| l.unit), Some(LengthUnit::Percentage));
        assert_eq!(SvgLength::parse("1e2px").map(|l| l.value), Some(100.0));
    }

    #[test]
    fn length_rejects_garbage() {
        assert_eq!(SvgLength::parse(""), None);
        assert_eq!(SvgLength::parse("px"), None);
        assert_eq!(SvgLength::parse("auto"), None);
        assert_eq!(SvgLength::parse("10 px"), None);
        assert_eq!(SvgLength::parse("inf"), None);
    }

    #[test]
    fn view_box_separators() {
        let vb = ViewBox::parse("0,0 ,24  12").unwrap();
        assert_eq!(vb.width, 24.0);
        assert_eq!(vb.height, 12.0);
        assert!(ViewBox::parse("0 0 24").is_none());
        assert!(ViewBox::parse("0 0 24 12 5").is_none());
        assert!(!ViewBox::parse("0 0 0 12").unwrap().is_usable());
    }

    // ---- root parsing ----

    #[test]
    fn root_missing_attributes_are_full_percent() {
        let root = SvgRoot::parse(br#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#).unwrap();
        assert_eq!(root.width, SvgLength::FULL);
        assert_eq!(root.height, SvgLength::FULL);
        assert!(root.view_box.is_none());
    }

    #[test]
    fn root_after_prolog() {
        let doc = br#"<?xml version="1.0"?>
<!-- generator -->
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect/></svg>"#;
        let root = SvgRoot::parse(doc).unwrap();
        assert_eq!(root.width.value, 10.0);
        assert_eq!(root.height.value, 20.0);
    }

    #[test]
    fn root_prefixed_namespace() {
        let doc = br#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" width="5" height="5"/>"#;
        assert!(SvgRoot::parse(doc).is_ok());
    }

    #[test]
    fn root_not_svg() {
        assert_eq!(
            SvgRoot::parse(b"<html><body/></html>"),
            Err(SvgError::NotSvg("html".into()))
        );
    }

    #[test]
    fn root_without_namespace_is_not_svg() {
        assert_eq!(
            SvgRoot::parse(br#"<svg width="100%" height="100%"/>"#),
            Err(SvgError::NotSvg("svg".into()))
        );
    }

    #[test]
    fn root_in_foreign_namespace_is_not_svg() {
        let foreign = br#"<x:svg xmlns:x="urn:other" viewBox="0 0 10 10"/>"#;
        assert_eq!(SvgRoot::parse(foreign), Err(SvgError::NotSvg("x:svg".into())));
        assert!(matches!(
            svg_default_bounds(foreign, None, &config()),
            Err(SvgError::NotSvg(_))
        ));
    }

    #[test]
    fn root_empty_and_malformed() {
        assert_eq!(SvgRoot::parse(b""), Err(SvgError::Empty));
        assert_eq!(SvgRoot::parse(b"   "), Err(SvgError::Empty));
        assert!(matches!(
            SvgRoot::parse(br#"<svg xmlns="http://www.w3.org/2000/svg" width="1></svg>"#),
            Err(SvgError::Malformed(_))
        ));
    }

    // ---- fallback bounds ----

    #[test]
    fn explicit_numeric_size_needs_no_override() {
        let d = doc(r#"width="64" height="32""#);
        assert_eq!(svg_default_bounds(&d, None, &config()), Ok(None));
        let d = doc(r#"width="2in" height="3cm" viewBox="0 0 1 1""#);
        assert_eq!(svg_default_bounds(&d, None, &config()), Ok(None));
    }

    #[test]
    fn percentage_size_without_view_box_is_square() {
        let d = doc(r#"width="100%" height="100%""#);
        assert_eq!(
            svg_default_bounds(&d, None, &config()),
            Ok(Some(Size::new(300.0, 300.0)))
        );
    }

    #[test]
    fn one_percentage_dimension_is_enough() {
        let d = doc(r#"width="50" height="100%""#);
        assert_eq!(
            svg_default_bounds(&d, None, &config()),
            Ok(Some(Size::new(300.0, 300.0)))
        );
    }

    #[test]
    fn view_box_sets_height() {
        let d = doc(r#"viewBox="0 0 100 50""#);
        assert_eq!(
            svg_default_bounds(&d, None, &config()),
            Ok(Some(Size::new(300.0, 600.0)))
        );
    }

    #[test]
    fn degenerate_view_box_falls_back_to_square() {
        let d = doc(r#"viewBox="0 0 100 0""#);
        assert_eq!(
            svg_default_bounds(&d, None, &config()),
            Ok(Some(Size::new(300.0, 300.0)))
        );
    }

    #[test]
    fn rendered_size_wins_when_sane() {
        let d = doc(r#"viewBox="0 0 100 50""#);
        let rendered = Some(Size::new(150.0, 75.0));
        assert_eq!(svg_default_bounds(&d, rendered, &config()), Ok(rendered));
    }

    #[test]
    fn rendered_size_ignored_when_degenerate() {
        let d = doc("");
        for r in [Size::new(1.0, 50.0), Size::new(50.0, 99999.0), Size::ZERO] {
            assert_eq!(
                svg_default_bounds(&d, Some(r), &config()),
                Ok(Some(Size::new(300.0, 300.0))),
                "rendered {r:?}"
            );
        }
    }

    #[test]
    fn custom_default_size() {
        let c = config().svg_default_size(120.0);
        assert_eq!(svg_default_bounds(&doc(""), None, &c), Ok(Some(Size::new(120.0, 120.0))));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SvgError::NotSvg("html".into()).to_string(),
            "root element <html> is not an SVG <svg>"
        );
    }
}
