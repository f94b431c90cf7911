//! Colour and marker assignment for the curves of one panel.
//!
//! Styles are indexed by the position of the (channel, withSelect) combination in
//! the panel's iteration order, so identical input always gets identical styles.
//! Indexing restarts at zero for every panel.

use log::warn;
use plotters::{
    element::{DynElement, IntoDynElement},
    prelude::*,
};

use crate::utils::error::{ReportError, Result};

pub const COLOURS: [RGBColor; 14] = [
    RGBColor(0xF7, 0xA3, 0xFF),
    RGBColor(0xEA, 0x00, 0xFF),
    RGBColor(0x2D, 0xA6, 0xC4),
    RGBColor(0x23, 0x81, 0x99),
    RGBColor(0x1C, 0xD1, 0x00),
    RGBColor(0x13, 0x91, 0x00),
    RGBColor(0xFC, 0xAE, 0x91),
    RGBColor(0xFB, 0x6A, 0x4A),
    RGBColor(0x85, 0x85, 0xD6),
    RGBColor(0x62, 0x62, 0x9E),
    RGBColor(0x85, 0x85, 0x85),
    RGBColor(0x2B, 0x2B, 0x2B),
    RGBColor(0xFF, 0xFF, 0x00),
    RGBColor(0xBA, 0xBA, 0x00),
];

pub const MARKERS: [Marker; 12] = [
    Marker::Point,
    Marker::TriangleDown,
    Marker::TriangleUp,
    Marker::TriDown,
    Marker::TriUp,
    Marker::Octagon,
    Marker::Pentagon,
    Marker::PlusFilled,
    Marker::X,
    Marker::Diamond,
    Marker::ThinDiamond,
    Marker::Square,
];

/// What to do once a panel has more curves than styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteOverflow {
    /// Reuse colours and markers from the start, each modulo its own length.
    #[default]
    Cycle,
    /// Refuse to draw indistinguishable curves.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Point,
    TriangleDown,
    TriangleUp,
    TriDown,
    TriUp,
    Octagon,
    Pentagon,
    PlusFilled,
    X,
    Diamond,
    ThinDiamond,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub colour: RGBColor,
    pub marker: Marker,
}

/// Number of combinations that get a unique (colour, marker) pair.
pub fn unique_styles() -> usize {
    COLOURS.len().min(MARKERS.len())
}

impl SeriesStyle {
    pub fn at(index: usize, overflow: PaletteOverflow) -> Result<Self> {
        let available = unique_styles();
        if index >= available {
            match overflow {
                PaletteOverflow::Fail => {
                    return Err(ReportError::PaletteExhausted {
                        requested: index + 1,
                        available,
                    });
                }
                PaletteOverflow::Cycle => {
                    warn!(
                        "curve #{} reuses a style: only {} unique styles available",
                        index + 1,
                        available
                    );
                }
            }
        }

        Ok(Self {
            colour: COLOURS[index % COLOURS.len()],
            marker: MARKERS[index % MARKERS.len()],
        })
    }
}

/// Unit polygon with `n` corners on a circle of radius `r`, first corner at `start` radians.
fn regular_polygon(n: usize, r: i32, start: f64) -> Vec<(i32, i32)> {
    (0..n)
        .map(|i| {
            let angle = start + i as f64 * std::f64::consts::TAU / n as f64;
            (
                (r as f64 * angle.cos()).round() as i32,
                (r as f64 * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// Three spokes from the centre; `down` points the lone spoke downwards.
fn tri_spokes(r: i32, down: bool) -> [Vec<(i32, i32)>; 3] {
    // backend y grows downwards
    let start = if down { std::f64::consts::FRAC_PI_2 } else { -std::f64::consts::FRAC_PI_2 };
    let tips = regular_polygon(3, r, start);
    [
        vec![(0, 0), tips[0]],
        vec![(0, 0), tips[1]],
        vec![(0, 0), tips[2]],
    ]
}

impl Marker {
    /// Marker shape centred on `at`; `size` is the half-width in pixels.
    pub fn element<'a, DB, C>(self, at: C, size: i32, colour: RGBColor) -> DynElement<'a, DB, C>
    where
        DB: DrawingBackend + 'a,
        C: Clone + 'a,
    {
        let fill = colour.filled();
        let stroke = colour.stroke_width(2);
        let s = size.max(1);
        let anchor = EmptyElement::at(at);

        match self {
            Marker::Point => (anchor + Circle::new((0, 0), (s / 2).max(1), fill)).into_dyn(),
            Marker::TriangleDown => {
                (anchor + Polygon::new(vec![(-s, -s), (s, -s), (0, s)], fill)).into_dyn()
            }
            Marker::TriangleUp => {
                (anchor + Polygon::new(vec![(-s, s), (s, s), (0, -s)], fill)).into_dyn()
            }
            Marker::TriDown | Marker::TriUp => {
                let [a, b, c] = tri_spokes(s, self == Marker::TriDown);
                (anchor
                    + PathElement::new(a, stroke)
                    + PathElement::new(b, stroke)
                    + PathElement::new(c, stroke))
                .into_dyn()
            }
            Marker::Octagon => (anchor
                + Polygon::new(regular_polygon(8, s, std::f64::consts::PI / 8.0), fill))
            .into_dyn(),
            Marker::Pentagon => (anchor
                + Polygon::new(regular_polygon(5, s, -std::f64::consts::FRAC_PI_2), fill))
            .into_dyn(),
            Marker::PlusFilled => {
                let t = (s / 3).max(1);
                (anchor
                    + Rectangle::new([(-s, -t), (s, t)], fill)
                    + Rectangle::new([(-t, -s), (t, s)], fill))
                .into_dyn()
            }
            Marker::X => (anchor
                + PathElement::new(vec![(-s, -s), (s, s)], stroke)
                + PathElement::new(vec![(-s, s), (s, -s)], stroke))
            .into_dyn(),
            Marker::Diamond => {
                (anchor + Polygon::new(vec![(0, -s), (s, 0), (0, s), (-s, 0)], fill)).into_dyn()
            }
            Marker::ThinDiamond => {
                let w = (s * 2 / 3).max(1);
                (anchor + Polygon::new(vec![(0, -s), (w, 0), (0, s), (-w, 0)], fill)).into_dyn()
            }
            Marker::Square => (anchor + Rectangle::new([(-s, -s), (s, s)], fill)).into_dyn(),
        }
    }
}
