//! Explicit plot style handed to every contour plot.

/// Appearance of one set of grid lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridLines {
    pub color: String,
    pub alpha: f32,
    pub line_style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TickSize {
    pub length: f32,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TickDirection {
    In,
    Out,
    InOut,
}

/// Axes sides that carry ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TickSides {
    pub bottom: bool,
    pub top: bool,
    pub left: bool,
    pub right: bool,
}

/// Style of a filled contour figure. Missing keys in a settings file fall
/// back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotStyle {
    /// Width and height in inches.
    pub figure_size: (f32, f32),
    pub major_grid: GridLines,
    pub minor_grid: GridLines,
    pub minor_ticks: bool,
    pub major_tick_size: TickSize,
    pub minor_tick_size: TickSize,
    pub tick_direction: TickDirection,
    pub tick_sides: TickSides,
}

impl Default for PlotStyle {
    fn default() -> PlotStyle {
        PlotStyle {
            figure_size: (6.4, 4.8),
            major_grid: GridLines {
                color: "#999999".to_string(),
                alpha: 0.5,
                line_style: "-".to_string(),
            },
            minor_grid: GridLines {
                color: "#DDDDDD".to_string(),
                alpha: 0.25,
                line_style: "--".to_string(),
            },
            minor_ticks: true,
            major_tick_size: TickSize {
                length: 3.5,
                width: 2.,
            },
            minor_tick_size: TickSize {
                length: 1.75,
                width: 2.,
            },
            tick_direction: TickDirection::Out,
            tick_sides: TickSides {
                bottom: true,
                top: true,
                left: true,
                right: true,
            },
        }
    }
}
