//! src/assay/data.rs
//!
//! The fixed lick-assay measurements and the two panel definitions drawn from them.
//!
//! Each column is named `<Test>_<Odor>` and holds one average-lick value per animal.
//! Ethyl and Citral were run on three animals, Carvone and Cis on four, so the
//! columns only line up within a panel.

use ratatui::style::Color;

use super::reshape::WideTable;

/// Exposure condition of a measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Test {
    Pre,
    Post,
}

impl Test {
    /// Hue order used for bars, dots, legends and colour lookup.
    pub const HUE_ORDER: [Test; 2] = [Test::Pre, Test::Post];

    pub fn label(self) -> &'static str {
        match self {
            Test::Pre => "Pre",
            Test::Post => "Post",
        }
    }

    /// Parse the prefix of a wide column name.
    pub fn parse(s: &str) -> Option<Test> {
        match s {
            "Pre" => Some(Test::Pre),
            "Post" => Some(Test::Post),
            _ => None,
        }
    }

    /// Index into a two-entry palette.
    pub fn hue_index(self) -> usize {
        match self {
            Test::Pre => 0,
            Test::Post => 1,
        }
    }
}

/// Raw columns, in the order the measurements were recorded.
pub const LICK_COLUMNS: [(&str, &[f64]); 8] = [
    ("Pre_Carvone", &[16.6, 13.6, 7.0, 11.3]),
    ("Post_Carvone", &[31.9, 20.7, 16.9, 27.0]),
    ("Pre_Cis", &[19.1, 20.7, 17.9, 25.4]),
    ("Post_Cis", &[23.8, 17.4, 13.8, 22.0]),
    ("Pre_Ethyl", &[24.4, 8.2, 30.6]),
    ("Post_Ethyl", &[21.8, 12.6, 35.8]),
    ("Pre_Citral", &[19.7, 15.2, 5.8]),
    ("Post_Citral", &[17.7, 14.2, 12.16]),
];

// matplotlib's default cycle (tab10), first two entries
const TAB_BLUE: Color = Color::Rgb(0x1f, 0x77, 0xb4);
const TAB_ORANGE: Color = Color::Rgb(0xff, 0x7f, 0x0e);

const LIGHTCORAL: Color = Color::Rgb(240, 128, 128);
const SKYBLUE: Color = Color::Rgb(135, 206, 235);
const DARKRED: Color = Color::Rgb(139, 0, 0);
const DEEPSKYBLUE: Color = Color::Rgb(0, 191, 255);

/// What one chart shows and how it is coloured.
#[derive(Clone, Debug)]
pub struct PanelSpec {
    pub title: &'static str,
    /// Wide columns pulled into this panel's frame.
    pub columns: [&'static str; 4],
    /// Category order along the x axis.
    pub order: [&'static str; 2],
    /// Bar fill colours, indexed by `Test::hue_index`.
    pub bar_palette: [Color; 2],
    /// Strip-point colours, indexed by `Test::hue_index`.
    pub dot_palette: [Color; 2],
}

/// The full wide table.
pub fn lick_table() -> WideTable {
    WideTable::from_columns(
        LICK_COLUMNS
            .iter()
            .map(|(name, values)| (name.to_string(), values.to_vec())),
    )
}

/// Panel A (Ethyl, Citral) then panel B (Carvone, Cis).
pub fn panel_specs() -> [PanelSpec; 2] {
    [
        PanelSpec {
            title: "Average Licks for Ethyl and Citral",
            columns: ["Pre_Ethyl", "Post_Ethyl", "Pre_Citral", "Post_Citral"],
            order: ["Ethyl", "Citral"],
            bar_palette: [TAB_BLUE, TAB_ORANGE],
            dot_palette: [TAB_BLUE, TAB_ORANGE],
        },
        PanelSpec {
            title: "Average Licks for Carvone and Cis",
            columns: ["Pre_Carvone", "Post_Carvone", "Pre_Cis", "Post_Cis"],
            order: ["Carvone", "Cis"],
            bar_palette: [LIGHTCORAL, SKYBLUE],
            dot_palette: [DARKRED, DEEPSKYBLUE],
        },
    ]
}
