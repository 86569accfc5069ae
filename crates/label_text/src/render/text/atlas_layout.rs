//! Atlas packing layouts
//!
//! Every font is one of three layouts. A layout is pure data: the grid
//! dimensions plus a table of code-point ranges, each assigned a run of
//! consecutive cell indices.
//!
//! | Layout | Grid | Cells |
//! |---|---|---|
//! | [`LEGACY_SINGLE_ROW`] | 69×1 | space, `!`–`` ` ``, lowercase reusing the uppercase cells, `{|}~` |
//! | [`GRID_16`] | 16×16 | space, ASCII 33–126, Latin-1 160–255, Cyrillic А–я |
//! | [`GRID_32`] | 32×32 | [`GRID_16`] plus Latin Extended-A 256–319 and Cyrillic Ѐ–Џ, ѐ–џ |

use std::collections::HashMap;

/// A run of code points mapped onto consecutive cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    /// First code point (inclusive)
    pub first: u32,
    /// Last code point (inclusive)
    pub last: u32,
    /// Cell index of `first`
    pub first_index: u32,
}

impl CodeRange {
    const fn new(first: u32, last: u32, first_index: u32) -> Self {
        Self {
            first,
            last,
            first_index,
        }
    }

    /// Number of code points in the range
    pub const fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    /// Cell index one past the end of this range
    pub const fn end_index(&self) -> u32 {
        self.first_index + self.len()
    }
}

/// Which packing an atlas image uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// One row of 69 cells, full texture height per glyph
    LegacySingleRow,
    /// 16×16 grid
    Grid16,
    /// 32×32 grid for high-coverage fonts
    Grid32,
}

/// Grid dimensions plus character table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Layout identity
    pub kind: LayoutKind,
    /// Cells per row
    pub columns: u32,
    /// Rows of cells
    pub rows: u32,
    /// Code-point ranges in table order
    pub ranges: &'static [CodeRange],
}

const SPACE: CodeRange = CodeRange::new(0x20, 0x20, 0);
const ASCII: CodeRange = CodeRange::new(33, 126, 1);
const LATIN_1: CodeRange = CodeRange::new(160, 255, 95);
const CYRILLIC: CodeRange = CodeRange::new(1040, 1103, 191);
const LATIN_EXTENDED_A: CodeRange = CodeRange::new(256, 319, 255);
const CYRILLIC_UPPER_SUPPLEMENT: CodeRange = CodeRange::new(1024, 1039, 319);
const CYRILLIC_LOWER_SUPPLEMENT: CodeRange = CodeRange::new(1104, 1119, 335);

/// Legacy Consolas strip: 69 cells in one row
pub const LEGACY_SINGLE_ROW: AtlasLayout = AtlasLayout {
    kind: LayoutKind::LegacySingleRow,
    columns: 69,
    rows: 1,
    ranges: &[
        SPACE,
        CodeRange::new(33, 96, 1),
        CodeRange::new(97, 122, 39),
        CodeRange::new(123, 126, 65),
    ],
};

/// Standard 16×16 grid
pub const GRID_16: AtlasLayout = AtlasLayout {
    kind: LayoutKind::Grid16,
    columns: 16,
    rows: 16,
    ranges: &[SPACE, ASCII, LATIN_1, CYRILLIC],
};

/// Extended 32×32 grid
pub const GRID_32: AtlasLayout = AtlasLayout {
    kind: LayoutKind::Grid32,
    columns: 32,
    rows: 32,
    ranges: &[
        SPACE,
        ASCII,
        LATIN_1,
        CYRILLIC,
        LATIN_EXTENDED_A,
        CYRILLIC_UPPER_SUPPLEMENT,
        CYRILLIC_LOWER_SUPPLEMENT,
    ],
};

impl AtlasLayout {
    /// Pick the layout for an atlas image
    ///
    /// Fonts configured as extended use [`GRID_32`]; otherwise images wider
    /// than `legacy_width_threshold` are the legacy strip and everything
    /// else is a [`GRID_16`] atlas.
    pub fn classify(texture_width: u32, legacy_width_threshold: u32, extended: bool) -> Self {
        if extended {
            GRID_32
        } else if texture_width > legacy_width_threshold {
            LEGACY_SINGLE_ROW
        } else {
            GRID_16
        }
    }

    /// Total addressable cells
    pub const fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Build the character → cell index table
    ///
    /// Code points that are not valid `char`s are skipped.
    pub fn character_map(&self) -> HashMap<char, u32> {
        let capacity = self.ranges.iter().map(|r| r.len() as usize).sum();
        let mut mapping = HashMap::with_capacity(capacity);

        for range in self.ranges {
            for (offset, code_point) in (range.first..=range.last).enumerate() {
                if let Some(ch) = char::from_u32(code_point) {
                    mapping.insert(ch, range.first_index + offset as u32);
                }
            }
        }

        mapping
    }
}
