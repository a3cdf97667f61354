//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element is a grid of active/inactive cells with its origin
//! at `(width / 2, height / 2)`. The presets are square; custom elements
//! may be any rectangle.

use crate::{MorphError, MorphResult};

/// Largest structuring element side
pub const MAX_SEL_SIZE: u32 = 1025;

/// Preset structuring element shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelShape {
    /// Every cell active
    #[default]
    Square,
    /// Center row and center column
    Cross,
    /// Cells within `size / 2` of the center
    Circle,
}

/// Structuring Element (SEL)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SelSettings", into = "SelSettings")
)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<bool>,
}

impl Sel {
    /// Create an element with no active cells
    ///
    /// Each side must lie in `1..=MAX_SEL_SIZE`.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 || width > MAX_SEL_SIZE || height > MAX_SEL_SIZE {
            return Err(MorphError::InvalidSel(format!(
                "sides must be in 1..={MAX_SEL_SIZE}, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![false; width as usize * height as usize],
        })
    }

    /// Create a preset of side `size`
    pub fn from_shape(shape: SelShape, size: u32) -> MorphResult<Self> {
        match shape {
            SelShape::Square => Self::square(size),
            SelShape::Cross => Self::cross(size),
            SelShape::Circle => Self::circle(size),
        }
    }

    /// Create a square element with every cell active
    pub fn square(size: u32) -> MorphResult<Self> {
        let mut sel = Self::new(size, size)?;
        sel.data.fill(true);
        Ok(sel)
    }

    /// Create a cross (+) element: the center row and column
    pub fn cross(size: u32) -> MorphResult<Self> {
        let mut sel = Self::new(size, size)?;
        let c = sel.cx;
        for i in 0..size {
            sel.set(i, c, true);
            sel.set(c, i, true);
        }
        Ok(sel)
    }

    /// Create a disk element: cells with `dx² + dy² <= (size / 2)²`
    pub fn circle(size: u32) -> MorphResult<Self> {
        let mut sel = Self::new(size, size)?;
        let c = sel.cx as i64;
        let r2 = c * c;
        for y in 0..size {
            for x in 0..size {
                let dx = x as i64 - c;
                let dy = y as i64 - c;
                sel.set(x, y, dx * dx + dy * dy <= r2);
            }
        }
        Ok(sel)
    }

    /// Create an element from rows of numbers, non-zero meaning active
    ///
    /// All rows must have the same non-zero length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> MorphResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(MorphError::InvalidSel("rows differ in length".to_string()));
        }
        let mut sel = Self::new(width as u32, height as u32)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.as_ref().iter().enumerate() {
                sel.set(x as u32, y as u32, v != 0);
            }
        }
        Ok(sel)
    }

    /// Create an element from a string pattern
    ///
    /// Rows are separated by newlines; `x` marks an active cell and any
    /// other character an inactive one. Surrounding whitespace on each row
    /// is ignored.
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let rows: Vec<Vec<u8>> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().map(|c| u8::from(c == 'x')).collect())
            .collect();
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Whether the cell at `(x, y)` is active; `None` outside the element
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Set a cell. Ignored outside the element.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, active: bool) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = active;
        }
    }

    /// Count the active cells
    pub fn active_count(&self) -> usize {
        self.data.iter().filter(|&&a| a).count()
    }

    /// Iterate over active positions relative to the origin
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width as usize;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &active)| {
                if active {
                    let x = (idx % width) as i32;
                    let y = (idx / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }
}

/// Serialized form of a [`Sel`]; deserializing re-checks the shape.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SelSettings {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<SelSettings> for Sel {
    type Error = MorphError;

    fn try_from(s: SelSettings) -> MorphResult<Self> {
        let mut sel = Sel::new(s.width, s.height)?;
        if s.data.len() != sel.data.len() {
            return Err(MorphError::InvalidSel(format!(
                "expected {} cells for a {}x{} element, got {}",
                sel.data.len(),
                s.width,
                s.height,
                s.data.len()
            )));
        }
        sel.data = s.data;
        Ok(sel)
    }
}

#[cfg(feature = "serde")]
impl From<Sel> for SelSettings {
    fn from(sel: Sel) -> Self {
        Self {
            width: sel.width,
            height: sel.height,
            data: sel.data,
        }
    }
}
