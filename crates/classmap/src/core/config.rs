//! Layout and batch configuration

use serde::{Deserialize, Serialize};

use super::{ClassmapError, ExtractMode};

/// Default cap on a single source text (1 MiB)
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 1024 * 1024;

/// Grid and box geometry constants
///
/// Coordinates are in diagram-editor pixels. The defaults leave room for
/// boxes of up to 13 member rows before a row would overlap the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub margin: usize,
    pub columns: usize,
    pub column_width: usize,
    pub row_height: usize,
    pub box_width: usize,
    pub header_height: usize,
    pub member_height: usize,
    pub separator_height: usize,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self {
            margin: 100,
            columns: 3,
            column_width: 300,
            row_height: 400,
            box_width: 240,
            header_height: 26,
            member_height: 26,
            separator_height: 8,
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_cell_size(mut self, column_width: usize, row_height: usize) -> Self {
        self.column_width = column_width;
        self.row_height = row_height;
        self
    }

    /// Reject settings that cannot produce a grid
    pub fn validate(&self) -> Result<(), ClassmapError> {
        if self.columns == 0 {
            return Err(ClassmapError::invalid_config("columns must be at least 1"));
        }
        if self.box_width == 0 || self.member_height == 0 {
            return Err(ClassmapError::invalid_config(
                "box width and member height must be positive",
            ));
        }
        if self.column_width < self.box_width {
            return Err(ClassmapError::invalid_config(format!(
                "column width {} is narrower than box width {}",
                self.column_width, self.box_width
            )));
        }
        Ok(())
    }

    /// Box height for `attributes` attribute rows and `methods` method rows
    pub fn box_height(&self, attributes: usize, methods: usize) -> usize {
        let separator = if attributes > 0 && methods > 0 {
            self.separator_height
        } else {
            0
        };
        self.header_height + (attributes + methods) * self.member_height + separator
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Batch processing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblerConfig {
    pub mode: ExtractMode,
    pub max_source_bytes: usize,
}

impl AssemblerConfig {
    pub fn new(mode: ExtractMode) -> Self {
        Self {
            mode,
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
        }
    }

    pub fn with_max_source_bytes(mut self, limit: usize) -> Self {
        self.max_source_bytes = limit;
        self
    }

    pub fn validate(&self) -> Result<(), ClassmapError> {
        if self.max_source_bytes == 0 {
            return Err(ClassmapError::invalid_config(
                "max source size must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self::new(ExtractMode::default())
    }
}
