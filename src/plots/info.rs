//! Hit-testing information collected while drawing.

use crate::geometry::{Point, Rect};

/// Clickable region for one plotted cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryItemEntity {
    /// Hot spot in drawing coordinates.
    pub area: Rect,
    /// Tool-tip text.
    pub tool_tip: Option<String>,
    /// Link target.
    pub url: Option<String>,
    /// Dataset row.
    pub row: usize,
    /// Dataset column.
    pub column: usize,
    /// Key of `row`.
    pub row_key: String,
    /// Key of `column`.
    pub column_key: String,
}

/// Areas and entities recorded by one draw call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRenderingInfo {
    plot_area: Option<Rect>,
    data_area: Option<Rect>,
    entities: Vec<CategoryItemEntity>,
}

impl PlotRenderingInfo {
    /// Empty info.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Area inside the insets.
    #[must_use]
    pub fn plot_area(&self) -> Option<Rect> {
        self.plot_area
    }

    /// Record the plot area.
    pub fn set_plot_area(&mut self, area: Rect) {
        self.plot_area = Some(area);
    }

    /// Area the data was drawn in.
    #[must_use]
    pub fn data_area(&self) -> Option<Rect> {
        self.data_area
    }

    /// Record the data area.
    pub fn set_data_area(&mut self, area: Rect) {
        self.data_area = Some(area);
    }

    /// Registered entities, in drawing order.
    #[must_use]
    pub fn entities(&self) -> &[CategoryItemEntity] {
        &self.entities
    }

    /// Register an entity.
    pub fn add_entity(&mut self, entity: CategoryItemEntity) {
        self.entities.push(entity);
    }

    /// Topmost entity containing `point`.
    #[must_use]
    pub fn entity_at(&self, point: Point) -> Option<&CategoryItemEntity> {
        self.entities.iter().rev().find(|e| e.area.contains(point))
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
